pub mod config;
pub mod scoring_config;
