use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use tracing::error;

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackScheme {
    /// Automatic scores carry an empty feedback text.
    Blank,
    /// Automatic scores carry a short generated summary.
    Auto,
}

/// How a multiple-choice (multi-select) task is compared against its answer key.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MultiSelectPolicy {
    /// Exactly one selected index, equal to `correctAnswer`.
    SingleAnswer,
    /// Selected set equals the `correctAnswers` set.
    ExactSet,
}

/// What an auto-score run does with task scores a teacher entered by hand.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RescorePolicy {
    /// Manual scores survive unless the run is forced.
    PreserveManual,
    /// Every run replaces every task score.
    Overwrite,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MarkingOptions {
    #[serde(default = "default_feedback_scheme")]
    pub feedback_scheme: FeedbackScheme,

    #[serde(default = "default_multi_select_policy")]
    pub multi_select_policy: MultiSelectPolicy,

    #[serde(default = "default_rescore_policy")]
    pub rescore_policy: RescorePolicy,
}

impl Default for MarkingOptions {
    fn default() -> Self {
        Self {
            feedback_scheme: default_feedback_scheme(),
            multi_select_policy: default_multi_select_policy(),
            rescore_policy: default_rescore_policy(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ScoringConfig {
    #[serde(default)]
    pub marking: MarkingOptions,
}

impl ScoringConfig {
    pub fn default_config() -> Self {
        ScoringConfig {
            marking: MarkingOptions::default(),
        }
    }

    /// Reads a config file. Missing sections and fields fall back to their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let file_contents = fs::read_to_string(path).map_err(|e| {
            error!("Failed to read scoring config {}: {}", path.display(), e);
            format!("Failed to read scoring config at {path:?}")
        })?;

        serde_json::from_str(&file_contents).map_err(|e| {
            error!("Invalid scoring config {}: {}", path.display(), e);
            "Invalid config JSON format".to_string()
        })
    }

    /// Loads `path` when given, otherwise returns the defaults.
    pub fn load_or_default(path: Option<&str>) -> Result<Self, String> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default_config()),
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), String> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|e| format!("Failed to create config directory: {e:?}"))?;
            }
        }

        let json = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize config to JSON: {e}"))?;

        fs::write(path, json).map_err(|e| format!("Failed to write config file to disk: {e:?}"))?;

        Ok(())
    }
}

//Default Functions

fn default_feedback_scheme() -> FeedbackScheme {
    FeedbackScheme::Blank
}

fn default_multi_select_policy() -> MultiSelectPolicy {
    MultiSelectPolicy::SingleAnswer
}

fn default_rescore_policy() -> RescorePolicy {
    RescorePolicy::PreserveManual
}
