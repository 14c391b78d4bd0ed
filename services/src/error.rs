use marker::error::MarkerError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// The named record does not exist in the store.
    #[error("{0} not found")]
    NotFound(String),
    /// The store failed to read or write.
    #[error("storage error: {0}")]
    Storage(String),
    #[error(transparent)]
    Marker(#[from] MarkerError),
}

impl ServiceError {
    pub fn submission_not_found(id: &str) -> Self {
        ServiceError::NotFound(format!("submission '{id}'"))
    }

    pub fn worksheet_not_found(id: &str) -> Self {
        ServiceError::NotFound(format!("worksheet '{id}'"))
    }
}
