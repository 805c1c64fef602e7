use std::fmt::Display;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Persistence error: {0}")]
    Persistence(String),
    #[error("Export unavailable: {0}")]
    ExportUnavailable(String),
}

impl CoreError {
    pub fn persistence(err: impl Display) -> Self {
        CoreError::Persistence(err.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::Persistence(err.to_string())
    }
}
