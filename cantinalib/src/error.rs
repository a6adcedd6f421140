//! Единый тип ошибок публичного API.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CantinaError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("XML error: {0}")]
    Xml(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid record {id}: {reason}")]
    Invalid { id: String, reason: String },

    #[error("Unsupported operation: {0}")]
    Unsupported(&'static str),
}

impl CantinaError {
    pub(crate) fn invalid(id: impl Into<String>, reason: impl Into<String>) -> Self {
        CantinaError::Invalid {
            id: id.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CantinaError>;
