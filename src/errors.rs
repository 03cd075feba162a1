use thiserror::Error;

/// Error type that captures common engine and storage failures.
#[derive(Debug, Error)]
pub enum RentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("Not found: {0}")]
    NotFound(String),
}
