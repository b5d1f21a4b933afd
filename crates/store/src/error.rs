//! Contact store error types.

use thiserror::Error;

/// Contact store operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<rolodex_core::Error> for StoreError {
    fn from(e: rolodex_core::Error) -> Self {
        match e {
            rolodex_core::Error::Validation(msg) => StoreError::Validation(msg),
        }
    }
}

/// Result type for contact store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
