//! # Record Store Errors

use thiserror::Error;

/// Result type for record store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Record store errors
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("Failed to read record file: {0}")]
    ReadFailed(String),

    #[error("Failed to write record file: {0}")]
    WriteFailed(String),
}

impl StoreError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            StoreError::ReadFailed(_) => 500,
            StoreError::WriteFailed(_) => 500,
        }
    }
}
