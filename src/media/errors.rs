//! # Media Errors

use thiserror::Error;

/// Result type for image storage operations
pub type MediaResult<T> = Result<T, MediaError>;

/// Image storage errors
#[derive(Debug, Clone, Error)]
pub enum MediaError {
    #[error("Uploaded file is empty")]
    EmptyUpload,

    #[error("Invalid image filename: {0}")]
    InvalidFilename(String),

    #[error("Image not found: {0}")]
    NotFound(String),

    #[error("Failed to write image: {0}")]
    WriteFailed(String),

    #[error("Failed to read image: {0}")]
    ReadFailed(String),
}

impl MediaError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            MediaError::EmptyUpload => 400,
            MediaError::InvalidFilename(_) => 400,
            MediaError::NotFound(_) => 404,
            MediaError::WriteFailed(_) => 500,
            MediaError::ReadFailed(_) => 500,
        }
    }
}
