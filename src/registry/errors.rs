//! # Registry Errors

use thiserror::Error;

use crate::store::StoreError;

use super::animal::FieldError;

/// Result type for registry operations
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Registry errors
#[derive(Debug, Clone, Error)]
pub enum RegistryError {
    #[error(transparent)]
    Storage(#[from] StoreError),

    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    #[error("No animal with key {0}")]
    NotFound(u64),
}

impl RegistryError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            RegistryError::Storage(e) => e.status_code(),
            RegistryError::Validation(_) => 422,
            RegistryError::NotFound(_) => 404,
        }
    }
}

/// Failure modes of the atomic edit operation.
///
/// The edit handler inspects the variant instead of catching exceptions: a
/// not-found key, a validation failure, and a storage failure each map to a
/// distinct user-visible outcome while the submitted values stay available.
#[derive(Debug, Clone, Error)]
pub enum EditError {
    #[error("No animal with key {0}")]
    NotFound(u64),

    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl EditError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            EditError::NotFound(_) => 404,
            EditError::Validation(_) => 422,
            EditError::Storage(e) => e.status_code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(RegistryError::NotFound(3).status_code(), 404);
        assert_eq!(RegistryError::Validation(vec![]).status_code(), 422);
        assert_eq!(EditError::NotFound(3).status_code(), 404);
        assert_eq!(
            EditError::Storage(StoreError::WriteFailed("disk full".into())).status_code(),
            500
        );
    }
}
