//! Service-level errors for directory operations.

use crate::directory::ports::DirectoryRepositoryError;
use crate::error::{DomainError, ErrorCode};
use thiserror::Error;

/// Service-level errors for team and user operations.
#[derive(Debug, Error)]
pub enum DirectoryServiceError {
    /// A caller-correctable domain rule was violated.
    #[error(transparent)]
    Domain(#[from] DomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] DirectoryRepositoryError),
}

impl DirectoryServiceError {
    /// Returns the domain failure code, or `None` for infrastructure
    /// failures.
    #[must_use]
    pub const fn domain_code(&self) -> Option<ErrorCode> {
        match self {
            Self::Domain(err) => Some(err.code()),
            Self::Repository(_) => None,
        }
    }
}

/// Result type for directory service operations.
pub type DirectoryServiceResult<T> = Result<T, DirectoryServiceError>;
