//! Service-level errors for the assignment engine.

use crate::directory::ports::DirectoryRepositoryError;
use crate::error::{DomainError, ErrorCode};
use crate::review::ports::{PullRequestRepositoryError, RandomSourceError};
use thiserror::Error;

/// Failures surfaced by [`super::ReviewAssignmentService`].
///
/// Only [`ReviewServiceError::Domain`] is caller-correctable; every other
/// variant is an infrastructure failure passed through unchanged.
#[derive(Debug, Error)]
pub enum ReviewServiceError {
    /// A caller-correctable domain rule was violated.
    #[error(transparent)]
    Domain(#[from] DomainError),
    /// Directory store failed.
    #[error(transparent)]
    Directory(#[from] DirectoryRepositoryError),
    /// Pull request store failed.
    #[error(transparent)]
    Repository(#[from] PullRequestRepositoryError),
    /// The random source was unavailable and the policy does not allow a
    /// partial selection.
    #[error(transparent)]
    RandomSource(#[from] RandomSourceError),
}

impl ReviewServiceError {
    /// Returns the domain failure code, or `None` for infrastructure
    /// failures.
    #[must_use]
    pub const fn domain_code(&self) -> Option<ErrorCode> {
        match self {
            Self::Domain(err) => Some(err.code()),
            Self::Directory(_) | Self::Repository(_) | Self::RandomSource(_) => None,
        }
    }
}

/// Result type for assignment engine operations.
pub type ReviewServiceResult<T> = Result<T, ReviewServiceError>;
