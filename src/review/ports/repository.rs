//! Repository port for pull request persistence and review-queue lookup.

use crate::directory::domain::UserId;
use crate::review::domain::{PullRequest, PullRequestId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for pull request repository operations.
pub type PullRequestRepositoryResult<T> = Result<T, PullRequestRepositoryError>;

/// Pull request read/write contract used by the assignment engine.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PullRequestRepository: Send + Sync {
    /// Returns whether a pull request with `id` exists.
    async fn exists(&self, id: &PullRequestId) -> PullRequestRepositoryResult<bool>;

    /// Finds a pull request by identifier.
    ///
    /// Returns `None` when the pull request does not exist.
    async fn find_by_id(
        &self,
        id: &PullRequestId,
    ) -> PullRequestRepositoryResult<Option<PullRequest>>;

    /// Stores a new pull request with its reviewers.
    ///
    /// # Errors
    ///
    /// Returns [`PullRequestRepositoryError::DuplicatePullRequest`] when the
    /// identifier is already taken.
    async fn store(&self, pull_request: &PullRequest) -> PullRequestRepositoryResult<()>;

    /// Replaces the stored state and reviewer set of an existing pull
    /// request. The last write wins.
    ///
    /// # Errors
    ///
    /// Returns [`PullRequestRepositoryError::NotFound`] when the pull request
    /// does not exist.
    async fn update(&self, pull_request: &PullRequest) -> PullRequestRepositoryResult<()>;

    /// Returns every pull request on which `reviewer` is currently assigned,
    /// regardless of status, ordered by creation time and then identifier
    /// (see [`crate::review::domain::sort_oldest_first`]).
    async fn find_by_reviewer(
        &self,
        reviewer: &UserId,
    ) -> PullRequestRepositoryResult<Vec<PullRequest>>;
}

/// Errors returned by pull request repository implementations.
#[derive(Debug, Clone, Error)]
pub enum PullRequestRepositoryError {
    /// A pull request with the same identifier already exists.
    #[error("duplicate pull request identifier: {0}")]
    DuplicatePullRequest(PullRequestId),

    /// The pull request was not found.
    #[error("pull request not found: {0}")]
    NotFound(PullRequestId),

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl PullRequestRepositoryError {
    /// Wraps a data-quality error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
