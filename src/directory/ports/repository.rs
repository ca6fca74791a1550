//! Repository port for team and user persistence.

use crate::directory::domain::{Team, TeamName, User, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for directory repository operations.
pub type DirectoryRepositoryResult<T> = Result<T, DirectoryRepositoryError>;

/// Directory read/write contract consulted by the assignment engine.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DirectoryRepository: Send + Sync {
    /// Finds a user by identifier.
    ///
    /// Returns `None` when the user does not exist.
    async fn find_user(&self, id: &UserId) -> DirectoryRepositoryResult<Option<User>>;

    /// Inserts a user or overwrites every field of an existing one,
    /// including its team.
    async fn create_or_update_user(&self, user: &User) -> DirectoryRepositoryResult<()>;

    /// Persists changes to an existing user.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryRepositoryError::UserNotFound`] when the user does
    /// not exist.
    async fn update_user(&self, user: &User) -> DirectoryRepositoryResult<()>;

    /// Returns every member of `team`.
    async fn users_by_team(&self, team: &TeamName) -> DirectoryRepositoryResult<Vec<User>>;

    /// Returns the members of `team` whose active flag is set.
    async fn active_users_by_team(&self, team: &TeamName) -> DirectoryRepositoryResult<Vec<User>>;

    /// Finds a team and its members by name.
    ///
    /// Returns `None` when the team does not exist.
    async fn find_team(&self, name: &TeamName) -> DirectoryRepositoryResult<Option<Team>>;

    /// Returns whether a team with `name` exists.
    async fn team_exists(&self, name: &TeamName) -> DirectoryRepositoryResult<bool>;

    /// Stores a new team record. Members are written separately through
    /// [`DirectoryRepository::create_or_update_user`].
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryRepositoryError::DuplicateTeam`] when the name is
    /// already taken.
    async fn create_team(&self, team: &Team) -> DirectoryRepositoryResult<()>;
}

/// Errors returned by directory repository implementations.
#[derive(Debug, Clone, Error)]
pub enum DirectoryRepositoryError {
    /// A team with the same name already exists.
    #[error("duplicate team: {0}")]
    DuplicateTeam(TeamName),

    /// The user was not found.
    #[error("user not found: {0}")]
    UserNotFound(UserId),

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl DirectoryRepositoryError {
    /// Wraps a data-quality error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
