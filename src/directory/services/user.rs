//! Service layer for reviewer availability.

use super::DirectoryServiceResult;
use crate::{
    directory::{
        domain::{User, UserId},
        ports::DirectoryRepository,
    },
    error::DomainError,
};
use std::sync::Arc;
use tracing::{error, info};

/// Reviewer availability service.
#[derive(Clone)]
pub struct UserService<D>
where
    D: DirectoryRepository,
{
    directory: Arc<D>,
}

impl<D> UserService<D>
where
    D: DirectoryRepository,
{
    /// Creates a new user service.
    #[must_use]
    pub const fn new(directory: Arc<D>) -> Self {
        Self { directory }
    }

    /// Sets whether a user can be picked as a reviewer.
    ///
    /// Deactivation does not touch existing assignments; it only removes the
    /// user from future candidate pools.
    ///
    /// # Errors
    ///
    /// Returns [`super::DirectoryServiceError::Domain`] when the identifier is
    /// invalid or unknown, and [`super::DirectoryServiceError::Repository`]
    /// when persistence fails.
    pub async fn set_is_active(
        &self,
        user_id: &str,
        is_active: bool,
    ) -> DirectoryServiceResult<User> {
        let id = UserId::new(user_id)?;
        let mut user = self
            .directory
            .find_user(&id)
            .await
            .inspect_err(|err| error!(user = %id, error = %err, "user lookup failed"))?
            .ok_or_else(|| DomainError::UserNotFound(id.clone()))?;

        user.set_active(is_active);
        self.directory
            .update_user(&user)
            .await
            .inspect_err(|err| error!(user = %id, error = %err, "user update failed"))?;

        info!(user = %id, is_active, "reviewer availability changed");
        Ok(user)
    }
}
