//! Team member entity.

use super::{TeamName, UserId};
use crate::error::{DomainError, require_text};
use serde::{Deserialize, Serialize};

/// A team member who may author or review pull requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "user_id")]
    id: UserId,
    username: String,
    #[serde(rename = "team_name")]
    team: TeamName,
    is_active: bool,
}

impl User {
    /// Creates a user with a validated display name.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidField`] when `username` is blank or longer
    /// than 255 bytes.
    pub fn new(
        id: UserId,
        username: impl AsRef<str>,
        team: TeamName,
        is_active: bool,
    ) -> Result<Self, DomainError> {
        let display_name = require_text("username", username.as_ref())?;
        Ok(Self {
            id,
            username: display_name,
            team,
            is_active,
        })
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> &UserId {
        &self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the team the user belongs to.
    #[must_use]
    pub const fn team(&self) -> &TeamName {
        &self.team
    }

    /// Returns whether the user can be picked as a reviewer.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.is_active
    }

    /// Toggles reviewer availability.
    pub const fn set_active(&mut self, is_active: bool) {
        self.is_active = is_active;
    }
}
