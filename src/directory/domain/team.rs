//! Team aggregate.

use super::{TeamName, User};
use crate::error::DomainError;
use serde::{Deserialize, Serialize};

/// A named group of users; reviewers are drawn from the author's team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    #[serde(rename = "team_name")]
    name: TeamName,
    members: Vec<User>,
}

impl Team {
    /// Creates a team after checking the membership invariants.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EmptyTeam`] when `members` is empty,
    /// [`DomainError::TooManyMembers`] when it exceeds `max_members`, or
    /// [`DomainError::MemberTeamMismatch`] when a member's team field is not
    /// `name`.
    pub fn new(
        name: TeamName,
        members: Vec<User>,
        max_members: usize,
    ) -> Result<Self, DomainError> {
        if members.is_empty() {
            return Err(DomainError::EmptyTeam);
        }
        if members.len() > max_members {
            return Err(DomainError::TooManyMembers { limit: max_members });
        }
        if let Some(stray) = members.iter().find(|member| *member.team() != name) {
            return Err(DomainError::MemberTeamMismatch {
                user: stray.id().clone(),
                team: name,
            });
        }
        Ok(Self { name, members })
    }

    /// Reconstructs a team from storage without re-checking invariants.
    #[must_use]
    pub const fn from_persisted(name: TeamName, members: Vec<User>) -> Self {
        Self { name, members }
    }

    /// Returns the team name.
    #[must_use]
    pub const fn name(&self) -> &TeamName {
        &self.name
    }

    /// Returns the members in registration order.
    #[must_use]
    pub fn members(&self) -> &[User] {
        &self.members
    }
}
