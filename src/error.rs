//! Domain error taxonomy shared by the directory and review contexts.
//!
//! Every [`DomainError`] maps to exactly one [`ErrorCode`]. The code is the
//! only part a transport layer needs to choose between a client-facing and a
//! server-facing response; the message is the `Display` rendering.

use crate::{
    config::MAX_IDENTIFIER_LENGTH,
    directory::domain::{TeamName, UserId},
    review::domain::PullRequestId,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Closed set of domain failure codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// A referenced entity does not exist or an identifier is unusable.
    NotFound,
    /// A team with the same name already exists.
    TeamExists,
    /// A pull request with the same identifier already exists.
    PrExists,
    /// The pull request is merged and no longer accepts changes.
    PrMerged,
    /// The reviewer is not assigned to the pull request.
    NotAssigned,
    /// No eligible replacement reviewer exists.
    NoCandidate,
}

impl ErrorCode {
    /// Returns the canonical wire representation of the code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "NOT_FOUND",
            Self::TeamExists => "TEAM_EXISTS",
            Self::PrExists => "PR_EXISTS",
            Self::PrMerged => "PR_MERGED",
            Self::NotAssigned => "NOT_ASSIGNED",
            Self::NoCandidate => "NO_CANDIDATE",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reason a text field failed re-validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldViolation {
    /// The value is empty after trimming.
    Empty,
    /// The value exceeds [`MAX_IDENTIFIER_LENGTH`] bytes.
    TooLong,
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("cannot be empty"),
            Self::TooLong => write!(f, "cannot exceed {MAX_IDENTIFIER_LENGTH} characters"),
        }
    }
}

/// Expected, caller-correctable failures raised by the engine.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DomainError {
    /// A text input failed re-validation.
    #[error("{field} {violation}")]
    InvalidField {
        /// Name of the offending field.
        field: &'static str,
        /// What was wrong with it.
        violation: FieldViolation,
    },

    /// A team was submitted without members.
    #[error("team must have at least one member")]
    EmptyTeam,

    /// A team was submitted with more members than the policy allows.
    #[error("team cannot have more than {limit} members")]
    TooManyMembers {
        /// Configured member ceiling.
        limit: usize,
    },

    /// A member's team field does not match the team being created.
    #[error("member {user} team_name must match team name {team}")]
    MemberTeamMismatch {
        /// Offending member.
        user: UserId,
        /// Team being created.
        team: TeamName,
    },

    /// The user does not exist.
    #[error("user not found: {0}")]
    UserNotFound(UserId),

    /// The pull request author does not exist.
    #[error("author not found: {0}")]
    AuthorNotFound(UserId),

    /// The team does not exist.
    #[error("team not found: {0}")]
    TeamNotFound(TeamName),

    /// The pull request does not exist.
    #[error("PR not found: {0}")]
    PullRequestNotFound(PullRequestId),

    /// The team name is already taken.
    #[error("team_name already exists: {0}")]
    TeamExists(TeamName),

    /// The pull request identifier is already taken.
    #[error("PR id already exists: {0}")]
    PullRequestExists(PullRequestId),

    /// The pull request has been merged.
    #[error("cannot reassign on merged PR: {0}")]
    PullRequestMerged(PullRequestId),

    /// The reviewer is not on the pull request.
    #[error("reviewer {reviewer} is not assigned to PR {pull_request}")]
    NotAssigned {
        /// Pull request inspected.
        pull_request: PullRequestId,
        /// Reviewer that was expected on it.
        reviewer: UserId,
    },

    /// A reviewer set would contain the author.
    #[error("author {0} cannot review their own PR")]
    AuthorAsReviewer(UserId),

    /// A reviewer set would contain the same user twice.
    #[error("reviewer {0} is already assigned")]
    DuplicateReviewer(UserId),

    /// No active teammate is eligible as a replacement.
    #[error("no active replacement candidate in team for PR {0}")]
    NoCandidate(PullRequestId),
}

impl DomainError {
    /// Returns the failure code for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidField { .. }
            | Self::EmptyTeam
            | Self::TooManyMembers { .. }
            | Self::MemberTeamMismatch { .. }
            | Self::UserNotFound(_)
            | Self::AuthorNotFound(_)
            | Self::TeamNotFound(_)
            | Self::PullRequestNotFound(_) => ErrorCode::NotFound,
            Self::TeamExists(_) => ErrorCode::TeamExists,
            Self::PullRequestExists(_) => ErrorCode::PrExists,
            Self::PullRequestMerged(_) => ErrorCode::PrMerged,
            Self::NotAssigned { .. } => ErrorCode::NotAssigned,
            // Only raised for an unusable replacement candidate.
            Self::AuthorAsReviewer(_) | Self::DuplicateReviewer(_) | Self::NoCandidate(_) => {
                ErrorCode::NoCandidate
            }
        }
    }

    /// Returns the human-readable message.
    #[must_use]
    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// Validates a required text value and returns it unchanged.
///
/// Identifiers are opaque: surrounding whitespace is kept and counts towards
/// the length ceiling.
///
/// # Errors
///
/// Returns [`DomainError::InvalidField`] when the value is empty or blank, or
/// longer than [`MAX_IDENTIFIER_LENGTH`] bytes.
pub(crate) fn require_text(field: &'static str, value: &str) -> Result<String, DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::InvalidField {
            field,
            violation: FieldViolation::Empty,
        });
    }
    if value.len() > MAX_IDENTIFIER_LENGTH {
        return Err(DomainError::InvalidField {
            field,
            violation: FieldViolation::TooLong,
        });
    }
    Ok(value.to_owned())
}
