//! Pull request aggregate and lifecycle types.

use super::PullRequestId;
use crate::directory::domain::UserId;
use crate::error::{DomainError, require_text};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Pull request lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PullRequestStatus {
    /// Under review; reviewers may still be swapped.
    Open,
    /// Merged. Terminal.
    Merged,
}

impl PullRequestStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Merged => "MERGED",
        }
    }
}

impl TryFrom<&str> for PullRequestStatus {
    type Error = ParsePullRequestStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_uppercase();
        match normalized.as_str() {
            "OPEN" => Ok(Self::Open),
            "MERGED" => Ok(Self::Merged),
            _ => Err(ParsePullRequestStatusError(value.to_owned())),
        }
    }
}

/// Error returned while parsing pull request statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown pull request status: {0}")]
pub struct ParsePullRequestStatusError(pub String);

/// Pull request aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    #[serde(rename = "pull_request_id")]
    id: PullRequestId,
    #[serde(rename = "pull_request_name")]
    name: String,
    #[serde(rename = "author_id")]
    author: UserId,
    status: PullRequestStatus,
    #[serde(rename = "assigned_reviewers")]
    reviewers: Vec<UserId>,
    #[serde(rename = "createdAt")]
    created_at: DateTime<Utc>,
    #[serde(
        rename = "mergedAt",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    merged_at: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedPullRequestData {
    /// Persisted identifier.
    pub id: PullRequestId,
    /// Persisted display name.
    pub name: String,
    /// Persisted author.
    pub author: UserId,
    /// Persisted lifecycle state.
    pub status: PullRequestStatus,
    /// Persisted reviewers in assignment order.
    pub reviewers: Vec<UserId>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted merge timestamp.
    pub merged_at: Option<DateTime<Utc>>,
}

/// Short projection of a pull request used in review-queue listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestSummary {
    /// Pull request identifier.
    #[serde(rename = "pull_request_id")]
    pub id: PullRequestId,
    /// Display name.
    #[serde(rename = "pull_request_name")]
    pub name: String,
    /// Author identifier.
    #[serde(rename = "author_id")]
    pub author: UserId,
    /// Lifecycle state.
    pub status: PullRequestStatus,
}

/// A reviewer's queue in listing form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewQueue {
    /// Reviewer the queue belongs to.
    pub user_id: UserId,
    /// Assigned pull requests, oldest first.
    pub pull_requests: Vec<PullRequestSummary>,
}

impl PullRequest {
    /// Opens a new pull request with its initial reviewers.
    ///
    /// `reviewers` may be shorter than the configured target; an empty set is
    /// accepted.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidField`] for a blank or oversized name,
    /// [`DomainError::AuthorAsReviewer`] when the author is among the
    /// reviewers, or [`DomainError::DuplicateReviewer`] when a reviewer is
    /// listed twice.
    pub fn open(
        id: PullRequestId,
        name: impl AsRef<str>,
        author: UserId,
        reviewers: Vec<UserId>,
        clock: &impl Clock,
    ) -> Result<Self, DomainError> {
        let display_name = require_text("pull_request_name", name.as_ref())?;
        if reviewers.contains(&author) {
            return Err(DomainError::AuthorAsReviewer(author));
        }
        if let Some(repeated) = first_duplicate(&reviewers) {
            return Err(DomainError::DuplicateReviewer(repeated));
        }

        Ok(Self {
            id,
            name: display_name,
            author,
            status: PullRequestStatus::Open,
            reviewers,
            created_at: clock.utc(),
            merged_at: None,
        })
    }

    /// Reconstructs a pull request from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedPullRequestData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            author: data.author,
            status: data.status,
            reviewers: data.reviewers,
            created_at: data.created_at,
            merged_at: data.merged_at,
        }
    }

    /// Returns the pull request identifier.
    #[must_use]
    pub const fn id(&self) -> &PullRequestId {
        &self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the author identifier.
    #[must_use]
    pub const fn author(&self) -> &UserId {
        &self.author
    }

    /// Returns the lifecycle state.
    #[must_use]
    pub const fn status(&self) -> PullRequestStatus {
        self.status
    }

    /// Returns whether the pull request has been merged.
    #[must_use]
    pub const fn is_merged(&self) -> bool {
        matches!(self.status, PullRequestStatus::Merged)
    }

    /// Returns the assigned reviewers in assignment order.
    #[must_use]
    pub fn reviewers(&self) -> &[UserId] {
        &self.reviewers
    }

    /// Returns whether `user` is currently assigned.
    #[must_use]
    pub fn has_reviewer(&self, user: &UserId) -> bool {
        self.reviewers.contains(user)
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the merge timestamp, present only once merged.
    #[must_use]
    pub const fn merged_at(&self) -> Option<DateTime<Utc>> {
        self.merged_at
    }

    /// Marks the pull request as merged.
    ///
    /// Returns `false`, leaving the record untouched, when it was already
    /// merged.
    pub fn merge(&mut self, clock: &impl Clock) -> bool {
        if self.is_merged() {
            return false;
        }
        self.status = PullRequestStatus::Merged;
        self.merged_at = Some(clock.utc());
        true
    }

    /// Swaps `old` for `new`, appending `new` after the remaining reviewers.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::PullRequestMerged`] on a merged pull request,
    /// [`DomainError::NotAssigned`] when `old` is not a reviewer,
    /// [`DomainError::AuthorAsReviewer`] when `new` is the author, or
    /// [`DomainError::DuplicateReviewer`] when `new` is `old` or already
    /// assigned.
    pub fn replace_reviewer(&mut self, old: &UserId, new: UserId) -> Result<(), DomainError> {
        if self.is_merged() {
            return Err(DomainError::PullRequestMerged(self.id.clone()));
        }
        if !self.has_reviewer(old) {
            return Err(DomainError::NotAssigned {
                pull_request: self.id.clone(),
                reviewer: old.clone(),
            });
        }
        if new == self.author {
            return Err(DomainError::AuthorAsReviewer(new));
        }
        if new == *old || self.has_reviewer(&new) {
            return Err(DomainError::DuplicateReviewer(new));
        }

        self.reviewers.retain(|reviewer| reviewer != old);
        self.reviewers.push(new);
        Ok(())
    }

    /// Returns the short listing projection.
    #[must_use]
    pub fn summary(&self) -> PullRequestSummary {
        PullRequestSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            author: self.author.clone(),
            status: self.status,
        }
    }
}

/// Orders pull requests oldest first, breaking ties by identifier bytes.
pub fn sort_oldest_first(pull_requests: &mut [PullRequest]) {
    pull_requests.sort_by(|left, right| {
        left.created_at
            .cmp(&right.created_at)
            .then_with(|| left.id.as_str().cmp(right.id.as_str()))
    });
}

fn first_duplicate(reviewers: &[UserId]) -> Option<UserId> {
    let mut seen = HashSet::with_capacity(reviewers.len());
    reviewers
        .iter()
        .find(|reviewer| !seen.insert(*reviewer))
        .cloned()
}
