//! Diesel row models for pull request persistence.

use super::schema::{assigned_reviewers, pull_requests};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Row shape for pull request records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = pull_requests)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PullRequestRow {
    /// Caller-supplied identifier.
    pub pull_request_id: String,
    /// Display name.
    pub pull_request_name: String,
    /// Author user identifier.
    pub author_id: String,
    /// Lifecycle status.
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Merge timestamp.
    pub merged_at: Option<DateTime<Utc>>,
}

/// Row shape for reviewer assignments.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = assigned_reviewers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AssignedReviewerRow {
    /// Owning pull request.
    pub pull_request_id: String,
    /// Assigned reviewer.
    pub reviewer_id: String,
    /// Zero-based assignment order.
    pub position: i32,
}
