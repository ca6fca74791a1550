//! Domain model for pull requests and their reviewer sets.
//!
//! The aggregate owns the lifecycle rules (Open → Merged, never reversed)
//! and the reviewer-set invariants; selection and persistence stay outside.

mod ids;
mod pull_request;

pub use ids::PullRequestId;
pub use pull_request::{
    ParsePullRequestStatusError, PersistedPullRequestData, PullRequest, PullRequestStatus,
    PullRequestSummary, ReviewQueue, sort_oldest_first,
};
