//! In-memory adapters for the review context.

mod pull_request;

pub use pull_request::InMemoryPullRequestRepository;
