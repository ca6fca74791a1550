//! Port contracts for pull request storage and randomness.

pub mod random;
pub mod repository;

pub use random::{RandomSource, RandomSourceError};
#[cfg(test)]
pub use repository::MockPullRequestRepository;
pub use repository::{
    PullRequestRepository, PullRequestRepositoryError, PullRequestRepositoryResult,
};
