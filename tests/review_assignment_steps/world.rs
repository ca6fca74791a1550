//! Shared world state for reviewer assignment BDD scenarios.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use mockable::DefaultClock;
use rota::{
    config::ReviewPolicy,
    directory::{
        adapters::memory::InMemoryDirectory,
        domain::UserId,
        services::{TeamService, UserService},
    },
    review::{
        adapters::{memory::InMemoryPullRequestRepository, random::OsRandomSource},
        domain::PullRequest,
        services::{ReviewAssignmentService, ReviewServiceError},
    },
};
use rstest::fixture;

/// Service type used by the BDD world.
pub type TestReviewService = ReviewAssignmentService<
    InMemoryPullRequestRepository,
    InMemoryDirectory,
    OsRandomSource,
    DefaultClock,
>;

/// Scenario world for reviewer assignment behaviour tests.
pub struct ReviewWorld {
    pub teams: TeamService<InMemoryDirectory>,
    pub users: UserService<InMemoryDirectory>,
    pub service: TestReviewService,
    pub pull_requests: Arc<InMemoryPullRequestRepository>,
    pub clock: Arc<DefaultClock>,
    pub last_pull_request: Option<PullRequest>,
    pub first_merged_at: Option<DateTime<Utc>>,
    pub last_replacement: Option<UserId>,
    pub last_queue: Option<Vec<PullRequest>>,
    pub last_error: Option<ReviewServiceError>,
}

impl ReviewWorld {
    /// Creates a world with empty stores and the default policy.
    #[must_use]
    pub fn new() -> Self {
        let directory = Arc::new(InMemoryDirectory::new());
        let pull_requests = Arc::new(InMemoryPullRequestRepository::new());
        let clock = Arc::new(DefaultClock);
        let policy = ReviewPolicy::default();
        Self {
            teams: TeamService::new(Arc::clone(&directory), policy),
            users: UserService::new(Arc::clone(&directory)),
            service: ReviewAssignmentService::new(
                Arc::clone(&pull_requests),
                directory,
                Arc::new(OsRandomSource::new()),
                Arc::clone(&clock),
                policy,
            ),
            pull_requests,
            clock,
            last_pull_request: None,
            first_merged_at: None,
            last_replacement: None,
            last_queue: None,
            last_error: None,
        }
    }

    /// Records the outcome of a service call that yields a pull request.
    pub fn record(&mut self, result: Result<PullRequest, ReviewServiceError>) {
        match result {
            Ok(pull_request) => self.last_pull_request = Some(pull_request),
            Err(err) => self.last_error = Some(err),
        }
    }
}

impl Default for ReviewWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> ReviewWorld {
    ReviewWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Splits a comma-separated step argument into trimmed entries.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_owned)
        .collect()
}
