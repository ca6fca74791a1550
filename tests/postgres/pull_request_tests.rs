//! Pull request persistence against a real `PostgreSQL` database.

use crate::postgres::helpers::{
    PostgresContext, TestClock, TestCluster, prepare, seed_users, shared_test_cluster, user_id,
    user_ids,
};
use mockable::Clock;
use rota::review::{
    domain::{PullRequest, PullRequestId, PullRequestStatus},
    ports::{PullRequestRepository, PullRequestRepositoryError},
};
use rstest::{fixture, rstest};

#[fixture]
fn context(shared_test_cluster: &'static TestCluster) -> PostgresContext {
    let context = prepare(shared_test_cluster, "test_pull_requests").expect("database setup");
    seed_users(&context, "core", &["a1", "r1", "r2", "r3"]).expect("users seeded");
    context
}

fn open(id: &str, reviewers: &[&str], clock: &TestClock) -> PullRequest {
    PullRequest::open(
        PullRequestId::new(id).expect("valid id"),
        format!("Change {id}"),
        user_id("a1"),
        user_ids(reviewers),
        clock,
    )
    .expect("valid pull request")
}

fn ids(pull_requests: &[PullRequest]) -> Vec<&str> {
    pull_requests.iter().map(|pr| pr.id().as_str()).collect()
}

#[rstest]
fn stored_pull_request_round_trips_with_reviewer_order(context: PostgresContext) {
    let pull_request = open("pr-1", &["r3", "r1"], &TestClock::pinned());

    context
        .rt
        .block_on(context.pull_requests.store(&pull_request))
        .expect("store should succeed");

    let exists = context
        .rt
        .block_on(context.pull_requests.exists(pull_request.id()))
        .expect("exists should succeed");
    let found = context
        .rt
        .block_on(context.pull_requests.find_by_id(pull_request.id()))
        .expect("find_by_id should succeed");

    assert!(exists);
    assert_eq!(found, Some(pull_request));
}

#[rstest]
fn find_by_id_returns_none_for_missing(context: PostgresContext) {
    let missing = PullRequestId::new("pr-missing").expect("valid id");

    let found = context
        .rt
        .block_on(context.pull_requests.find_by_id(&missing))
        .expect("query ok");

    assert!(found.is_none());
}

#[rstest]
fn store_maps_unique_violation_to_duplicate(context: PostgresContext) {
    let clock = TestClock::pinned();
    context
        .rt
        .block_on(context.pull_requests.store(&open("pr-1", &["r1"], &clock)))
        .expect("first store");

    let result = context
        .rt
        .block_on(context.pull_requests.store(&open("pr-1", &["r2"], &clock)));

    assert!(
        matches!(
            &result,
            Err(PullRequestRepositoryError::DuplicatePullRequest(id)) if id.as_str() == "pr-1"
        ),
        "expected DuplicatePullRequest, got: {result:?}"
    );
    let first_id = PullRequestId::new("pr-1").expect("valid id");
    let kept = context
        .rt
        .block_on(context.pull_requests.find_by_id(&first_id))
        .expect("query ok")
        .expect("first pull request kept");
    assert_eq!(kept.reviewers(), user_ids(&["r1"]).as_slice());
}

#[rstest]
fn update_replaces_reviewers_and_records_merge(context: PostgresContext) {
    let clock = TestClock::pinned();
    let mut pull_request = open("pr-1", &["r1", "r2"], &clock);
    context
        .rt
        .block_on(context.pull_requests.store(&pull_request))
        .expect("store");

    pull_request
        .replace_reviewer(&user_id("r1"), user_id("r3"))
        .expect("replacement allowed");
    clock.advance_minutes(30);
    assert!(pull_request.merge(&clock));
    context
        .rt
        .block_on(context.pull_requests.update(&pull_request))
        .expect("update");

    let found = context
        .rt
        .block_on(context.pull_requests.find_by_id(pull_request.id()))
        .expect("query ok")
        .expect("pull request exists");
    assert_eq!(found.reviewers(), user_ids(&["r2", "r3"]).as_slice());
    assert_eq!(found.status(), PullRequestStatus::Merged);
    assert_eq!(found.merged_at(), Some(clock.utc()));

    let old_queue = context
        .rt
        .block_on(context.pull_requests.find_by_reviewer(&user_id("r1")))
        .expect("queue");
    assert!(old_queue.is_empty());
}

#[rstest]
fn update_of_unknown_pull_request_is_not_found(context: PostgresContext) {
    let pull_request = open("pr-ghost", &["r1"], &TestClock::pinned());

    let result = context
        .rt
        .block_on(context.pull_requests.update(&pull_request));

    assert!(
        matches!(
            &result,
            Err(PullRequestRepositoryError::NotFound(id)) if id.as_str() == "pr-ghost"
        ),
        "expected NotFound, got: {result:?}"
    );
}

#[rstest]
fn reviewer_queue_lists_oldest_first_then_by_identifier(context: PostgresContext) {
    let clock = TestClock::pinned();
    let older_b = open("pr-b", &["r1"], &clock);
    let older_a = open("pr-a", &["r1", "r2"], &clock);
    clock.advance_minutes(5);
    let newer = open("pr-0", &["r1"], &clock);
    let unrelated = open("pr-x", &["r2"], &clock);
    for pull_request in [&newer, &older_b, &unrelated, &older_a] {
        context
            .rt
            .block_on(context.pull_requests.store(pull_request))
            .expect("store");
    }

    let queue = context
        .rt
        .block_on(context.pull_requests.find_by_reviewer(&user_id("r1")))
        .expect("queue");

    assert_eq!(ids(&queue), vec!["pr-a", "pr-b", "pr-0"]);
    assert_eq!(
        queue.first().map(PullRequest::reviewers),
        Some(user_ids(&["r1", "r2"]).as_slice())
    );
}

#[rstest]
fn padded_identifiers_stay_distinct_rows(context: PostgresContext) {
    let clock = TestClock::pinned();
    for id in ["pr-1", "pr-1 "] {
        context
            .rt
            .block_on(context.pull_requests.store(&open(id, &["r1"], &clock)))
            .expect("both identifiers store");
    }

    let queue = context
        .rt
        .block_on(context.pull_requests.find_by_reviewer(&user_id("r1")))
        .expect("queue");

    assert_eq!(ids(&queue), vec!["pr-1", "pr-1 "]);
}
