//! End-to-end reviewer assignment flows.

use super::helpers::{Stack, seed_team, stack};
use rota::{
    directory::{
        domain::UserId,
        services::{AddTeamRequest, TeamMemberRequest},
    },
    error::ErrorCode,
    review::{
        domain::PullRequest,
        services::{CreatePullRequestRequest, ReassignReviewerRequest},
    },
};
use rstest::rstest;
use std::collections::HashSet;

fn reviewer_set(pull_request: &PullRequest) -> HashSet<&str> {
    pull_request.reviewers().iter().map(UserId::as_str).collect()
}

fn set<'a>(values: &[&'a str]) -> HashSet<&'a str> {
    values.iter().copied().collect()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn pull_request_lifecycle(stack: Stack) -> eyre::Result<()> {
    seed_team(&stack, "core", &["a1", "r1", "r2", "r3"]).await?;

    let opened = stack
        .reviews
        .create_pull_request(CreatePullRequestRequest::new("p1", "Add search", "a1"))
        .await?;
    let assigned = reviewer_set(&opened);
    assert_eq!(assigned.len(), 2);
    assert!(assigned.is_subset(&set(&["r1", "r2", "r3"])));

    let leaving = opened
        .reviewers()
        .first()
        .ok_or_else(|| eyre::eyre!("no reviewer assigned"))?
        .clone();
    let staying = opened
        .reviewers()
        .get(1)
        .ok_or_else(|| eyre::eyre!("second reviewer missing"))?
        .clone();
    let reassignment = stack
        .reviews
        .reassign_reviewer(ReassignReviewerRequest::new("p1", leaving.as_str()))
        .await?;
    let reviewers = reassignment.pull_request.reviewers();
    assert_eq!(reviewers, [staying.clone(), reassignment.replaced_by.clone()]);
    assert_ne!(reassignment.replaced_by, leaving);

    let left_queue = stack.reviews.review_queue(leaving.as_str()).await?;
    assert!(left_queue.is_empty());
    let new_queue = stack
        .reviews
        .review_queue(reassignment.replaced_by.as_str())
        .await?;
    assert_eq!(new_queue.len(), 1);

    let merged = stack.reviews.merge_pull_request("p1").await?;
    let merged_again = stack.reviews.merge_pull_request("p1").await?;
    assert_eq!(merged, merged_again);

    let err = stack
        .reviews
        .reassign_reviewer(ReassignReviewerRequest::new("p1", staying.as_str()))
        .await
        .err()
        .ok_or_else(|| eyre::eyre!("reassignment after merge succeeded"))?;
    assert_eq!(err.domain_code(), Some(ErrorCode::PrMerged));

    let queue = stack.reviews.review_queue(staying.as_str()).await?;
    assert!(queue.iter().all(PullRequest::is_merged));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deactivated_reviewer_keeps_assignment_but_is_not_drawn_again(
    stack: Stack,
) -> eyre::Result<()> {
    seed_team(&stack, "core", &["a1", "r1"]).await?;
    let first = stack
        .reviews
        .create_pull_request(CreatePullRequestRequest::new("p1", "First", "a1"))
        .await?;
    assert_eq!(reviewer_set(&first), set(&["r1"]));

    stack.users.set_is_active("r1", false).await?;

    let queue = stack.reviews.review_queue("r1").await?;
    assert_eq!(queue.len(), 1);
    let second = stack
        .reviews
        .create_pull_request(CreatePullRequestRequest::new("p2", "Second", "a1"))
        .await?;
    assert!(second.reviewers().is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn replacement_comes_from_the_reviewers_current_team(stack: Stack) -> eyre::Result<()> {
    seed_team(&stack, "core", &["a1", "r1", "r2"]).await?;
    let opened = stack
        .reviews
        .create_pull_request(CreatePullRequestRequest::new("p1", "Add search", "a1"))
        .await?;
    assert_eq!(reviewer_set(&opened), set(&["r1", "r2"]));

    stack
        .teams
        .add_team(
            AddTeamRequest::new("platform")
                .with_member(TeamMemberRequest::new("r1", "R1", true))
                .with_member(TeamMemberRequest::new("x1", "X1", true)),
        )
        .await?;

    let reassignment = stack
        .reviews
        .reassign_reviewer(ReassignReviewerRequest::new("p1", "r1"))
        .await?;
    assert_eq!(reassignment.replaced_by.as_str(), "x1");
    assert_eq!(reviewer_set(&reassignment.pull_request), set(&["r2", "x1"]));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failures_carry_their_codes(stack: Stack) -> eyre::Result<()> {
    seed_team(&stack, "core", &["a1", "r1"]).await?;
    stack
        .reviews
        .create_pull_request(CreatePullRequestRequest::new("p1", "Add search", "a1"))
        .await?;

    let duplicate = stack
        .reviews
        .create_pull_request(CreatePullRequestRequest::new("p1", "Again", "a1"))
        .await;
    let not_assigned = stack
        .reviews
        .reassign_reviewer(ReassignReviewerRequest::new("p1", "a1"))
        .await;
    let no_candidate = stack
        .reviews
        .reassign_reviewer(ReassignReviewerRequest::new("p1", "r1"))
        .await;
    let team_taken = seed_team(&stack, "core", &["z1"]).await;

    assert_eq!(
        duplicate.err().and_then(|err| err.domain_code()),
        Some(ErrorCode::PrExists)
    );
    assert_eq!(
        not_assigned.err().and_then(|err| err.domain_code()),
        Some(ErrorCode::NotAssigned)
    );
    assert_eq!(
        no_candidate.err().and_then(|err| err.domain_code()),
        Some(ErrorCode::NoCandidate)
    );
    assert!(team_taken.is_err());
    Ok(())
}
