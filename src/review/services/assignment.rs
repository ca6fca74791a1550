//! Reviewer-assignment engine: pull request creation, merge, reviewer
//! reassignment and review-queue lookup.
//!
//! Every call reads fresh state from the stores and writes straight back;
//! the service keeps no mutable state of its own. Concurrent calls on the
//! same pull request are last-writer-wins at the store.

use super::{ReviewServiceError, ReviewServiceResult, selection};
use crate::config::{RandomFailurePolicy, ReviewPolicy};
use crate::directory::{
    domain::{User, UserId},
    ports::DirectoryRepository,
};
use crate::error::{DomainError, require_text};
use crate::review::{
    domain::{PullRequest, PullRequestId, ReviewQueue},
    ports::{PullRequestRepository, PullRequestRepositoryError, RandomSource},
};
use mockable::Clock;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Request payload for opening a pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePullRequestRequest {
    pull_request_id: String,
    pull_request_name: String,
    author_id: String,
}

impl CreatePullRequestRequest {
    /// Creates a request.
    #[must_use]
    pub fn new(
        pull_request_id: impl Into<String>,
        pull_request_name: impl Into<String>,
        author_id: impl Into<String>,
    ) -> Self {
        Self {
            pull_request_id: pull_request_id.into(),
            pull_request_name: pull_request_name.into(),
            author_id: author_id.into(),
        }
    }
}

/// Request payload for swapping one reviewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReassignReviewerRequest {
    pull_request_id: String,
    old_reviewer_id: String,
}

impl ReassignReviewerRequest {
    /// Creates a request to replace `old_reviewer_id` on `pull_request_id`.
    #[must_use]
    pub fn new(pull_request_id: impl Into<String>, old_reviewer_id: impl Into<String>) -> Self {
        Self {
            pull_request_id: pull_request_id.into(),
            old_reviewer_id: old_reviewer_id.into(),
        }
    }
}

/// Outcome of a successful reassignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reassignment {
    /// The pull request with its updated reviewer set.
    pub pull_request: PullRequest,
    /// The reviewer that took the removed reviewer's place.
    pub replaced_by: UserId,
}

/// Reviewer-assignment orchestration service.
#[derive(Clone)]
pub struct ReviewAssignmentService<P, D, R, C>
where
    P: PullRequestRepository,
    D: DirectoryRepository,
    R: RandomSource,
    C: Clock + Send + Sync,
{
    pull_requests: Arc<P>,
    directory: Arc<D>,
    random: Arc<R>,
    clock: Arc<C>,
    policy: ReviewPolicy,
}

impl<P, D, R, C> ReviewAssignmentService<P, D, R, C>
where
    P: PullRequestRepository,
    D: DirectoryRepository,
    R: RandomSource,
    C: Clock + Send + Sync,
{
    /// Creates a new assignment service.
    #[must_use]
    pub const fn new(
        pull_requests: Arc<P>,
        directory: Arc<D>,
        random: Arc<R>,
        clock: Arc<C>,
        policy: ReviewPolicy,
    ) -> Self {
        Self {
            pull_requests,
            directory,
            random,
            clock,
            policy,
        }
    }

    /// Opens a pull request and assigns up to the policy's default number of
    /// reviewers drawn from the author's active teammates.
    ///
    /// Fewer reviewers than requested, including none, is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`super::ReviewServiceError::Domain`] with code `NOT_FOUND`
    /// for invalid input, an unknown author or an unknown author team, and
    /// with code `PR_EXISTS` when the identifier is taken, including by a
    /// concurrent create that stored first. Other store failures are
    /// returned unchanged, as is a random-source failure under
    /// [`RandomFailurePolicy::FailClosed`].
    pub async fn create_pull_request(
        &self,
        request: CreatePullRequestRequest,
    ) -> ReviewServiceResult<PullRequest> {
        let CreatePullRequestRequest {
            pull_request_id,
            pull_request_name,
            author_id,
        } = request;
        let id = PullRequestId::new(pull_request_id)?;
        let name = require_text("pull_request_name", &pull_request_name)?;
        let author = UserId::new(require_text("author_id", &author_id)?)?;

        let exists = self
            .pull_requests
            .exists(&id)
            .await
            .inspect_err(|err| {
                error!(pull_request = %id, error = %err, "pull request lookup failed");
            })?;
        if exists {
            return Err(DomainError::PullRequestExists(id).into());
        }

        let author_record = self
            .directory
            .find_user(&author)
            .await
            .inspect_err(|err| error!(user = %author, error = %err, "author lookup failed"))?
            .ok_or_else(|| DomainError::AuthorNotFound(author.clone()))?;
        let team = author_record.team();
        let team_known = self
            .directory
            .team_exists(team)
            .await
            .inspect_err(|err| error!(team = %team, error = %err, "team lookup failed"))?;
        if !team_known {
            return Err(DomainError::TeamNotFound(team.clone()).into());
        }

        let teammates = self
            .directory
            .active_users_by_team(team)
            .await
            .inspect_err(|err| error!(team = %team, error = %err, "active member lookup failed"))?;
        let candidates = candidate_ids(teammates, |user| *user.id() != author);

        let (reviewers, interrupted_by) =
            selection::select(candidates, self.policy.default_reviewers, &*self.random)
                .into_parts();
        if let Some(err) = interrupted_by
            && self.policy.random_failure == RandomFailurePolicy::FailClosed
        {
            error!(pull_request = %id, error = %err, "reviewer selection aborted");
            return Err(err.into());
        }

        let pull_request = PullRequest::open(id, name, author, reviewers, &*self.clock)?;
        self.pull_requests
            .store(&pull_request)
            .await
            .map_err(|err| match err {
                // Lost a race with a concurrent create of the same id.
                PullRequestRepositoryError::DuplicatePullRequest(taken) => {
                    ReviewServiceError::from(DomainError::PullRequestExists(taken))
                }
                other => {
                    error!(
                        pull_request = %pull_request.id(),
                        error = %other,
                        "pull request insert failed"
                    );
                    other.into()
                }
            })?;

        info!(
            pull_request = %pull_request.id(),
            author = %pull_request.author(),
            reviewers = pull_request.reviewers().len(),
            "pull request opened"
        );
        Ok(pull_request)
    }

    /// Marks a pull request as merged.
    ///
    /// Merging an already merged pull request returns it unchanged and
    /// issues no write.
    ///
    /// # Errors
    ///
    /// Returns [`super::ReviewServiceError::Domain`] with code `NOT_FOUND`
    /// for an invalid or unknown identifier. Store failures are returned
    /// unchanged.
    pub async fn merge_pull_request(
        &self,
        pull_request_id: &str,
    ) -> ReviewServiceResult<PullRequest> {
        let id = PullRequestId::new(pull_request_id)?;
        let mut pull_request = self.load(&id).await?;

        if !pull_request.merge(&*self.clock) {
            debug!(pull_request = %id, "pull request already merged");
            return Ok(pull_request);
        }

        self.pull_requests
            .update(&pull_request)
            .await
            .inspect_err(|err| {
                error!(pull_request = %id, error = %err, "pull request update failed");
            })?;
        info!(pull_request = %id, "pull request merged");
        Ok(pull_request)
    }

    /// Replaces one assigned reviewer with a randomly chosen active teammate
    /// of that reviewer.
    ///
    /// The replacement is never the author, the removed reviewer or anyone
    /// already assigned, and it is appended after the remaining reviewers.
    ///
    /// # Errors
    ///
    /// Returns [`super::ReviewServiceError::Domain`] with code `NOT_FOUND`
    /// for invalid input or an unknown pull request or reviewer, `PR_MERGED`
    /// for a merged pull request, `NOT_ASSIGNED` when the reviewer is not on
    /// it, and `NO_CANDIDATE` when nobody is eligible. Store failures are
    /// returned unchanged, as is a random-source failure that left no pick.
    pub async fn reassign_reviewer(
        &self,
        request: ReassignReviewerRequest,
    ) -> ReviewServiceResult<Reassignment> {
        let ReassignReviewerRequest {
            pull_request_id,
            old_reviewer_id,
        } = request;
        let id = PullRequestId::new(pull_request_id)?;
        let old_reviewer = UserId::new(require_text("old_user_id", &old_reviewer_id)?)?;

        let mut pull_request = self.load(&id).await?;
        if pull_request.is_merged() {
            return Err(DomainError::PullRequestMerged(id).into());
        }
        if !pull_request.has_reviewer(&old_reviewer) {
            return Err(DomainError::NotAssigned {
                pull_request: id,
                reviewer: old_reviewer,
            }
            .into());
        }

        let old_record = self
            .directory
            .find_user(&old_reviewer)
            .await
            .inspect_err(|err| {
                error!(user = %old_reviewer, error = %err, "reviewer lookup failed");
            })?
            .ok_or_else(|| DomainError::UserNotFound(old_reviewer.clone()))?;
        let teammates = self
            .directory
            .active_users_by_team(old_record.team())
            .await
            .inspect_err(|err| {
                error!(team = %old_record.team(), error = %err, "active member lookup failed");
            })?;
        let candidates = candidate_ids(teammates, |user| {
            *user.id() != old_reviewer
                && user.id() != pull_request.author()
                && !pull_request.has_reviewer(user.id())
        });
        if candidates.is_empty() {
            return Err(DomainError::NoCandidate(id).into());
        }

        let draws = self.policy.replacement_reviewers.max(1);
        let (picks, interrupted_by) =
            selection::select(candidates, draws, &*self.random).into_parts();
        let Some(replacement) = picks.into_iter().next() else {
            return Err(match interrupted_by {
                Some(err) => {
                    error!(pull_request = %id, error = %err, "replacement selection failed");
                    err.into()
                }
                None => DomainError::NoCandidate(id).into(),
            });
        };

        pull_request.replace_reviewer(&old_reviewer, replacement.clone())?;
        self.pull_requests
            .update(&pull_request)
            .await
            .inspect_err(|err| {
                error!(pull_request = %id, error = %err, "pull request update failed");
            })?;

        info!(
            pull_request = %id,
            removed = %old_reviewer,
            added = %replacement,
            "reviewer reassigned"
        );
        Ok(Reassignment {
            pull_request,
            replaced_by: replacement,
        })
    }

    /// Lists every pull request on which `user_id` is currently a reviewer,
    /// merged ones included, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`super::ReviewServiceError::Domain`] with code `NOT_FOUND`
    /// for an invalid or unknown user. Store failures are returned
    /// unchanged.
    pub async fn review_queue(&self, user_id: &str) -> ReviewServiceResult<Vec<PullRequest>> {
        let reviewer = UserId::new(user_id)?;
        let known = self
            .directory
            .find_user(&reviewer)
            .await
            .inspect_err(|err| error!(user = %reviewer, error = %err, "reviewer lookup failed"))?;
        if known.is_none() {
            return Err(DomainError::UserNotFound(reviewer).into());
        }

        let queue = self
            .pull_requests
            .find_by_reviewer(&reviewer)
            .await
            .inspect_err(|err| {
                error!(user = %reviewer, error = %err, "review queue lookup failed");
            })?;
        Ok(queue)
    }

    /// Returns the review queue of `user_id` as short summaries.
    ///
    /// # Errors
    ///
    /// Same as [`Self::review_queue`].
    pub async fn review_queue_summary(&self, user_id: &str) -> ReviewServiceResult<ReviewQueue> {
        let queue = self.review_queue(user_id).await?;
        Ok(ReviewQueue {
            user_id: UserId::new(user_id)?,
            pull_requests: queue.iter().map(PullRequest::summary).collect(),
        })
    }

    async fn load(&self, id: &PullRequestId) -> ReviewServiceResult<PullRequest> {
        let found = self
            .pull_requests
            .find_by_id(id)
            .await
            .inspect_err(|err| {
                error!(pull_request = %id, error = %err, "pull request lookup failed");
            })?;
        found.ok_or_else(|| DomainError::PullRequestNotFound(id.clone()).into())
    }
}

/// Identifiers of `users` that pass `eligible`, in store order.
fn candidate_ids(users: Vec<User>, eligible: impl Fn(&User) -> bool) -> Vec<UserId> {
    users
        .into_iter()
        .filter(|user| eligible(user))
        .map(|user| user.id().clone())
        .collect()
}
