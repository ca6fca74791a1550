//! In-memory pull request repository for tests and single-process embedding.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::directory::domain::UserId;
use crate::review::{
    domain::{PullRequest, PullRequestId, sort_oldest_first},
    ports::{PullRequestRepository, PullRequestRepositoryError, PullRequestRepositoryResult},
};

/// Thread-safe in-memory pull request repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPullRequestRepository {
    state: Arc<RwLock<InMemoryPullRequestState>>,
}

#[derive(Debug, Default)]
struct InMemoryPullRequestState {
    pull_requests: HashMap<PullRequestId, PullRequest>,
    // Pull request ids per reviewer, in assignment order.
    reviewer_index: HashMap<UserId, Vec<PullRequestId>>,
}

impl InMemoryPullRequestRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(
        &self,
    ) -> PullRequestRepositoryResult<RwLockReadGuard<'_, InMemoryPullRequestState>> {
        self.state.read().map_err(|err| {
            PullRequestRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(
        &self,
    ) -> PullRequestRepositoryResult<RwLockWriteGuard<'_, InMemoryPullRequestState>> {
        self.state.write().map_err(|err| {
            PullRequestRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

/// Removes a pull request from a reviewer's entry, dropping the entry if empty.
fn unindex_reviewer(
    index: &mut HashMap<UserId, Vec<PullRequestId>>,
    reviewer: &UserId,
    pull_request: &PullRequestId,
) {
    if let Some(ids) = index.get_mut(reviewer) {
        ids.retain(|id| id != pull_request);
        if ids.is_empty() {
            index.remove(reviewer);
        }
    }
}

fn index_reviewers(index: &mut HashMap<UserId, Vec<PullRequestId>>, pull_request: &PullRequest) {
    for reviewer in pull_request.reviewers() {
        let ids = index.entry(reviewer.clone()).or_default();
        if !ids.contains(pull_request.id()) {
            ids.push(pull_request.id().clone());
        }
    }
}

#[async_trait]
impl PullRequestRepository for InMemoryPullRequestRepository {
    async fn exists(&self, id: &PullRequestId) -> PullRequestRepositoryResult<bool> {
        Ok(self.read()?.pull_requests.contains_key(id))
    }

    async fn find_by_id(
        &self,
        id: &PullRequestId,
    ) -> PullRequestRepositoryResult<Option<PullRequest>> {
        Ok(self.read()?.pull_requests.get(id).cloned())
    }

    async fn store(&self, pull_request: &PullRequest) -> PullRequestRepositoryResult<()> {
        let mut state = self.write()?;
        if state.pull_requests.contains_key(pull_request.id()) {
            return Err(PullRequestRepositoryError::DuplicatePullRequest(
                pull_request.id().clone(),
            ));
        }
        index_reviewers(&mut state.reviewer_index, pull_request);
        state
            .pull_requests
            .insert(pull_request.id().clone(), pull_request.clone());
        Ok(())
    }

    async fn update(&self, pull_request: &PullRequest) -> PullRequestRepositoryResult<()> {
        let mut state = self.write()?;
        let previous_reviewers = state
            .pull_requests
            .get(pull_request.id())
            .ok_or_else(|| PullRequestRepositoryError::NotFound(pull_request.id().clone()))?
            .reviewers()
            .to_vec();

        for reviewer in previous_reviewers
            .iter()
            .filter(|reviewer| !pull_request.has_reviewer(reviewer))
        {
            unindex_reviewer(&mut state.reviewer_index, reviewer, pull_request.id());
        }
        index_reviewers(&mut state.reviewer_index, pull_request);
        state
            .pull_requests
            .insert(pull_request.id().clone(), pull_request.clone());
        Ok(())
    }

    async fn find_by_reviewer(
        &self,
        reviewer: &UserId,
    ) -> PullRequestRepositoryResult<Vec<PullRequest>> {
        let state = self.read()?;
        let mut queue: Vec<PullRequest> = state
            .reviewer_index
            .get(reviewer)
            .into_iter()
            .flatten()
            .filter_map(|id| state.pull_requests.get(id).cloned())
            .collect();
        sort_oldest_first(&mut queue);
        Ok(queue)
    }
}
