//! `PostgreSQL` repository implementation for pull requests and their
//! reviewer sets.

use super::{
    models::{AssignedReviewerRow, PullRequestRow},
    schema::{assigned_reviewers, pull_requests},
};
use crate::directory::domain::UserId;
use crate::persistence::PgPool;
use crate::review::{
    domain::{
        PersistedPullRequestData, PullRequest, PullRequestId, PullRequestStatus,
        sort_oldest_first,
    },
    ports::{PullRequestRepository, PullRequestRepositoryError, PullRequestRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use std::collections::HashMap;

/// `PostgreSQL`-backed pull request repository.
#[derive(Debug, Clone)]
pub struct PostgresPullRequestRepository {
    pool: PgPool,
}

impl PostgresPullRequestRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> PullRequestRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> PullRequestRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(PullRequestRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(PullRequestRepositoryError::persistence)?
    }
}

impl From<DieselError> for PullRequestRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

#[async_trait]
impl PullRequestRepository for PostgresPullRequestRepository {
    async fn exists(&self, id: &PullRequestId) -> PullRequestRepositoryResult<bool> {
        let lookup = id.clone();
        self.run_blocking(move |connection| {
            diesel::select(diesel::dsl::exists(
                pull_requests::table.find(lookup.as_str()),
            ))
            .get_result::<bool>(connection)
            .map_err(PullRequestRepositoryError::persistence)
        })
        .await
    }

    async fn find_by_id(
        &self,
        id: &PullRequestId,
    ) -> PullRequestRepositoryResult<Option<PullRequest>> {
        let lookup = id.clone();
        self.run_blocking(move |connection| {
            let row = pull_requests::table
                .find(lookup.as_str())
                .select(PullRequestRow::as_select())
                .first::<PullRequestRow>(connection)
                .optional()?;
            let Some(found) = row else {
                return Ok(None);
            };
            let reviewers = assigned_reviewers::table
                .filter(assigned_reviewers::pull_request_id.eq(lookup.as_str()))
                .order(assigned_reviewers::position.asc())
                .select(assigned_reviewers::reviewer_id)
                .load::<String>(connection)?;
            row_to_pull_request(found, reviewers).map(Some)
        })
        .await
    }

    async fn store(&self, pull_request: &PullRequest) -> PullRequestRepositoryResult<()> {
        let id = pull_request.id().clone();
        let row = to_row(pull_request);
        let reviewer_rows = to_reviewer_rows(pull_request)?;
        self.run_blocking(move |connection| {
            connection.transaction::<_, PullRequestRepositoryError, _>(|tx| {
                diesel::insert_into(pull_requests::table)
                    .values(&row)
                    .execute(tx)
                    .map_err(|err| match err {
                        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                            PullRequestRepositoryError::DuplicatePullRequest(id.clone())
                        }
                        _ => PullRequestRepositoryError::persistence(err),
                    })?;
                insert_reviewers(tx, &reviewer_rows)
            })
        })
        .await
    }

    async fn update(&self, pull_request: &PullRequest) -> PullRequestRepositoryResult<()> {
        let id = pull_request.id().clone();
        let row = to_row(pull_request);
        let reviewer_rows = to_reviewer_rows(pull_request)?;
        self.run_blocking(move |connection| {
            connection.transaction::<_, PullRequestRepositoryError, _>(|tx| {
                let updated = diesel::update(pull_requests::table.find(id.as_str()))
                    .set((
                        pull_requests::pull_request_name.eq(&row.pull_request_name),
                        pull_requests::author_id.eq(&row.author_id),
                        pull_requests::status.eq(&row.status),
                        pull_requests::merged_at.eq(row.merged_at),
                    ))
                    .execute(tx)?;
                if updated == 0 {
                    return Err(PullRequestRepositoryError::NotFound(id.clone()));
                }
                diesel::delete(
                    assigned_reviewers::table
                        .filter(assigned_reviewers::pull_request_id.eq(id.as_str())),
                )
                .execute(tx)?;
                insert_reviewers(tx, &reviewer_rows)
            })
        })
        .await
    }

    async fn find_by_reviewer(
        &self,
        reviewer: &UserId,
    ) -> PullRequestRepositoryResult<Vec<PullRequest>> {
        let lookup = reviewer.clone();
        self.run_blocking(move |connection| {
            let ids = assigned_reviewers::table
                .filter(assigned_reviewers::reviewer_id.eq(lookup.as_str()))
                .select(assigned_reviewers::pull_request_id)
                .load::<String>(connection)?;
            if ids.is_empty() {
                return Ok(Vec::new());
            }

            let rows = pull_requests::table
                .filter(pull_requests::pull_request_id.eq_any(&ids))
                .order(pull_requests::created_at.asc())
                .select(PullRequestRow::as_select())
                .load::<PullRequestRow>(connection)?;
            let assignments = assigned_reviewers::table
                .filter(assigned_reviewers::pull_request_id.eq_any(&ids))
                .order((
                    assigned_reviewers::pull_request_id.asc(),
                    assigned_reviewers::position.asc(),
                ))
                .select(AssignedReviewerRow::as_select())
                .load::<AssignedReviewerRow>(connection)?;

            let mut reviewers_by_pull_request: HashMap<String, Vec<String>> = HashMap::new();
            for assignment in assignments {
                reviewers_by_pull_request
                    .entry(assignment.pull_request_id)
                    .or_default()
                    .push(assignment.reviewer_id);
            }
            let mut queue = rows
                .into_iter()
                .map(|row| {
                    let reviewers = reviewers_by_pull_request
                        .remove(&row.pull_request_id)
                        .unwrap_or_default();
                    row_to_pull_request(row, reviewers)
                })
                .collect::<PullRequestRepositoryResult<Vec<_>>>()?;
            sort_oldest_first(&mut queue);
            Ok(queue)
        })
        .await
    }
}

fn insert_reviewers(
    connection: &mut PgConnection,
    rows: &[AssignedReviewerRow],
) -> PullRequestRepositoryResult<()> {
    if rows.is_empty() {
        return Ok(());
    }
    diesel::insert_into(assigned_reviewers::table)
        .values(rows)
        .execute(connection)?;
    Ok(())
}

fn to_row(pull_request: &PullRequest) -> PullRequestRow {
    PullRequestRow {
        pull_request_id: pull_request.id().as_str().to_owned(),
        pull_request_name: pull_request.name().to_owned(),
        author_id: pull_request.author().as_str().to_owned(),
        status: pull_request.status().as_str().to_owned(),
        created_at: pull_request.created_at(),
        merged_at: pull_request.merged_at(),
    }
}

fn to_reviewer_rows(
    pull_request: &PullRequest,
) -> PullRequestRepositoryResult<Vec<AssignedReviewerRow>> {
    pull_request
        .reviewers()
        .iter()
        .enumerate()
        .map(|(position, reviewer)| {
            Ok(AssignedReviewerRow {
                pull_request_id: pull_request.id().as_str().to_owned(),
                reviewer_id: reviewer.as_str().to_owned(),
                position: i32::try_from(position)
                    .map_err(PullRequestRepositoryError::persistence)?,
            })
        })
        .collect()
}

fn row_to_pull_request(
    row: PullRequestRow,
    reviewer_ids: Vec<String>,
) -> PullRequestRepositoryResult<PullRequest> {
    let PullRequestRow {
        pull_request_id,
        pull_request_name,
        author_id,
        status: persisted_status,
        created_at,
        merged_at,
    } = row;

    let id = PullRequestId::new(pull_request_id)
        .map_err(PullRequestRepositoryError::invalid_persisted_data)?;
    let author =
        UserId::new(author_id).map_err(PullRequestRepositoryError::invalid_persisted_data)?;
    let status = PullRequestStatus::try_from(persisted_status.as_str())
        .map_err(PullRequestRepositoryError::invalid_persisted_data)?;
    let reviewers = reviewer_ids
        .into_iter()
        .map(UserId::new)
        .collect::<Result<Vec<_>, _>>()
        .map_err(PullRequestRepositoryError::invalid_persisted_data)?;

    Ok(PullRequest::from_persisted(PersistedPullRequestData {
        id,
        name: pull_request_name,
        author,
        status,
        reviewers,
        created_at,
        merged_at,
    }))
}
