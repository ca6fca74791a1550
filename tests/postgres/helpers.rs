//! Shared test helpers for `PostgreSQL` integration tests.
//!
//! Each test clones a fresh database from a template that already carries
//! the schema, so tests never see each other's rows.

use std::sync::Mutex;

use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use mockable::Clock;
pub use pg_embedded_setup_unpriv::{TestCluster, test_support::shared_test_cluster};
use rota::{
    directory::{
        adapters::postgres::PostgresDirectory,
        domain::{TeamName, User, UserId},
        ports::DirectoryRepository,
    },
    persistence::PgPool,
    review::adapters::postgres::PostgresPullRequestRepository,
};
use tokio::runtime::Runtime;

/// SQL creating the review schema.
const CREATE_SCHEMA_SQL: &str =
    include_str!("../../migrations/2026-03-01-000000_create_review_schema/up.sql");

/// Template database name for the pre-migrated schema.
const TEMPLATE_DB: &str = "rota_test_template";

/// Creates a tokio runtime for driving the async adapters from sync tests.
pub fn test_runtime() -> Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("failed to create test runtime")
}

/// Ensures the template database exists with the schema applied.
fn ensure_template(cluster: &TestCluster) -> eyre::Result<()> {
    cluster
        .ensure_template_exists(TEMPLATE_DB, |db_name| {
            let url = cluster.connection().database_url(db_name);
            let mut conn = PgConnection::establish(&url).map_err(|e| eyre::eyre!("{e}"))?;
            conn.batch_execute(CREATE_SCHEMA_SQL)
                .map_err(|e| eyre::eyre!("schema setup failed: {e}"))?;
            Ok(())
        })
        .map_err(|e| eyre::eyre!("template setup failed: {e}"))
}

/// Drops the per-test database even when the test panics.
pub struct CleanupGuard {
    cluster: &'static TestCluster,
    db_name: String,
}

impl Drop for CleanupGuard {
    fn drop(&mut self) {
        if let Err(err) = self.cluster.drop_database(self.db_name.as_str()) {
            tracing::warn!(database = %self.db_name, error = %err, "test database left behind");
        }
    }
}

/// Adapters bound to one fresh database.
pub struct PostgresContext {
    pub pull_requests: PostgresPullRequestRepository,
    pub directory: PostgresDirectory,
    pub rt: Runtime,
    _guard: CleanupGuard,
}

/// Clones a fresh database from the template and wires both adapters to it.
///
/// # Errors
///
/// Returns an error if template creation, database cloning or pool
/// construction fails.
pub fn prepare(cluster: &'static TestCluster, prefix: &str) -> eyre::Result<PostgresContext> {
    ensure_template(cluster)?;
    let db_name = format!("{prefix}_{}", uuid::Uuid::new_v4().simple());
    cluster
        .create_database_from_template(db_name.as_str(), TEMPLATE_DB)
        .map_err(|e| eyre::eyre!("create database from template: {e}"))?;
    let guard = CleanupGuard {
        cluster,
        db_name: db_name.clone(),
    };

    let url = cluster.connection().database_url(&db_name);
    let pool: PgPool = Pool::builder()
        .max_size(2)
        .build(ConnectionManager::<PgConnection>::new(url))?;
    Ok(PostgresContext {
        pull_requests: PostgresPullRequestRepository::new(pool.clone()),
        directory: PostgresDirectory::new(pool),
        rt: test_runtime(),
        _guard: guard,
    })
}

/// Clock pinned to a whole-second instant so stored timestamps compare equal.
pub struct TestClock(Mutex<DateTime<Utc>>);

impl TestClock {
    pub fn pinned() -> Self {
        let start = Utc
            .with_ymd_and_hms(2026, 3, 2, 9, 0, 0)
            .single()
            .expect("valid fixture timestamp");
        Self(Mutex::new(start))
    }

    pub fn advance_minutes(&self, minutes: i64) {
        *self.0.lock().expect("clock mutex") += TimeDelta::minutes(minutes);
    }
}

impl Clock for TestClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.0.lock().expect("clock mutex")
    }
}

pub fn user_id(value: &str) -> UserId {
    UserId::new(value).expect("valid user id")
}

pub fn user_ids(values: &[&str]) -> Vec<UserId> {
    values.iter().map(|value| user_id(value)).collect()
}

pub fn member(id: &str, team: &str, is_active: bool) -> User {
    User::new(
        user_id(id),
        id.to_uppercase(),
        TeamName::new(team).expect("valid team name"),
        is_active,
    )
    .expect("valid user")
}

/// Upserts active users so pull request rows satisfy their foreign keys.
///
/// # Errors
///
/// Returns an error if any upsert fails.
pub fn seed_users(context: &PostgresContext, team: &str, ids: &[&str]) -> eyre::Result<()> {
    for id in ids {
        context
            .rt
            .block_on(context.directory.create_or_update_user(&member(id, team, true)))?;
    }
    Ok(())
}
