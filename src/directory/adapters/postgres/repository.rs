//! `PostgreSQL` repository implementation for teams and users.

use super::{
    models::UserRow,
    schema::{teams, users},
};
use crate::directory::{
    domain::{Team, TeamName, User, UserId},
    ports::{DirectoryRepository, DirectoryRepositoryError, DirectoryRepositoryResult},
};
use crate::persistence::PgPool;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::upsert::excluded;

/// `PostgreSQL`-backed directory.
#[derive(Debug, Clone)]
pub struct PostgresDirectory {
    pool: PgPool,
}

impl PostgresDirectory {
    /// Creates a new directory from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> DirectoryRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> DirectoryRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(DirectoryRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(DirectoryRepositoryError::persistence)?
    }
}

#[async_trait]
impl DirectoryRepository for PostgresDirectory {
    async fn find_user(&self, id: &UserId) -> DirectoryRepositoryResult<Option<User>> {
        let lookup = id.clone();
        self.run_blocking(move |connection| {
            let row = users::table
                .find(lookup.as_str())
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(DirectoryRepositoryError::persistence)?;
            row.map(row_to_user).transpose()
        })
        .await
    }

    async fn create_or_update_user(&self, user: &User) -> DirectoryRepositoryResult<()> {
        let row = to_row(user);
        self.run_blocking(move |connection| {
            diesel::insert_into(users::table)
                .values(&row)
                .on_conflict(users::user_id)
                .do_update()
                .set((
                    users::username.eq(excluded(users::username)),
                    users::team_name.eq(excluded(users::team_name)),
                    users::is_active.eq(excluded(users::is_active)),
                ))
                .execute(connection)
                .map_err(DirectoryRepositoryError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn update_user(&self, user: &User) -> DirectoryRepositoryResult<()> {
        let row = to_row(user);
        let user_id = user.id().clone();
        self.run_blocking(move |connection| {
            let updated = diesel::update(users::table.find(row.user_id.as_str()))
                .set((
                    users::username.eq(&row.username),
                    users::team_name.eq(&row.team_name),
                    users::is_active.eq(row.is_active),
                ))
                .execute(connection)
                .map_err(DirectoryRepositoryError::persistence)?;
            if updated == 0 {
                return Err(DirectoryRepositoryError::UserNotFound(user_id));
            }
            Ok(())
        })
        .await
    }

    async fn users_by_team(&self, team: &TeamName) -> DirectoryRepositoryResult<Vec<User>> {
        let lookup = team.clone();
        self.run_blocking(move |connection| load_members(connection, &lookup, false))
            .await
    }

    async fn active_users_by_team(&self, team: &TeamName) -> DirectoryRepositoryResult<Vec<User>> {
        let lookup = team.clone();
        self.run_blocking(move |connection| load_members(connection, &lookup, true))
            .await
    }

    async fn find_team(&self, name: &TeamName) -> DirectoryRepositoryResult<Option<Team>> {
        let lookup = name.clone();
        self.run_blocking(move |connection| {
            if !team_row_exists(connection, &lookup)? {
                return Ok(None);
            }
            let members = load_members(connection, &lookup, false)?;
            Ok(Some(Team::from_persisted(lookup, members)))
        })
        .await
    }

    async fn team_exists(&self, name: &TeamName) -> DirectoryRepositoryResult<bool> {
        let lookup = name.clone();
        self.run_blocking(move |connection| team_row_exists(connection, &lookup))
            .await
    }

    async fn create_team(&self, team: &Team) -> DirectoryRepositoryResult<()> {
        let name = team.name().clone();
        self.run_blocking(move |connection| {
            diesel::insert_into(teams::table)
                .values(teams::team_name.eq(name.as_str()))
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        DirectoryRepositoryError::DuplicateTeam(name.clone())
                    }
                    _ => DirectoryRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }
}

fn to_row(user: &User) -> UserRow {
    UserRow {
        user_id: user.id().as_str().to_owned(),
        username: user.username().to_owned(),
        team_name: user.team().as_str().to_owned(),
        is_active: user.is_active(),
    }
}

fn row_to_user(row: UserRow) -> DirectoryRepositoryResult<User> {
    let UserRow {
        user_id,
        username,
        team_name,
        is_active,
    } = row;
    let id = UserId::new(user_id).map_err(DirectoryRepositoryError::invalid_persisted_data)?;
    let team = TeamName::new(team_name).map_err(DirectoryRepositoryError::invalid_persisted_data)?;
    User::new(id, username, team, is_active)
        .map_err(DirectoryRepositoryError::invalid_persisted_data)
}

fn load_members(
    connection: &mut PgConnection,
    team: &TeamName,
    active_only: bool,
) -> DirectoryRepositoryResult<Vec<User>> {
    let members = users::table
        .filter(users::team_name.eq(team.as_str()))
        .select(UserRow::as_select())
        .order(users::user_id.asc());
    let rows = if active_only {
        members
            .filter(users::is_active.eq(true))
            .load::<UserRow>(connection)
    } else {
        members.load::<UserRow>(connection)
    }
    .map_err(DirectoryRepositoryError::persistence)?;
    rows.into_iter().map(row_to_user).collect()
}

fn team_row_exists(
    connection: &mut PgConnection,
    name: &TeamName,
) -> DirectoryRepositoryResult<bool> {
    diesel::select(diesel::dsl::exists(
        teams::table.filter(teams::team_name.eq(name.as_str())),
    ))
    .get_result::<bool>(connection)
    .map_err(DirectoryRepositoryError::persistence)
}
