//! Diesel row models for directory persistence.

use super::schema::users;
use diesel::prelude::*;

/// Row shape for user records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    /// Unique user identifier.
    pub user_id: String,
    /// Display name.
    pub username: String,
    /// Owning team.
    pub team_name: String,
    /// Reviewer availability flag.
    pub is_active: bool,
}
