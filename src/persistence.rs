//! Shared `PostgreSQL` connection pooling for the Diesel adapters.

use crate::config::DatabaseConfig;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};

/// `PostgreSQL` connection pool type used by every Diesel adapter.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Builds a connection pool sized from `config`.
///
/// # Errors
///
/// Returns [`PoolError`] when the initial idle connections cannot be
/// established.
pub fn build_pool(config: &DatabaseConfig) -> Result<PgPool, PoolError> {
    let manager = ConnectionManager::<PgConnection>::new(config.connection_url());
    Pool::builder()
        .max_size(config.max_connections)
        .min_idle(Some(config.min_idle))
        .max_lifetime(Some(config.max_lifetime))
        .idle_timeout(Some(config.idle_timeout))
        .build(manager)
}
