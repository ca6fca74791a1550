//! Engine policy and infrastructure configuration.
//!
//! [`ReviewPolicy`] holds the fixed system parameters of the assignment
//! engine. [`DatabaseConfig`] describes the `PostgreSQL` connection used by
//! the Diesel adapters and is read from `DB_*` environment variables.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Global ceiling, in bytes, for identifiers and display names.
pub const MAX_IDENTIFIER_LENGTH: usize = 255;

/// Behaviour when the random source fails part-way through a selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RandomFailurePolicy {
    /// Keep the reviewers picked before the failure.
    #[default]
    Degrade,
    /// Abort the operation with the random-source error.
    FailClosed,
}

/// Tunable parameters of the reviewer-assignment engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewPolicy {
    /// Reviewers assigned when a pull request is opened.
    pub default_reviewers: usize,
    /// Candidates drawn when a reviewer is replaced. The first draw becomes
    /// the replacement; values below 1 are treated as 1.
    pub replacement_reviewers: usize,
    /// Largest team accepted by team creation.
    pub max_team_members: usize,
    /// How selection reacts to an unavailable random source.
    pub random_failure: RandomFailurePolicy,
}

impl Default for ReviewPolicy {
    fn default() -> Self {
        Self {
            default_reviewers: 2,
            replacement_reviewers: 1,
            max_team_members: 100,
            random_failure: RandomFailurePolicy::Degrade,
        }
    }
}

impl ReviewPolicy {
    /// Returns a policy that aborts on random-source failure.
    #[must_use]
    pub fn fail_closed() -> Self {
        Self {
            random_failure: RandomFailurePolicy::FailClosed,
            ..Self::default()
        }
    }
}

/// `PostgreSQL` connection and pool settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// Server host name.
    pub host: String,
    /// Server port.
    pub port: String,
    /// Login role.
    pub user: String,
    /// Login password.
    pub password: String,
    /// Database name.
    pub database: String,
    /// Upper bound on pooled connections.
    pub max_connections: u32,
    /// Idle connections kept warm.
    pub min_idle: u32,
    /// Maximum lifetime of a pooled connection.
    pub max_lifetime: Duration,
    /// Idle time after which a pooled connection is closed.
    pub idle_timeout: Duration,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_owned(),
            port: "5432".to_owned(),
            user: "postgres".to_owned(),
            password: "postgres".to_owned(),
            database: "pr_review".to_owned(),
            max_connections: 25,
            min_idle: 5,
            max_lifetime: Duration::from_secs(60 * 60),
            idle_timeout: Duration::from_secs(30 * 60),
        }
    }
}

impl DatabaseConfig {
    /// Reads the configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, falling back to defaults
    /// for missing or empty values.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let read = |key: &str, fallback: String| {
            lookup(key)
                .filter(|value| !value.is_empty())
                .unwrap_or(fallback)
        };
        Self {
            host: read("DB_HOST", defaults.host),
            port: read("DB_PORT", defaults.port),
            user: read("DB_USER", defaults.user),
            password: read("DB_PASSWORD", defaults.password),
            database: read("DB_NAME", defaults.database),
            ..Self::default()
        }
    }

    /// Returns the libpq connection URL.
    #[must_use]
    pub fn connection_url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}?sslmode=disable",
            self.user, self.password, self.host, self.port, self.database
        )
    }
}
