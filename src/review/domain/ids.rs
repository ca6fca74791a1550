//! Identifier type for pull requests.

use crate::error::{DomainError, require_text};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque, unique pull request identifier supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PullRequestId(String);

impl PullRequestId {
    /// Creates a validated pull request identifier.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidField`] when the value is blank or longer
    /// than 255 bytes.
    pub fn new(value: impl AsRef<str>) -> Result<Self, DomainError> {
        require_text("pull_request_id", value.as_ref()).map(Self)
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for PullRequestId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for PullRequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
