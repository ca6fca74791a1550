//! Port for the cryptographically secure random source used by reviewer
//! selection.

use std::sync::Arc;
use thiserror::Error;

/// Uniform, unpredictable index source.
///
/// Implementations must draw from a cryptographically secure generator and
/// must not be seeded.
pub trait RandomSource: Send + Sync {
    /// Returns an index drawn uniformly from `0..upper`.
    ///
    /// `upper` is always at least 1.
    ///
    /// # Errors
    ///
    /// Returns [`RandomSourceError`] when the underlying generator is
    /// unavailable.
    fn index_below(&self, upper: usize) -> Result<usize, RandomSourceError>;
}

/// The random source could not produce a value.
#[derive(Debug, Clone, Error)]
#[error("random source unavailable: {0}")]
pub struct RandomSourceError(Arc<dyn std::error::Error + Send + Sync>);

impl RandomSourceError {
    /// Wraps a generator failure.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self(Arc::new(err))
    }
}
