//! Operating-system backed [`RandomSource`].

use crate::review::ports::{RandomSource, RandomSourceError};
use rand::TryRngCore;
use rand::rngs::OsRng;

/// Draws indices from the operating-system CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandomSource;

impl OsRandomSource {
    /// Creates a new source.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl RandomSource for OsRandomSource {
    fn index_below(&self, upper: usize) -> Result<usize, RandomSourceError> {
        let range = u64::try_from(upper).map_err(RandomSourceError::unavailable)?;
        // 2^64 mod range; draws below it would bias the low indices.
        let Some(threshold) = range.wrapping_neg().checked_rem(range) else {
            return Err(RandomSourceError::unavailable(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "cannot draw from an empty range",
            )));
        };

        loop {
            let value = OsRng.try_next_u64().map_err(RandomSourceError::unavailable)?;
            if value < threshold {
                continue;
            }
            if let Some(index) = value.checked_rem(range) {
                return usize::try_from(index).map_err(RandomSourceError::unavailable);
            }
        }
    }
}
