//! Shuffle-and-take reviewer selection.
//!
//! Runs a partial forward Fisher–Yates shuffle: for each output position
//! `i` in `0..k`, an index `j` is drawn uniformly from `i..len` and the two
//! slots are swapped. The first `k` slots are then the picks, in shuffle
//! order. Every ordered `k`-subset of the pool is equally likely, exactly as
//! with a full shuffle followed by take-`k`, but only `k` draws are spent.

use crate::review::ports::{RandomSource, RandomSourceError};
use tracing::warn;

/// Picks produced by [`select`], plus the random-source failure that cut the
/// run short, if any.
#[derive(Debug)]
pub struct Selection<T> {
    picks: Vec<T>,
    interrupted_by: Option<RandomSourceError>,
}

impl<T> Selection<T> {
    /// Returns the picks in shuffle order.
    #[must_use]
    pub fn picks(&self) -> &[T] {
        &self.picks
    }

    /// Returns the failure that stopped selection early.
    #[must_use]
    pub const fn interrupted_by(&self) -> Option<&RandomSourceError> {
        self.interrupted_by.as_ref()
    }

    /// Splits the selection into its picks and the interrupting failure.
    #[must_use]
    pub fn into_parts(self) -> (Vec<T>, Option<RandomSourceError>) {
        (self.picks, self.interrupted_by)
    }
}

/// Selects up to `count` distinct entries of `pool` uniformly at random.
///
/// An empty pool yields an empty selection. When `count` exceeds the pool
/// size every entry is returned, in random order. If `random` fails, the
/// picks made so far are kept and the failure is reported alongside them.
#[must_use]
pub fn select<T, R>(mut pool: Vec<T>, count: usize, random: &R) -> Selection<T>
where
    R: RandomSource + ?Sized,
{
    let len = pool.len();
    let wanted = count.min(len);

    let mut interrupted_by = None;
    let mut picked = 0;
    while picked < wanted {
        match draw_from(random, picked, len) {
            Ok(slot) => {
                pool.swap(picked, slot);
                picked += 1;
            }
            Err(err) => {
                warn!(
                    picked,
                    requested = wanted,
                    error = %err,
                    "random source failed; reviewer selection stopped early"
                );
                interrupted_by = Some(err);
                break;
            }
        }
    }

    pool.truncate(picked);
    Selection {
        picks: pool,
        interrupted_by,
    }
}

/// Draws a slot in `start..len`.
fn draw_from<R>(random: &R, start: usize, len: usize) -> Result<usize, RandomSourceError>
where
    R: RandomSource + ?Sized,
{
    let remaining = len - start;
    let offset = random.index_below(remaining)?;
    if offset >= remaining {
        return Err(RandomSourceError::unavailable(std::io::Error::other(
            format!("random source returned {offset} for a range of {remaining}"),
        )));
    }
    Ok(start + offset)
}
