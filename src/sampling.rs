//! Bounded random sampling of the review pool.
//!
//! When the pool holds more reviews than the cap, `cap` of them are drawn
//! uniformly without replacement. Drawn reviews keep their original relative
//! order, so a sample of a pool reads in the same page order as the pool.
//!
//! The random source is injected. Runs are reproducible by seeding a
//! [`StdRng`] with [`seeded_rng`].

use rand::rngs::StdRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};
use tracing::{debug, instrument};

/// Default maximum number of reviews emitted.
pub const DEFAULT_SAMPLE_CAP: usize = 50;

/// Draw at most `cap` items from `pool`.
///
/// A pool no larger than `cap` is returned unchanged.
#[instrument(level = "debug", skip(pool, rng), fields(pool = pool.len()))]
pub fn sample<T, R>(pool: Vec<T>, cap: usize, rng: &mut R) -> Vec<T>
where
    R: Rng + ?Sized,
{
    if pool.len() <= cap {
        return pool;
    }

    let mut picked = index::sample(rng, pool.len(), cap).into_vec();
    picked.sort_unstable();
    debug!(kept = picked.len(), dropped = pool.len() - picked.len(), "Sampled pool");

    let mut picked = picked.into_iter().peekable();
    pool.into_iter()
        .enumerate()
        .filter_map(|(i, item)| {
            if picked.peek() == Some(&i) {
                picked.next();
                Some(item)
            } else {
                None
            }
        })
        .collect()
}

/// Deterministic RNG for a given seed.
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}
