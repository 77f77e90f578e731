#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Initial population generation.
//!
//! - [`generate_full`] enumerates every assignment. Strand `i` sets variable
//!   `v + 1` true exactly when bit `v` of `i` is set, so strand ids double as
//!   the assignments' binary encodings.
//! - [`generate_sample`] draws a fixed number of strands from a seeded
//!   [`UnitRng`], one draw per variable, in strand-major order.

use crate::simulation::rng::{Lcg, UnitRng};
use crate::simulation::strand::StrandPool;
use crate::simulation::token::TokenTable;
use core::num::NonZeroUsize;

/// Enumerates all `2^num_vars` strands.
///
/// Callers keep `num_vars` small; the engine only calls this up to
/// [`EXHAUSTIVE_LIMIT`](crate::simulation::config::EXHAUSTIVE_LIMIT).
///
/// # Panics
///
/// If `2^num_vars` does not fit in a `usize`.
#[must_use]
pub fn generate_full(num_vars: usize) -> StrandPool {
    let total = u32::try_from(num_vars)
        .ok()
        .and_then(|n| 1usize.checked_shl(n))
        .expect("full enumeration overflowed");

    let table = TokenTable::new(num_vars);
    let mut pool = StrandPool::with_capacity(num_vars, total);

    for i in 0..total {
        let tokens = table
            .iter()
            .enumerate()
            .map(|(v, pair)| pair.select((i >> v) & 1 == 1))
            .collect();
        pool.push(tokens);
    }

    pool
}

/// Draws `sample_size` strands with the reference [`Lcg`] seeded by `seed`.
///
/// Identical arguments always reproduce the identical strand sequence.
#[must_use]
pub fn generate_sample(num_vars: usize, sample_size: NonZeroUsize, seed: i64) -> StrandPool {
    generate_sample_with(num_vars, sample_size, &mut Lcg::new(seed))
}

/// Draws `sample_size` strands from `rng`.
#[must_use]
pub fn generate_sample_with<R: UnitRng + ?Sized>(
    num_vars: usize,
    sample_size: NonZeroUsize,
    rng: &mut R,
) -> StrandPool {
    let table = TokenTable::new(num_vars);
    let mut pool = StrandPool::with_capacity(num_vars, sample_size.get());

    for _ in 0..sample_size.get() {
        let tokens = table
            .iter()
            .map(|pair| pair.select(rng.next_polarity()))
            .collect();
        pool.push(tokens);
    }

    pool
}
