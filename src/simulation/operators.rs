//! The two population operators: selection by clause and amplification.
//!
//! Both take a population of handles and return a new one; neither touches
//! the strands or the input population.

use crate::sat::clause::Clause;
use crate::simulation::strand::{Population, StrandId, StrandPool};
use core::num::NonZeroUsize;

/// Keeps the strands that satisfy `clause`, preserving their order.
///
/// The result is never larger than `population`.
#[must_use]
pub fn select_by_clause(pool: &StrandPool, population: &[StrandId], clause: &Clause) -> Population {
    population
        .iter()
        .copied()
        .filter(|&id| pool[id].satisfies(clause))
        .collect()
}

/// Repeats every handle `factor` times in a row.
///
/// The copies are handles to the same strand, so amplification never creates
/// new values.
#[must_use]
pub fn amplify(population: &[StrandId], factor: NonZeroUsize) -> Population {
    let mut amplified = Population::with_capacity(population.len().saturating_mul(factor.get()));
    for &id in population {
        amplified.extend(std::iter::repeat_n(id, factor.get()));
    }
    amplified
}
