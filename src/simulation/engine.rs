#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The simulation engine.
//!
//! A run moves through `INIT → (SELECT → [AMPLIFY]?)* → DONE`:
//!
//! 1. **Init**: generate the population, by full enumeration when the mode is
//!    [`GenerationMode::Full`] and the variable count is within
//!    [`EXHAUSTIVE_LIMIT`](crate::simulation::config::EXHAUSTIVE_LIMIT), by
//!    seeded sampling otherwise.
//! 2. **Select**, once per clause in order. An empty result ends the clause loop
//!    early: no later clause can bring strands back.
//! 3. **Amplify** after every selection that left survivors, when the factor
//!    exceeds one. This includes the last clause.
//! 4. **Done**: the final population is deduplicated by token sequence, in
//!    first-seen order, into assignments.
//!
//! A run is synchronous and owns all of its state, so independent runs never
//! interfere and identical inputs give identical results (runtime aside).

use crate::sat::assignment::Assignment;
use crate::sat::cnf::Cnf;
use crate::simulation::config::{GenerationMode, SimulationConfig};
use crate::simulation::operators::{amplify, select_by_clause};
use crate::simulation::population::{generate_full, generate_sample_with};
use crate::simulation::step::{Step, StepKind, Trace};
use crate::simulation::strand::{Population, Strand, StrandId, StrandPool};
use crate::simulation::token::Token;
use rustc_hash::FxHashSet;
use std::time::{Duration, Instant};

/// Runs the population-filtering model over one validated formula.
#[derive(Debug, Clone)]
pub struct Simulator<'a> {
    cnf: &'a Cnf,
    config: SimulationConfig,
}

impl<'a> Simulator<'a> {
    /// Prepares a run; nothing is generated until [`Simulator::run`].
    #[must_use]
    pub const fn new(cnf: &'a Cnf, config: SimulationConfig) -> Self {
        Self { cnf, config }
    }

    /// The formula being simulated.
    #[must_use]
    pub const fn cnf(&self) -> &Cnf {
        self.cnf
    }

    /// The run configuration.
    #[must_use]
    pub const fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Executes the run to completion.
    #[must_use]
    pub fn run(&self) -> SimulationResult {
        let start = Instant::now();
        let num_vars = self.cnf.num_vars();
        let mode = self.config.effective_mode(num_vars);

        let pool = match mode {
            GenerationMode::Full => generate_full(num_vars),
            GenerationMode::Sample => {
                let mut rng = self.config.rng.to_impl(self.config.seed);
                generate_sample_with(num_vars, self.config.sample_size, &mut rng)
            }
        };

        log::info!(
            "Simulating {} clauses over {num_vars} variables ({mode} mode, {} strands)",
            self.cnf.len(),
            pool.len()
        );
        if mode != self.config.mode {
            log::info!("{num_vars} variables is too many to enumerate, sampling instead");
        }

        let mut trace = Trace::new(self.config.trace);
        let mut population: Population = pool.ids().collect();
        trace.record(
            StepKind::Init {
                mode,
                fallback: mode != self.config.mode,
            },
            &population,
        );

        for (clause_index, clause) in self.cnf.iter().enumerate() {
            let before = population.len();
            population = select_by_clause(&pool, &population, clause);
            log::trace!(
                "Clause {} discarded {} strands",
                clause_index + 1,
                before - population.len()
            );
            trace.record(
                StepKind::Select {
                    clause_index,
                    clause: clause.clone(),
                },
                &population,
            );

            if population.is_empty() {
                log::debug!(
                    "Population exhausted at clause {}, skipping the remaining {}",
                    clause_index + 1,
                    self.cnf.len() - clause_index - 1
                );
                break;
            }

            if self.config.amplifies() {
                let factor = self.config.amplification_factor;
                population = amplify(&population, factor);
                trace.record(StepKind::Amplify { factor }, &population);
            }
        }

        let assignments = deduplicate(&pool, &population);
        let runtime = start.elapsed();

        let result = SimulationResult {
            satisfiable: !population.is_empty(),
            exhaustive: mode == GenerationMode::Full,
            assignments,
            steps: trace.into_steps(),
            runtime,
            population,
            pool,
        };

        log::info!(
            "Done: satisfiable={}, {} distinct assignments, final population {}, {:?}",
            result.satisfiable,
            result.assignments.len(),
            result.final_population_size(),
            result.runtime
        );

        result
    }
}

/// Shorthand for `Simulator::new(cnf, config).run()`.
#[must_use]
pub fn simulate(cnf: &Cnf, config: SimulationConfig) -> SimulationResult {
    Simulator::new(cnf, config).run()
}

/// Collapses a population into one assignment per distinct token sequence,
/// in order of first appearance.
#[must_use]
pub fn deduplicate(pool: &StrandPool, population: &[StrandId]) -> Vec<Assignment> {
    let mut seen: FxHashSet<&[Token]> = FxHashSet::default();
    let mut assignments = Vec::new();
    for &id in population {
        let strand = &pool[id];
        if seen.insert(strand.tokens()) {
            assignments.push(strand.to_assignment());
        }
    }
    assignments
}

/// Everything a finished run reports.
///
/// The result owns the strand pool, so step snapshots and the final
/// population can be resolved to strands through [`SimulationResult::strand`].
#[derive(Debug, Clone)]
pub struct SimulationResult {
    satisfiable: bool,
    exhaustive: bool,
    assignments: Vec<Assignment>,
    steps: Vec<Step>,
    runtime: Duration,
    population: Population,
    pool: StrandPool,
}

impl SimulationResult {
    /// `true` if any strand survived every clause.
    #[must_use]
    pub const fn satisfiable(&self) -> bool {
        self.satisfiable
    }

    /// `true` if the initial population held every assignment, making an
    /// unsatisfiable verdict a proof rather than a sampling outcome.
    #[must_use]
    pub const fn exhaustive(&self) -> bool {
        self.exhaustive
    }

    /// The distinct surviving assignments, in first-seen order.
    #[must_use]
    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    /// The full step trace.
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Wall-clock time of the run.
    #[must_use]
    pub const fn runtime(&self) -> Duration {
        self.runtime
    }

    /// Size of the population after the last recorded step.
    #[must_use]
    pub fn final_population_size(&self) -> usize {
        self.population.len()
    }

    /// The final population, duplicates included.
    #[must_use]
    pub fn final_population(&self) -> &[StrandId] {
        &self.population
    }

    /// The largest population size seen across the trace.
    #[must_use]
    pub fn peak_population_size(&self) -> usize {
        self.steps.iter().map(Step::size).max().unwrap_or(0)
    }

    /// Resolves a handle from this run.
    #[must_use]
    pub fn strand(&self, id: StrandId) -> Option<&Strand> {
        self.pool.get(id)
    }

    /// Every strand generated by this run.
    #[must_use]
    pub const fn pool(&self) -> &StrandPool {
        &self.pool
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::config::TraceDetail;
    use core::num::NonZeroUsize;

    fn cnf(clauses: &[&[i32]], num_vars: usize) -> Cnf {
        Cnf::new(clauses.iter().map(|c| c.iter().copied()), num_vars).unwrap()
    }

    fn no_amplification() -> SimulationConfig {
        SimulationConfig::default().with_amplification_factor(NonZeroUsize::MIN)
    }

    #[test]
    fn test_single_model() {
        let f = cnf(&[&[1, 2], &[-1, -2], &[1, -2]], 2);
        let result = simulate(&f, no_amplification());

        assert!(result.satisfiable());
        assert!(result.exhaustive());
        assert_eq!(result.assignments(), &[Assignment::new(vec![true, false])]);
        assert_eq!(result.final_population_size(), 1);
        assert_eq!(
            result.steps().iter().map(|s| s.kind().name()).collect::<Vec<_>>(),
            vec!["init", "select", "select", "select"]
        );
        assert_eq!(
            result.steps().iter().map(Step::size).collect::<Vec<_>>(),
            vec![4, 3, 2, 1]
        );
    }

    #[test]
    fn test_short_circuit_on_empty_population() {
        let f = cnf(&[&[1], &[-1], &[1]], 1);
        let result = simulate(&f, SimulationConfig::default());

        assert!(!result.satisfiable());
        assert_eq!(result.final_population_size(), 0);
        assert!(result.assignments().is_empty());
        let kinds: Vec<_> = result.steps().iter().map(|s| s.kind().name()).collect();
        assert_eq!(kinds, vec!["init", "select", "amplify", "select"]);
    }

    #[test]
    fn test_amplifies_after_last_clause() {
        let f = cnf(&[&[1, 2]], 2);
        let result = simulate(&f, SimulationConfig::default());
        let sizes: Vec<_> = result.steps().iter().map(Step::size).collect();
        assert_eq!(sizes, vec![4, 3, 6]);
        assert_eq!(result.final_population_size(), 6);
        assert_eq!(result.assignments().len(), 3);
        assert_eq!(result.peak_population_size(), 6);
    }

    #[test]
    fn test_fallback_to_sampling() {
        let f = cnf(&[&[1, 16]], 16);
        let config = no_amplification().with_sample_size(NonZeroUsize::new(64).unwrap());
        let result = simulate(&f, config);

        assert!(!result.exhaustive());
        assert_eq!(result.steps()[0].size(), 64);
        assert_eq!(
            result.steps()[0].kind(),
            &StepKind::Init {
                mode: GenerationMode::Sample,
                fallback: true
            }
        );
        assert_eq!(
            result.steps()[0].description(),
            "Initial population generated (sample mode)"
        );
    }

    #[test]
    fn test_deduplicate_first_seen_order() {
        let pool = generate_full(2);
        let ids: Vec<StrandId> = pool.ids().collect();
        let population = vec![ids[2], ids[1], ids[2], ids[2], ids[1]];
        let assignments = deduplicate(&pool, &population);
        assert_eq!(
            assignments,
            vec![
                Assignment::new(vec![false, true]),
                Assignment::new(vec![true, false])
            ]
        );
    }

    #[test]
    fn test_capped_trace_resolves_strands() {
        let f = cnf(&[&[1, 2, 3]], 3);
        let result = simulate(&f, SimulationConfig::default().with_trace(TraceDetail::Capped(2)));
        for step in result.steps() {
            assert!(step.population().len() <= 2);
            for &id in step.population() {
                assert_eq!(result.strand(id).map(Strand::len), Some(3));
            }
        }
        assert_eq!(result.steps()[0].size(), 8);
    }
}
