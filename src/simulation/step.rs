//! The observable trace of a run.
//!
//! One [`Step`] is recorded per operator application: an `init` step for the
//! generated population, a `select` step per clause evaluated, and an
//! `amplify` step after each selection that left survivors (when the factor
//! exceeds one).

use crate::sat::clause::Clause;
use crate::simulation::config::{GenerationMode, TraceDetail};
use crate::simulation::strand::{Population, StrandId};
use core::num::NonZeroUsize;
use std::fmt::{self, Display};

/// What a step did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepKind {
    /// The initial population was generated.
    Init {
        /// The mode actually used.
        mode: GenerationMode,
        /// `true` when full enumeration was requested but the variable count
        /// forced sampling.
        fallback: bool,
    },
    /// The population was filtered by one clause.
    Select {
        /// 0-based position of the clause in the formula.
        clause_index: usize,
        /// The clause itself.
        clause: Clause,
    },
    /// Every survivor was duplicated.
    Amplify {
        /// Copies made of each survivor.
        factor: NonZeroUsize,
    },
}

impl StepKind {
    /// `init`, `select` or `amplify`.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Init { .. } => "init",
            Self::Select { .. } => "select",
            Self::Amplify { .. } => "amplify",
        }
    }

    fn describe(&self) -> String {
        match self {
            Self::Init { mode, .. } => format!("Initial population generated ({mode} mode)"),
            Self::Select {
                clause_index,
                clause,
            } => format!("Filter by clause {}: {clause}", clause_index + 1),
            Self::Amplify { factor } => format!("Amplify by factor {factor}"),
        }
    }
}

/// One immutable entry of the trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    index: usize,
    kind: StepKind,
    size: usize,
    population: Population,
    description: String,
}

impl Step {
    pub(crate) fn new(
        index: usize,
        kind: StepKind,
        population: &[StrandId],
        detail: TraceDetail,
    ) -> Self {
        let description = kind.describe();
        Self {
            index,
            kind,
            size: population.len(),
            population: population[..detail.keep(population.len())].to_vec(),
            description,
        }
    }

    /// Ordinal position in the trace, starting at 0 for `init`.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// What the step did.
    #[must_use]
    pub const fn kind(&self) -> &StepKind {
        &self.kind
    }

    /// The clause applied, for `select` steps.
    #[must_use]
    pub const fn clause(&self) -> Option<&Clause> {
        match &self.kind {
            StepKind::Select { clause, .. } => Some(clause),
            _ => None,
        }
    }

    /// Population size after the step.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// The population after the step, or its first handles if the trace is capped.
    #[must_use]
    pub fn population(&self) -> &[StrandId] {
        &self.population
    }

    /// `true` if [`Step::population`] holds every handle.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.population.len() == self.size
    }

    /// Human-readable summary.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}

impl Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {} (population {})",
            self.index,
            self.kind.name(),
            self.description,
            self.size
        )
    }
}

/// The growing trace of one run.
#[derive(Debug, Default)]
pub(crate) struct Trace {
    detail: TraceDetail,
    steps: Vec<Step>,
}

impl Trace {
    pub(crate) const fn new(detail: TraceDetail) -> Self {
        Self {
            detail,
            steps: Vec::new(),
        }
    }

    pub(crate) fn record(&mut self, kind: StepKind, population: &[StrandId]) {
        let step = Step::new(self.steps.len(), kind, population, self.detail);
        log::debug!("{step}");
        self.steps.push(step);
    }

    pub(crate) fn into_steps(self) -> Vec<Step> {
        self.steps
    }
}
