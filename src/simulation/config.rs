//! Run configuration.

use crate::simulation::rng::RngKind;
use clap::ValueEnum;
use core::num::NonZeroUsize;
use std::fmt::{self, Display};

/// Largest variable count for which full enumeration is attempted.
pub const EXHAUSTIVE_LIMIT: usize = 15;

/// Default number of strands drawn in sample mode.
pub const DEFAULT_SAMPLE_SIZE: NonZeroUsize = NonZeroUsize::new(1000).unwrap();

/// Default number of copies made of each survivor between clauses.
pub const DEFAULT_AMPLIFICATION_FACTOR: NonZeroUsize = NonZeroUsize::new(2).unwrap();

/// Default sampling seed.
pub const DEFAULT_SEED: i64 = 42;

/// How the initial population is generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum)]
pub enum GenerationMode {
    /// Every one of the `2^n` assignments, when `n` is within [`EXHAUSTIVE_LIMIT`].
    #[default]
    Full,
    /// A seeded random sample of fixed size.
    Sample,
}

impl Display for GenerationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Full => write!(f, "full"),
            Self::Sample => write!(f, "sample"),
        }
    }
}

/// How much of each population the step trace keeps.
///
/// Sizes, descriptions and step order are the same either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TraceDetail {
    /// Every handle of every population.
    #[default]
    Full,
    /// At most this many handles per step, taken from the front.
    Capped(usize),
}

impl TraceDetail {
    /// Number of handles to keep from a population of `size`.
    #[must_use]
    pub fn keep(self, size: usize) -> usize {
        match self {
            Self::Full => size,
            Self::Capped(cap) => size.min(cap),
        }
    }
}

/// Everything a run needs besides the formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationConfig {
    /// Requested generation mode.
    pub mode: GenerationMode,
    /// Strands drawn in sample mode.
    pub sample_size: NonZeroUsize,
    /// Copies made of each survivor after a successful selection; `1` disables amplification.
    pub amplification_factor: NonZeroUsize,
    /// Sampling seed.
    pub seed: i64,
    /// Sampling draw source.
    pub rng: RngKind,
    /// Population detail kept per step.
    pub trace: TraceDetail,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            mode: GenerationMode::Full,
            sample_size: DEFAULT_SAMPLE_SIZE,
            amplification_factor: DEFAULT_AMPLIFICATION_FACTOR,
            seed: DEFAULT_SEED,
            rng: RngKind::Lcg,
            trace: TraceDetail::Full,
        }
    }
}

impl SimulationConfig {
    /// Sets the generation mode.
    #[must_use]
    pub const fn with_mode(mut self, mode: GenerationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the sample size.
    #[must_use]
    pub const fn with_sample_size(mut self, sample_size: NonZeroUsize) -> Self {
        self.sample_size = sample_size;
        self
    }

    /// Sets the amplification factor.
    #[must_use]
    pub const fn with_amplification_factor(mut self, factor: NonZeroUsize) -> Self {
        self.amplification_factor = factor;
        self
    }

    /// Sets the sampling seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: i64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the draw source.
    #[must_use]
    pub const fn with_rng(mut self, rng: RngKind) -> Self {
        self.rng = rng;
        self
    }

    /// Sets the trace detail.
    #[must_use]
    pub const fn with_trace(mut self, trace: TraceDetail) -> Self {
        self.trace = trace;
        self
    }

    /// The mode a run over `num_vars` variables actually uses: full
    /// enumeration falls back to sampling above [`EXHAUSTIVE_LIMIT`].
    #[must_use]
    pub const fn effective_mode(&self, num_vars: usize) -> GenerationMode {
        match self.mode {
            GenerationMode::Full if num_vars <= EXHAUSTIVE_LIMIT => GenerationMode::Full,
            _ => GenerationMode::Sample,
        }
    }

    /// `true` when amplification steps will be recorded.
    #[must_use]
    pub const fn amplifies(&self) -> bool {
        self.amplification_factor.get() > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SimulationConfig::default();
        assert_eq!(config.mode, GenerationMode::Full);
        assert_eq!(config.sample_size.get(), 1000);
        assert_eq!(config.amplification_factor.get(), 2);
        assert_eq!(config.seed, 42);
        assert!(config.amplifies());
    }

    #[test]
    fn test_effective_mode_falls_back_above_limit() {
        let config = SimulationConfig::default();
        assert_eq!(config.effective_mode(EXHAUSTIVE_LIMIT), GenerationMode::Full);
        assert_eq!(config.effective_mode(EXHAUSTIVE_LIMIT + 1), GenerationMode::Sample);
        let sampled = config.with_mode(GenerationMode::Sample);
        assert_eq!(sampled.effective_mode(2), GenerationMode::Sample);
    }

    #[test]
    fn test_trace_detail_keep() {
        assert_eq!(TraceDetail::Full.keep(10), 10);
        assert_eq!(TraceDetail::Capped(4).keep(10), 4);
        assert_eq!(TraceDetail::Capped(4).keep(2), 2);
    }

    #[test]
    fn test_factor_one_disables_amplification() {
        let config = SimulationConfig::default().with_amplification_factor(NonZeroUsize::MIN);
        assert!(!config.amplifies());
    }
}
