//! Deterministic draw sources for sampled populations.
//!
//! The sampler asks for one draw in `[0, 1]` per variable per strand and sets the
//! variable true when the draw exceeds `0.5`. The source is a parameter:
//!
//! - [`Lcg`] is the reference generator. Identical seeds give identical strands
//!   on every platform, which the test suite relies on.
//! - [`FastRng`] wraps `fastrand` for runs that want better statistical quality
//!   and do not need to match the reference sequence.
//!
//! [`RngImpls`] dispatches between the two without boxing.

use clap::ValueEnum;
use std::fmt::{self, Debug, Display};

/// A source of uniform draws.
pub trait UnitRng: Debug {
    /// The next draw, in `[0, 1]`.
    fn next_unit(&mut self) -> f64;

    /// The polarity for the next variable: `true` when the draw exceeds one half.
    fn next_polarity(&mut self) -> bool {
        self.next_unit() > 0.5
    }
}

/// Linear congruential generator: `s ← (s·1103515245 + 12345) mod 2^31`.
///
/// Arithmetic is exact; the seed's two's-complement bits are the initial state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lcg {
    state: u64,
}

impl Lcg {
    const MULTIPLIER: u64 = 1_103_515_245;
    const INCREMENT: u64 = 12_345;
    const MASK: u64 = 0x7fff_ffff;

    /// Seeds the generator.
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub const fn new(seed: i64) -> Self {
        Self { state: seed as u64 }
    }

    /// Advances the state and returns it; always below `2^31`.
    #[allow(clippy::cast_possible_truncation)]
    pub fn next_state(&mut self) -> u32 {
        self.state = self
            .state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
            & Self::MASK;
        self.state as u32
    }
}

impl UnitRng for Lcg {
    #[allow(clippy::cast_precision_loss)]
    fn next_unit(&mut self) -> f64 {
        f64::from(self.next_state()) / Self::MASK as f64
    }
}

/// `fastrand` seeded from the run seed.
#[derive(Debug, Clone)]
pub struct FastRng(fastrand::Rng);

impl FastRng {
    /// Seeds the generator.
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub fn new(seed: i64) -> Self {
        Self(fastrand::Rng::with_seed(seed as u64))
    }
}

impl UnitRng for FastRng {
    fn next_unit(&mut self) -> f64 {
        self.0.f64()
    }
}

/// Which draw source a sampled run uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum)]
pub enum RngKind {
    /// The reference linear congruential generator.
    #[default]
    Lcg,
    /// The `fastrand` generator.
    Fastrand,
}

impl Display for RngKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lcg => write!(f, "lcg"),
            Self::Fastrand => write!(f, "fastrand"),
        }
    }
}

impl RngKind {
    /// Builds the seeded source.
    #[must_use]
    pub fn to_impl(self, seed: i64) -> RngImpls {
        match self {
            Self::Lcg => RngImpls::Lcg(Lcg::new(seed)),
            Self::Fastrand => RngImpls::Fastrand(FastRng::new(seed)),
        }
    }
}

/// A seeded draw source of either kind.
#[derive(Debug, Clone)]
pub enum RngImpls {
    /// See [`Lcg`].
    Lcg(Lcg),
    /// See [`FastRng`].
    Fastrand(FastRng),
}

impl UnitRng for RngImpls {
    fn next_unit(&mut self) -> f64 {
        match self {
            Self::Lcg(r) => r.next_unit(),
            Self::Fastrand(r) => r.next_unit(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lcg_reference_sequence() {
        let mut rng = Lcg::new(42);
        let states: Vec<u32> = (0..4).map(|_| rng.next_state()).collect();
        assert_eq!(states, vec![1_250_496_027, 1_116_302_264, 1_000_676_753, 1_668_674_806]);
    }

    #[test]
    fn test_lcg_polarities() {
        let mut rng = Lcg::new(42);
        let bits: Vec<bool> = (0..6).map(|_| rng.next_polarity()).collect();
        assert_eq!(bits, vec![true, true, false, true, false, false]);
    }

    #[test]
    fn test_lcg_negative_seed_is_masked() {
        let mut rng = Lcg::new(-1);
        assert_eq!(rng.next_state(), 1_043_980_748);
    }

    #[test]
    fn test_draws_are_in_unit_interval() {
        for kind in [RngKind::Lcg, RngKind::Fastrand] {
            let mut rng = kind.to_impl(7);
            for _ in 0..1000 {
                let x = rng.next_unit();
                assert!((0.0..=1.0).contains(&x), "{kind}: {x}");
            }
        }
    }

    #[test]
    fn test_same_seed_same_stream() {
        for kind in [RngKind::Lcg, RngKind::Fastrand] {
            let mut a = kind.to_impl(1234);
            let mut b = kind.to_impl(1234);
            for _ in 0..100 {
                assert_eq!(a.next_unit().to_bits(), b.next_unit().to_bits());
            }
        }
    }
}
