#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Signed literals in DIMACS convention.
//!
//! A literal is a nonzero integer: its magnitude is the 1-based variable index
//! and its sign the required polarity (positive asserts true, negative false).

use core::num::NonZeroI32;
use core::ops::{Neg, Not};
use std::fmt::{self, Display};

/// A 1-based variable index.
pub type Variable = u32;

/// A single literal, stored as a nonzero signed integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Literal(NonZeroI32);

impl Literal {
    /// The largest variable index a literal can refer to.
    pub const MAX_VARIABLE: Variable = i32::MAX.unsigned_abs();

    /// Creates the literal for `var` with the given polarity.
    ///
    /// # Panics
    ///
    /// If `var` is zero or larger than [`Literal::MAX_VARIABLE`].
    #[must_use]
    pub fn new(var: Variable, polarity: bool) -> Self {
        let var = i32::try_from(var).expect("literal variable overflowed");
        let value = NonZeroI32::new(var).expect("literal variable must be nonzero");
        if polarity { Self(value) } else { Self(-value) }
    }

    /// Converts a DIMACS integer into a literal.
    ///
    /// Returns `None` for `0` and for `i32::MIN`, whose magnitude has no positive twin.
    #[must_use]
    pub fn from_i32(value: i32) -> Option<Self> {
        if value == i32::MIN {
            return None;
        }
        NonZeroI32::new(value).map(Self)
    }

    /// The 1-based variable this literal refers to.
    #[must_use]
    pub const fn variable(self) -> Variable {
        self.0.get().unsigned_abs()
    }

    /// 0-based position of the variable in a per-variable sequence.
    #[must_use]
    pub const fn index(self) -> usize {
        self.variable() as usize - 1
    }

    /// `true` for a positive literal.
    #[must_use]
    pub const fn polarity(self) -> bool {
        self.0.get() > 0
    }

    /// `true` for a negative literal.
    #[must_use]
    pub const fn is_negated(self) -> bool {
        !self.polarity()
    }

    /// The literal with the opposite sign.
    #[must_use]
    pub fn negated(self) -> Self {
        Self(-self.0)
    }

    /// The literal as a DIMACS integer.
    #[must_use]
    pub const fn to_i32(self) -> i32 {
        self.0.get()
    }
}

impl Neg for Literal {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.negated()
    }
}

impl Not for Literal {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.negated()
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
