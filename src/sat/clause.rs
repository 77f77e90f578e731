//! A clause is the disjunction (OR) of its literals.

use crate::sat::assignment::Assignment;
use crate::sat::literal::{Literal, Variable};
use core::ops::Index;
use itertools::Itertools;
use smallvec::SmallVec;
use std::fmt::{self, Display};

/// Literal storage for one clause. Formulas for this simulator are short, so
/// eight literals fit inline before spilling to the heap.
pub type LiteralStorage = SmallVec<[Literal; 8]>;

/// An ordered disjunction of literals.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Clause {
    literals: LiteralStorage,
}

impl Clause {
    /// Creates a clause from its literals, keeping their order.
    pub fn new(literals: impl IntoIterator<Item = Literal>) -> Self {
        Self {
            literals: literals.into_iter().collect(),
        }
    }

    /// Number of literals.
    #[must_use]
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    /// `true` if the clause has no literals.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// `true` if the clause has exactly one literal.
    #[must_use]
    pub fn is_unit(&self) -> bool {
        self.len() == 1
    }

    /// Iterates over the literals in order.
    pub fn iter(&self) -> impl Iterator<Item = &Literal> {
        self.literals.iter()
    }

    /// The highest variable index used, if any.
    #[must_use]
    pub fn max_variable(&self) -> Option<Variable> {
        self.iter().map(|lit| lit.variable()).max()
    }

    /// Standard CNF satisfaction: at least one literal agrees with `assignment`.
    #[must_use]
    pub fn is_satisfied_by(&self, assignment: &Assignment) -> bool {
        self.iter()
            .any(|&lit| assignment.literal_value(lit) == Some(true))
    }

    /// The literals as DIMACS integers.
    #[must_use]
    pub fn to_i32s(&self) -> Vec<i32> {
        self.iter().map(|lit| lit.to_i32()).collect()
    }
}

impl Index<usize> for Clause {
    type Output = Literal;

    fn index(&self, index: usize) -> &Self::Output {
        &self.literals[index]
    }
}

impl FromIterator<Literal> for Clause {
    fn from_iter<T: IntoIterator<Item = Literal>>(iter: T) -> Self {
        Self::new(iter)
    }
}

impl<'a> IntoIterator for &'a Clause {
    type Item = &'a Literal;
    type IntoIter = core::slice::Iter<'a, Literal>;

    fn into_iter(self) -> Self::IntoIter {
        self.literals.iter()
    }
}

/// Renders as `(1 ∨ -2 ∨ 3)`.
impl Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.iter().join(" ∨ "))
    }
}
