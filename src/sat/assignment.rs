//! Complete variable assignments.
//!
//! An [`Assignment`] maps every 1-based variable index to a boolean. The
//! simulator derives one from each distinct surviving strand.

use crate::sat::literal::{Literal, Variable};
use itertools::Itertools;
use std::fmt::{self, Display};

/// A model in DIMACS form: one signed integer per variable.
pub type Solutions = Vec<i32>;

/// A total assignment over variables `1..=num_vars`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Assignment(Vec<bool>);

impl Assignment {
    /// Builds an assignment from per-variable values; `values[0]` is variable 1.
    #[must_use]
    pub const fn new(values: Vec<bool>) -> Self {
        Self(values)
    }

    /// Number of variables covered.
    #[must_use]
    pub fn num_vars(&self) -> usize {
        self.0.len()
    }

    /// The value of a 1-based variable, or `None` if it is out of range.
    #[must_use]
    pub fn get(&self, var: Variable) -> Option<bool> {
        let index = (var as usize).checked_sub(1)?;
        self.0.get(index).copied()
    }

    /// Whether `lit` holds under this assignment.
    #[must_use]
    pub fn literal_value(&self, lit: Literal) -> Option<bool> {
        let b = self.get(lit.variable())?;
        if lit.is_negated() { Some(!b) } else { Some(b) }
    }

    /// Iterates `(variable, value)` pairs in variable order.
    pub fn iter(&self) -> impl Iterator<Item = (Variable, bool)> + '_ {
        (1..).zip(self.0.iter().copied())
    }

    /// The assignment as DIMACS literals, e.g. `[1, -2]`.
    #[must_use]
    pub fn to_literals(&self) -> Solutions {
        self.iter()
            .map(|(var, value)| {
                let lit = Literal::new(var, value);
                lit.to_i32()
            })
            .collect()
    }
}

/// Renders as `x1=T x2=F`.
impl Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self
            .iter()
            .map(|(var, value)| format!("x{var}={}", if value { 'T' } else { 'F' }))
            .join(" ");
        f.write_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_is_one_based() {
        let a = Assignment::new(vec![true, false]);
        assert_eq!(a.get(0), None);
        assert_eq!(a.get(1), Some(true));
        assert_eq!(a.get(2), Some(false));
        assert_eq!(a.get(3), None);
    }

    #[test]
    fn test_literal_value() {
        let a = Assignment::new(vec![true, false]);
        assert_eq!(a.literal_value(Literal::from_i32(-2).unwrap()), Some(true));
        assert_eq!(a.literal_value(Literal::from_i32(-1).unwrap()), Some(false));
        assert_eq!(a.literal_value(Literal::from_i32(9).unwrap()), None);
    }

    #[test]
    fn test_to_literals_and_display() {
        let a = Assignment::new(vec![true, false, true]);
        assert_eq!(a.to_literals(), vec![1, -2, 3]);
        assert_eq!(a.to_string(), "x1=T x2=F x3=T");
    }
}
