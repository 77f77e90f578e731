//! A handful of small named formulas for demos, docs and benches.

use crate::sat::cnf::Cnf;
use crate::sat::error::{ConfigurationError, Result};

/// A named formula with its declared variable count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Example {
    /// Lookup name.
    pub name: &'static str,
    /// One-line summary.
    pub description: &'static str,
    /// Declared variable count; may exceed the largest variable used.
    pub num_vars: usize,
    /// Clauses in DIMACS integers.
    pub clauses: &'static [&'static [i32]],
}

impl Example {
    /// Validates the example into a [`Cnf`].
    ///
    /// # Errors
    ///
    /// Never for the built-in examples; see [`Cnf::new`].
    pub fn to_cnf(&self) -> Result<Cnf> {
        Cnf::new(self.clauses.iter().map(|c| c.iter().copied()), self.num_vars)
    }
}

/// All built-in examples.
pub const EXAMPLES: &[Example] = &[
    Example {
        name: "simple",
        description: "2-SAT with a single model",
        num_vars: 2,
        clauses: &[&[1, 2], &[-1, -2], &[1, -2]],
    },
    Example {
        name: "simple3",
        description: "3 variables, 4 clauses",
        num_vars: 3,
        clauses: &[&[1, 2, 3], &[1, -2, 3], &[-1, 2, -3], &[-1, -2, -3]],
    },
    Example {
        name: "4sat",
        description: "4 variables, mixed clause widths",
        num_vars: 4,
        clauses: &[&[1, 2, 3, 4], &[-1, -2, -3], &[2, 3, -4], &[-1, 3, 4], &[1, -2, 4]],
    },
    Example {
        name: "unsat",
        description: "x1 and not x1",
        num_vars: 1,
        clauses: &[&[1], &[-1]],
    },
    Example {
        name: "largesat",
        description: "10 declared variables, 5 constrained",
        num_vars: 10,
        clauses: &[
            &[1, 2, 3, 4, 5],
            &[-1, -2, 3],
            &[2, 4, -5],
            &[-3, 4, 5],
            &[1, -4],
            &[-1, 2, -3, 4, -5],
        ],
    },
    Example {
        name: "3sat",
        description: "3 variables, at most one of x2 and its neighbours",
        num_vars: 3,
        clauses: &[&[1, 2, 3], &[-1, -2], &[-2, -3], &[1, -3]],
    },
];

/// Looks up a built-in example by name.
///
/// # Errors
///
/// [`ConfigurationError::UnknownExample`] if no example has that name.
pub fn example(name: &str) -> Result<Cnf> {
    EXAMPLES
        .iter()
        .find(|e| e.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| ConfigurationError::UnknownExample {
            name: name.to_string(),
        })?
        .to_cnf()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_example_is_valid() {
        for e in EXAMPLES {
            let cnf = e.to_cnf().unwrap();
            assert_eq!(cnf.num_vars(), e.num_vars, "{}", e.name);
            assert_eq!(cnf.len(), e.clauses.len(), "{}", e.name);
        }
    }

    #[test]
    fn test_lookup() {
        assert_eq!(example("LargeSat").unwrap().num_vars(), 10);
        assert!(matches!(
            example("nope"),
            Err(ConfigurationError::UnknownExample { .. })
        ));
    }
}
