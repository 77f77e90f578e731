#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Validated CNF formulas.
//!
//! A [`Cnf`] can only be built through [`Cnf::new`] (or [`Cnf::from_clauses`]),
//! which checks every precondition the simulator relies on:
//!
//! - the formula has at least one clause,
//! - no clause is empty and no literal is `0`,
//! - every literal's magnitude lies in `1..=num_vars`.
//!
//! Downstream code indexes strands by literal without further checks.

use crate::sat::assignment::Assignment;
use crate::sat::clause::Clause;
use crate::sat::error::{ConfigurationError, Result};
use crate::sat::literal::Literal;
use std::fmt::{self, Display};

/// A conjunction of clauses over a declared number of variables.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cnf {
    clauses: Vec<Clause>,
    num_vars: usize,
}

impl Cnf {
    /// Validates `clauses` against `num_vars` and builds the formula.
    ///
    /// # Errors
    ///
    /// - [`ConfigurationError::ZeroVariables`] / [`ConfigurationError::TooManyVariables`]
    ///   if `num_vars` is unusable.
    /// - [`ConfigurationError::ZeroLiteral`], [`ConfigurationError::EmptyClause`] or
    ///   [`ConfigurationError::LiteralOutOfRange`] for a malformed clause.
    /// - [`ConfigurationError::EmptyFormula`] if there are no clauses.
    pub fn new<I, C>(clauses: I, num_vars: usize) -> Result<Self>
    where
        I: IntoIterator<Item = C>,
        C: IntoIterator<Item = i32>,
    {
        if num_vars == 0 {
            return Err(ConfigurationError::ZeroVariables);
        }
        if num_vars > Literal::MAX_VARIABLE as usize {
            return Err(ConfigurationError::TooManyVariables { num_vars });
        }

        let clauses = clauses
            .into_iter()
            .enumerate()
            .map(|(i, raw)| Self::check_clause(i + 1, raw, num_vars))
            .collect::<Result<Vec<_>>>()?;

        if clauses.is_empty() {
            return Err(ConfigurationError::EmptyFormula);
        }

        Ok(Self { clauses, num_vars })
    }

    /// Builds a formula whose variable count is the largest variable it mentions.
    ///
    /// # Errors
    ///
    /// As [`Cnf::new`].
    pub fn from_clauses(clauses: Vec<Vec<i32>>) -> Result<Self> {
        if clauses.is_empty() {
            return Err(ConfigurationError::EmptyFormula);
        }
        // Malformed clauses would otherwise surface as `ZeroVariables`.
        for (i, raw) in clauses.iter().enumerate() {
            if raw.is_empty() {
                return Err(ConfigurationError::EmptyClause { clause: i + 1 });
            }
            if raw.contains(&0) {
                return Err(ConfigurationError::ZeroLiteral { clause: i + 1 });
            }
        }
        let num_vars = clauses
            .iter()
            .flatten()
            .map(|lit| lit.unsigned_abs() as usize)
            .max()
            .unwrap_or(0);
        Self::new(clauses, num_vars)
    }

    fn check_clause(
        clause: usize,
        raw: impl IntoIterator<Item = i32>,
        num_vars: usize,
    ) -> Result<Clause> {
        let literals = raw
            .into_iter()
            .map(|value| {
                if value == 0 {
                    return Err(ConfigurationError::ZeroLiteral { clause });
                }
                match Literal::from_i32(value) {
                    Some(lit) if lit.variable() as usize <= num_vars => Ok(lit),
                    _ => Err(ConfigurationError::LiteralOutOfRange {
                        literal: i64::from(value),
                        clause,
                        num_vars,
                    }),
                }
            })
            .collect::<Result<Clause>>()?;

        if literals.is_empty() {
            return Err(ConfigurationError::EmptyClause { clause });
        }
        Ok(literals)
    }

    /// The declared number of variables.
    #[must_use]
    pub const fn num_vars(&self) -> usize {
        self.num_vars
    }

    /// The clauses in order.
    #[must_use]
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Number of clauses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// Always `false`: a validated formula has at least one clause.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Total number of literal occurrences.
    #[must_use]
    pub fn num_literals(&self) -> usize {
        self.clauses.iter().map(Clause::len).sum()
    }

    /// Iterates over the clauses in order.
    pub fn iter(&self) -> impl Iterator<Item = &Clause> {
        self.clauses.iter()
    }

    /// Checks that `assignment` covers every variable and satisfies every clause.
    #[must_use]
    pub fn verify(&self, assignment: &Assignment) -> bool {
        assignment.num_vars() == self.num_vars
            && self.clauses.iter().all(|c| c.is_satisfied_by(assignment))
    }
}

/// Renders the formula in DIMACS.
impl Display for Cnf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "p cnf {} {}", self.num_vars, self.clauses.len())?;
        for clause in &self.clauses {
            for lit in clause {
                write!(f, "{lit} ")?;
            }
            writeln!(f, "0")?;
        }
        Ok(())
    }
}
