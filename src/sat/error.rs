//! Errors raised while turning user input into a formula the simulator can run.
//!
//! Every check happens once, at the boundary, before any simulation state exists.
//! The simulation engine itself has no error path: it only accepts a validated
//! [`Cnf`](crate::sat::cnf::Cnf).

use std::path::PathBuf;
use thiserror::Error;

/// The error raised when a formula or its surrounding configuration is unusable.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// The formula has no clauses at all.
    #[error("No valid clauses found")]
    EmptyFormula,

    /// A clause contains no literals.
    #[error("Clause {clause} is empty")]
    EmptyClause {
        /// 1-based index of the offending clause.
        clause: usize,
    },

    /// A clause contains the literal `0`.
    #[error("Clause {clause} contains the literal 0")]
    ZeroLiteral {
        /// 1-based index of the offending clause.
        clause: usize,
    },

    /// The declared variable count is zero.
    #[error("The number of variables must be at least 1")]
    ZeroVariables,

    /// The declared variable count cannot be addressed by a literal.
    #[error("{num_vars} variables is more than a literal can address")]
    TooManyVariables {
        /// The declared variable count.
        num_vars: usize,
    },

    /// A literal refers to a variable beyond the declared variable count.
    #[error("Literal {literal} in clause {clause} is out of range for {num_vars} variables")]
    LiteralOutOfRange {
        /// The offending literal.
        literal: i64,
        /// 1-based index of the clause containing it.
        clause: usize,
        /// The declared variable count.
        num_vars: usize,
    },

    /// A token in the textual input is not an integer.
    #[error("Failed to parse literal '{token}' on line {line}")]
    InvalidLiteral {
        /// The token as written.
        token: String,
        /// 1-based line number.
        line: usize,
    },

    /// A DIMACS problem line is not of the form `p cnf <vars> <clauses>`.
    #[error("Malformed problem line on line {line}")]
    MalformedHeader {
        /// 1-based line number.
        line: usize,
    },

    /// No built-in example has the requested name.
    #[error("Unknown example '{name}'")]
    UnknownExample {
        /// The requested name.
        name: String,
    },

    /// An input file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// The file being read.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}

/// Convenient result alias for boundary operations.
pub type Result<T> = std::result::Result<T, ConfigurationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_problem() {
        let err = ConfigurationError::LiteralOutOfRange {
            literal: -4,
            clause: 2,
            num_vars: 3,
        };
        assert_eq!(
            err.to_string(),
            "Literal -4 in clause 2 is out of range for 3 variables"
        );
        assert_eq!(
            ConfigurationError::EmptyFormula.to_string(),
            "No valid clauses found"
        );
    }
}
