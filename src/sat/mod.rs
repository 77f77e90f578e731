//! The formula side: literals, clauses, validated CNF, assignments, input parsing.
pub mod assignment;
pub mod clause;
pub mod cnf;
pub mod dimacs;
pub mod error;
pub mod library;
pub mod literal;
