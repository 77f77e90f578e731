#![deny(missing_docs)]
//! This crate simulates a DNA-computing style decision procedure for SAT.
//!
//! A population of candidate assignments ("strands") is generated, filtered
//! against each clause in turn, optionally amplified between filters, and
//! whatever survives is read back as satisfying assignments. Every operator
//! application is recorded as a step so the run can be replayed.
//!
//! It is a demonstration model, not a solver: there is no propagation, no
//! learning and no search, and a sampled run that finds nothing proves nothing.
//!
//! ```
//! use dna_sat::sat::cnf::Cnf;
//! use dna_sat::simulation::{SimulationConfig, simulate};
//!
//! let cnf = Cnf::new(vec![vec![1, 2], vec![-1, -2], vec![1, -2]], 2).unwrap();
//! let result = simulate(&cnf, SimulationConfig::default());
//! assert!(result.satisfiable());
//! assert_eq!(result.assignments()[0].to_literals(), vec![1, -2]);
//! ```

/// The `sat` module holds the formula side: literals, clauses, validated CNF,
/// assignments and input parsing.
pub mod sat;

/// The `simulation` module implements the population-filtering model.
pub mod simulation;
