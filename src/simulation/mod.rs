//! The population-filtering model.
//!
//! Candidates ("strands") are generated up front, then filtered clause by
//! clause and optionally amplified between filters; whatever survives the last
//! clause is a model of the formula.
pub mod config;
pub mod engine;
pub mod operators;
pub mod population;
pub mod rng;
pub mod step;
pub mod strand;
pub mod token;

pub use config::{GenerationMode, SimulationConfig, TraceDetail};
pub use engine::{SimulationResult, Simulator, simulate};
pub use step::{Step, StepKind};
