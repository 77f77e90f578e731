#![allow(clippy::cast_precision_loss)]

use clap::{ArgAction, Args, Parser, Subcommand};
use core::num::NonZeroUsize;
use dna_sat::sat::cnf::Cnf;
use dna_sat::sat::dimacs::{parse_file, parse_text};
use dna_sat::sat::error::ConfigurationError;
use dna_sat::sat::library::{EXAMPLES, example};
use dna_sat::simulation::config::{
    DEFAULT_AMPLIFICATION_FACTOR, DEFAULT_SAMPLE_SIZE, DEFAULT_SEED, GenerationMode,
    SimulationConfig, TraceDetail,
};
use dna_sat::simulation::rng::RngKind;
use dna_sat::simulation::{SimulationResult, simulate};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use thiserror::Error;
use tikv_jemalloc_ctl::{epoch, stats};

/// Strands printed under each step of the population-evolution table.
const TRACE_SAMPLES: usize = 4;

/// Defines the command-line interface for the simulator.
///
/// Uses `clap` for parsing arguments.
#[derive(Parser, Debug)]
#[command(
    name = "dna-sat",
    version,
    about = "Decide small SAT instances by simulated DNA population filtering",
    args_conflicts_with_subcommands = true
)]
pub(crate) struct Cli {
    /// An optional path argument. If provided without a subcommand,
    /// it's treated as the path to a DIMACS .cnf file to simulate.
    pub path: Option<PathBuf>,

    /// Specifies the subcommand to execute (e.g. `file`, `text`, `example`).
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Common options applicable when no subcommand is given.
    #[command(flatten)]
    pub common: CommonOptions,
}

/// Enumerates the available subcommands.
#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Simulate a CNF file in DIMACS format.
    File {
        /// Path to the DIMACS .cnf file.
        #[arg(long)]
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Simulate a CNF formula provided as plain text.
    Text {
        /// Clauses as text, one per line, literals separated by whitespace
        /// (e.g. "1 2\n-1 -2\n1 -2"). A trailing 0 is optional.
        #[arg(short, long)]
        input: String,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Simulate a built-in example formula, or list them when no name is given.
    Example {
        /// Name of the example.
        name: Option<String>,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Simulate every .cnf file under a directory.
    Dir {
        /// The directory to walk.
        #[arg(long)]
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Generate shell completion scripts.
    Completions {
        /// The shell to generate completions for.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Defines common command-line options shared across different subcommands.
#[derive(Args, Debug, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub(crate) struct CommonOptions {
    /// Enable debug logging for this crate (overridden by `RUST_LOG`).
    #[arg(short, long, default_value_t = false)]
    pub(crate) debug: bool,

    /// Check every surviving assignment against the formula.
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub(crate) verify: bool,

    /// Print run statistics after simulating.
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub(crate) stats: bool,

    /// Print the distinct surviving assignments.
    #[arg(short, long, default_value_t = false)]
    pub(crate) print_solution: bool,

    /// Maximum number of assignments printed with `--print-solution`.
    #[arg(long, default_value_t = 10)]
    pub(crate) max_solutions: usize,

    /// Print the population-evolution table.
    #[arg(short, long, default_value_t = false)]
    pub(crate) trace: bool,

    /// Keep at most this many strand handles per step.
    #[arg(long)]
    pub(crate) trace_cap: Option<usize>,

    /// Declared number of variables. Defaults to the problem line, then to the
    /// largest variable used.
    #[arg(short, long)]
    pub(crate) num_vars: Option<usize>,

    /// How the initial population is generated.
    #[arg(short, long, value_enum, default_value_t = GenerationMode::Full)]
    pub(crate) mode: GenerationMode,

    /// Strands drawn in sample mode.
    #[arg(long, default_value_t = DEFAULT_SAMPLE_SIZE)]
    pub(crate) sample_size: NonZeroUsize,

    /// Copies made of each survivor between clauses; 1 disables amplification.
    #[arg(short, long, default_value_t = DEFAULT_AMPLIFICATION_FACTOR)]
    pub(crate) amplification_factor: NonZeroUsize,

    /// Sampling seed.
    #[arg(long, default_value_t = DEFAULT_SEED, allow_negative_numbers = true)]
    pub(crate) seed: i64,

    /// Sampling draw source.
    #[arg(long, value_enum, default_value_t = RngKind::Lcg)]
    pub(crate) rng: RngKind,
}

impl CommonOptions {
    /// The simulation configuration these options describe.
    pub(crate) fn to_config(&self) -> SimulationConfig {
        SimulationConfig::default()
            .with_mode(self.mode)
            .with_sample_size(self.sample_size)
            .with_amplification_factor(self.amplification_factor)
            .with_seed(self.seed)
            .with_rng(self.rng)
            .with_trace(self.trace_cap.map_or(TraceDetail::Full, TraceDetail::Capped))
    }
}

/// Failures surfaced by the binary.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// The input could not be turned into a formula.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// A surviving assignment does not satisfy the formula.
    #[error("Assignment {assignment} failed verification")]
    Verification {
        /// The offending assignment.
        assignment: String,
    },

    /// `dir` was pointed at something that is not a directory.
    #[error("Provided path is not a directory: {}", path.display())]
    NotADirectory {
        /// The path given.
        path: PathBuf,
    },
}

/// Parses a DIMACS file and simulates it.
///
/// # Errors
///
/// If the file cannot be read or parsed, or verification fails.
pub(crate) fn simulate_file(path: &Path, common: &CommonOptions) -> Result<(), CliError> {
    let time = Instant::now();
    let cnf = parse_file(path, common.num_vars)?;
    let elapsed = time.elapsed();

    simulate_and_report(&cnf, common, Some(path), elapsed)
}

/// Parses plain-text clauses and simulates them.
///
/// # Errors
///
/// If the text cannot be parsed, or verification fails.
pub(crate) fn simulate_text(input: &str, common: &CommonOptions) -> Result<(), CliError> {
    let time = Instant::now();
    let cnf = parse_text(input, common.num_vars)?;
    let elapsed = time.elapsed();

    simulate_and_report(&cnf, common, None, elapsed)
}

/// Simulates a built-in example, or lists them all when `name` is `None`.
///
/// # Errors
///
/// If the name is unknown, or verification fails.
pub(crate) fn simulate_example(name: Option<&str>, common: &CommonOptions) -> Result<(), CliError> {
    let Some(name) = name else {
        for e in EXAMPLES {
            println!("{:<10} {:>2} vars  {}", e.name, e.num_vars, e.description);
        }
        return Ok(());
    };

    let time = Instant::now();
    let cnf = example(name)?;
    let elapsed = time.elapsed();

    println!("Example: {name}");
    simulate_and_report(&cnf, common, None, elapsed)
}

/// Simulates a directory of CNF files.
/// This function iterates over all `.cnf` files in the directory, parses each file,
/// simulates it, and reports the results. The first failing file stops the walk.
///
/// # Errors
///
/// If `path` is not a directory, or any file fails to parse or verify.
pub(crate) fn simulate_dir(path: &Path, common: &CommonOptions) -> Result<(), CliError> {
    if !path.is_dir() {
        return Err(CliError::NotADirectory {
            path: path.to_path_buf(),
        });
    }

    for entry in walkdir::WalkDir::new(path)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
    {
        let file_path = entry.path();
        if !entry.file_type().is_file() {
            continue;
        }
        if file_path.extension().is_none_or(|ext| ext != "cnf") {
            log::debug!("Skipping non-CNF file: {}", file_path.display());
            continue;
        }

        simulate_file(file_path, common)?;
    }

    Ok(())
}

/// Checks every surviving assignment against the formula.
///
/// # Errors
///
/// [`CliError::Verification`] naming the first assignment that fails.
pub(crate) fn verify_assignments(cnf: &Cnf, result: &SimulationResult) -> Result<(), CliError> {
    if let Some(bad) = result.assignments().iter().find(|a| !cnf.verify(a)) {
        return Err(CliError::Verification {
            assignment: bad.to_string(),
        });
    }
    if result.satisfiable() {
        println!("Verified: {} assignment(s)", result.assignments().len());
    }
    Ok(())
}

/// Runs the simulation and reports trace, solutions, statistics and verdict.
///
/// # Errors
///
/// If verification is enabled and an assignment fails it.
pub(crate) fn simulate_and_report(
    cnf: &Cnf,
    common: &CommonOptions,
    label: Option<&Path>,
    parse_time: Duration,
) -> Result<(), CliError> {
    if let Some(name) = label {
        println!("Simulating: {}", name.display());
    }
    log::debug!("CNF:\n{cnf}");

    let result = simulate(cnf, common.to_config());

    if common.trace {
        print_trace(&result);
    }

    if common.verify {
        verify_assignments(cnf, &result)?;
    }

    if common.print_solution {
        print_solutions(&result, common.max_solutions);
    }

    if common.stats {
        print_stats(parse_time, cnf, &result, memory_usage());
    }

    println!("\n{}", verdict(&result));
    Ok(())
}

/// The final verdict line. A sampled run that finds nothing proves nothing.
pub(crate) const fn verdict(result: &SimulationResult) -> &'static str {
    if result.satisfiable() {
        "SATISFIABLE"
    } else if result.exhaustive() {
        "UNSATISFIABLE"
    } else {
        "UNSATISFIABLE (within explored population)"
    }
}

/// Allocated and resident memory in MiB, if jemalloc reports them.
fn memory_usage() -> Option<(f64, f64)> {
    epoch::advance().ok()?;
    let allocated = stats::allocated::read().ok()?;
    let resident = stats::resident::read().ok()?;
    Some((
        allocated as f64 / (1024.0 * 1024.0),
        resident as f64 / (1024.0 * 1024.0),
    ))
}

/// Prints the population-evolution table: one row per step, then a few of
/// the strands it kept.
pub(crate) fn print_trace(result: &SimulationResult) {
    let peak = result.peak_population_size().max(1);

    println!("\n=======================[ Population Evolution ]=======================");
    for step in result.steps() {
        let share = step.size() as f64 * 100.0 / peak as f64;
        println!(
            "| {:>3}  {:<8} {:>10} {:>6.1}%  {}",
            step.index(),
            step.kind().name(),
            step.size(),
            share,
            step.description()
        );
        for id in step.population().iter().take(TRACE_SAMPLES) {
            if let Some(strand) = result.strand(*id) {
                println!("|         {:>8}  {strand}", id.to_string());
            }
        }
        if step.size() > TRACE_SAMPLES {
            println!("|         ... {} more", step.size() - TRACE_SAMPLES);
        }
    }
    println!("=====================================================================");
}

/// Prints at most `max` assignments, then how many were left out.
pub(crate) fn print_solutions(result: &SimulationResult, max: usize) {
    let assignments = result.assignments();
    if assignments.is_empty() {
        println!("No satisfying assignments found");
        return;
    }

    println!("Found {} unique solution(s)", assignments.len());
    for assignment in assignments.iter().take(max) {
        println!("  {assignment}");
    }
    if assignments.len() > max {
        println!("  ... and {} more solutions", assignments.len() - max);
    }
}

/// Helper function to print a single statistic line in a formatted table row.
///
/// # Arguments
/// * `label` - The description of the statistic.
/// * `value` - The value of the statistic, implementing `std::fmt::Display`.
pub(crate) fn stat_line(label: &str, value: impl std::fmt::Display) {
    println!("|  {label:<28} {value:>18}  |");
}

/// Prints a summary of problem and run statistics.
///
/// # Arguments
/// * `parse_time` - Duration spent parsing the input.
/// * `cnf` - The CNF formula.
/// * `result` - The finished run.
/// * `memory` - Allocated and resident memory in MiB, when available.
pub(crate) fn print_stats(
    parse_time: Duration,
    cnf: &Cnf,
    result: &SimulationResult,
    memory: Option<(f64, f64)>,
) {
    let elapsed_secs = result.runtime().as_secs_f64();
    let selections = result
        .steps()
        .iter()
        .filter(|s| s.clause().is_some())
        .count();

    println!("\n=======================[ Problem Statistics ]=========================");
    stat_line("Parse time (s)", format!("{:.3}", parse_time.as_secs_f64()));
    stat_line("Variables", cnf.num_vars());
    stat_line("Clauses", cnf.len());
    stat_line("Literals", cnf.num_literals());

    println!("======================[ Simulation Statistics ]======================");
    stat_line("Initial population", result.pool().len());
    stat_line("Peak population", result.peak_population_size());
    stat_line("Final population", result.final_population_size());
    stat_line("Clauses evaluated", selections);
    stat_line("Steps recorded", result.steps().len());
    stat_line("Distinct assignments", result.assignments().len());
    if let Some((allocated, resident)) = memory {
        stat_line("Memory usage (MiB)", format!("{allocated:.2}"));
        stat_line("Resident memory (MiB)", format!("{resident:.2}"));
    }
    stat_line("Run time (s)", format!("{elapsed_secs:.3}"));
    println!("=====================================================================");
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_options_map_to_config() {
        let cli = Cli::parse_from([
            "dna-sat",
            "text",
            "--input",
            "1 2",
            "--mode",
            "sample",
            "--sample-size",
            "50",
            "-a",
            "3",
            "--seed",
            "-7",
            "--rng",
            "fastrand",
            "--trace-cap",
            "8",
        ]);
        let Some(Commands::Text { input, common }) = cli.command else {
            panic!("expected the text subcommand");
        };
        assert_eq!(input, "1 2");
        let config = common.to_config();
        assert_eq!(config.mode, GenerationMode::Sample);
        assert_eq!(config.sample_size.get(), 50);
        assert_eq!(config.amplification_factor.get(), 3);
        assert_eq!(config.seed, -7);
        assert_eq!(config.rng, RngKind::Fastrand);
        assert_eq!(config.trace, TraceDetail::Capped(8));
    }

    #[test]
    fn test_defaults_match_library() {
        let cli = Cli::parse_from(["dna-sat", "example", "simple"]);
        let Some(Commands::Example { name, common }) = cli.command else {
            panic!("expected the example subcommand");
        };
        assert_eq!(name.as_deref(), Some("simple"));
        assert_eq!(common.to_config(), SimulationConfig::default());
        assert!(common.verify && common.stats);
    }

    #[test]
    fn test_zero_factor_is_rejected() {
        assert!(Cli::try_parse_from(["dna-sat", "text", "-i", "1", "-a", "0"]).is_err());
        assert!(Cli::try_parse_from(["dna-sat", "text", "-i", "1", "--sample-size", "0"]).is_err());
    }

    #[test]
    fn test_verdict() {
        let unsat = example("unsat").unwrap();
        let result = simulate(&unsat, SimulationConfig::default());
        assert_eq!(verdict(&result), "UNSATISFIABLE");

        let sampled = simulate(
            &unsat,
            SimulationConfig::default().with_mode(GenerationMode::Sample),
        );
        assert_eq!(verdict(&sampled), "UNSATISFIABLE (within explored population)");

        let sat = simulate(&example("simple").unwrap(), SimulationConfig::default());
        assert_eq!(verdict(&sat), "SATISFIABLE");
        assert!(verify_assignments(&example("simple").unwrap(), &sat).is_ok());
    }

    #[test]
    fn test_dir_rejects_files() {
        let common = Cli::parse_from(["dna-sat", "example"]);
        let Some(Commands::Example { common, .. }) = common.command else {
            panic!("expected the example subcommand");
        };
        assert!(matches!(
            simulate_dir(Path::new("Cargo.toml"), &common),
            Err(CliError::NotADirectory { .. })
        ));
    }
}
