//! # dna-sat
//!
//! `dna-sat` decides small SAT instances the way a DNA computer would: it builds
//! a population of candidate assignments, filters it clause by clause,
//! amplifies the survivors between filters, and reports what is left.
//!
//! ## Usage
//!
//! ```sh
//! dna-sat [OPTIONS] [PATH]
//! dna-sat <SUBCOMMAND>
//! ```
//!
//! A bare `PATH` is treated as a DIMACS `.cnf` file.
//!
//! ### Subcommands
//!
//! 1.  **`file`**: Simulate a CNF file in DIMACS format.
//!     ```sh
//!     dna-sat file --path <path_to_cnf_file> [OPTIONS]
//!     ```
//!
//! 2.  **`text`**: Simulate clauses given as text, one clause per line.
//!     ```sh
//!     dna-sat text --input "1 2\n-1 -2\n1 -2" [OPTIONS]
//!     ```
//!
//! 3.  **`example`**: Simulate a built-in formula; without a name, list them.
//!     ```sh
//!     dna-sat example 3sat --trace
//!     ```
//!
//! 4.  **`dir`**: Simulate every `.cnf` file under a directory.
//!
//! 5.  **`completions`**: Print a shell completion script.
//!
//! ### Common Options
//!
//! -   `-m, --mode <full|sample>`: Enumerate every assignment (up to 15
//!     variables) or draw a seeded sample (default: `full`).
//! -   `--sample-size <N>`: Strands drawn in sample mode (default: `1000`).
//! -   `-a, --amplification-factor <K>`: Copies of each survivor between
//!     clauses; `1` disables amplification (default: `2`).
//! -   `--seed <S>` / `--rng <lcg|fastrand>`: Sampling seed and draw source.
//! -   `-n, --num-vars <N>`: Declared variable count.
//! -   `-t, --trace`: Print the population-evolution table.
//! -   `--trace-cap <N>`: Keep at most `N` strand handles per step.
//! -   `-p, --print-solution`: Print the surviving assignments.
//! -   `--verify <bool>` / `--stats <bool>`: Check assignments / print
//!     statistics (both default to `true`).
//! -   `-d, --debug`: Debug logging for this crate. `RUST_LOG` takes precedence.

use crate::command_line::cli::{
    Cli, Commands, simulate_dir, simulate_example, simulate_file, simulate_text,
};
use clap::{CommandFactory, Parser};
use log::LevelFilter;

mod command_line;

/// Global allocator using `tikv-jemallocator` for performance and memory
/// usage tracking.
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

/// Main entry point.
///
/// Parses command-line arguments, dispatches to the appropriate command handler,
/// and exits with status 1 on any error.
fn main() {
    let cli = Cli::parse();

    let debug = match &cli.command {
        Some(
            Commands::File { common, .. }
            | Commands::Text { common, .. }
            | Commands::Example { common, .. }
            | Commands::Dir { common, .. },
        ) => common.debug,
        Some(Commands::Completions { .. }) => false,
        None => cli.common.debug,
    };
    init_logging(debug);

    let outcome = match cli.command {
        Some(Commands::File { path, common }) => simulate_file(&path, &common),
        Some(Commands::Text { input, common }) => simulate_text(&input, &common),
        Some(Commands::Example { name, common }) => simulate_example(name.as_deref(), &common),
        Some(Commands::Dir { path, common }) => simulate_dir(&path, &common),
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            let bin_name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, bin_name, &mut std::io::stdout());
            Ok(())
        }
        None => match cli.path {
            Some(path) if path.is_dir() => simulate_dir(&path, &cli.common),
            Some(path) => simulate_file(&path, &cli.common),
            None => {
                eprintln!("No command provided. Use --help for more information.");
                std::process::exit(1);
            }
        },
    };

    if let Err(e) = outcome {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

/// Sets up `pretty_env_logger`. `RUST_LOG` wins; otherwise `--debug` turns on
/// debug output for this crate and everything else stays at `warn`.
fn init_logging(debug: bool) {
    let mut builder = pretty_env_logger::formatted_builder();
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    } else {
        builder.filter_level(LevelFilter::Warn);
        if debug {
            builder.filter_module("dna_sat", LevelFilter::Debug);
        }
    }
    builder.init();
}
