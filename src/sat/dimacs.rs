#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! A parser for DIMACS CNF and the looser plain-text clause format.
//!
//! The DIMACS CNF format is a standard text-based format for representing
//! boolean satisfiability problems:
//! - Comment lines start with `c`.
//! - A problem line `p cnf <num_variables> <num_clauses>` declares the size.
//! - Everything else is a stream of whitespace-separated literals in which
//!   each clause is terminated by `0`. Line breaks carry no meaning.
//! - An optional `%` line marks the end of data.
//!
//! The plain-text format accepted by [`parse_text`] is line oriented: each
//! line is a clause, the trailing `0` is optional, and `c`/`p` lines are
//! skipped. Blank lines are skipped in both.
//!
//! The variable count of the resulting [`Cnf`] is, in order of preference: the
//! one passed by the caller, the one in the problem line, the largest variable
//! mentioned.

use crate::sat::cnf::Cnf;
use crate::sat::error::{ConfigurationError, Result};
use std::io::{self, BufRead};
use std::path::Path;

/// How clause boundaries are found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layout {
    /// Clauses end at `0` and may span lines; `p` lines are headers.
    Dimacs,
    /// Clauses end at `0` or at the end of the line; `c` and `p` lines are skipped.
    Lines,
}

/// Parses DIMACS formatted data from a `BufRead` source into a [`Cnf`].
///
/// A clause ends at its `0`, wherever that falls: one line may hold several
/// clauses and one clause may span several lines. Literals left pending at
/// the end of input form a final clause.
///
/// # Errors
///
/// - [`ConfigurationError::InvalidLiteral`] if a token on a clause line is not an integer.
/// - [`ConfigurationError::MalformedHeader`] if the problem line cannot be read.
/// - Any error [`Cnf::new`] raises for the collected clauses.
/// - [`ConfigurationError::Io`] if reading fails; the path is reported as `<input>`.
pub fn parse_dimacs<R: BufRead>(reader: R, num_vars: Option<usize>) -> Result<Cnf> {
    parse_clauses(reader, num_vars, Layout::Dimacs)
}

fn parse_clauses<R: BufRead>(reader: R, num_vars: Option<usize>, layout: Layout) -> Result<Cnf> {
    let mut clauses: Vec<Vec<i32>> = Vec::new();
    let mut pending: Vec<i32> = Vec::new();
    let mut header: Option<(usize, usize)> = None;

    for (i, line) in reader.lines().enumerate() {
        let line_no = i + 1;
        let line = line.map_err(|source| ConfigurationError::Io {
            path: "<input>".into(),
            source,
        })?;
        let mut parts = line.split_whitespace().peekable();

        match parts.peek() {
            Some(&"%") => break,
            None => continue,
            Some(first) if first.starts_with('c') => continue,
            Some(&"p") if layout == Layout::Dimacs => {
                header = Some(parse_header(&line, line_no)?);
                continue;
            }
            Some(first) if layout == Layout::Lines && first.starts_with('p') => continue,
            Some(_) => {}
        }

        for token in parts {
            let lit = token
                .parse::<i32>()
                .map_err(|_| ConfigurationError::InvalidLiteral {
                    token: token.to_string(),
                    line: line_no,
                })?;
            if lit == 0 {
                close_clause(&mut clauses, &mut pending);
            } else {
                pending.push(lit);
            }
        }

        if layout == Layout::Lines {
            close_clause(&mut clauses, &mut pending);
        }
    }
    close_clause(&mut clauses, &mut pending);

    if let Some((_, declared)) = header {
        if declared != clauses.len() {
            log::warn!(
                "Problem line declares {declared} clauses but {} were read",
                clauses.len()
            );
        }
    }

    match num_vars.or(header.map(|(vars, _)| vars)) {
        Some(n) => Cnf::new(clauses, n),
        None => Cnf::from_clauses(clauses),
    }
}

/// Moves the pending literals into a new clause. A bare terminator is not a clause.
fn close_clause(clauses: &mut Vec<Vec<i32>>, pending: &mut Vec<i32>) {
    if !pending.is_empty() {
        clauses.push(std::mem::take(pending));
    }
}

fn parse_header(line: &str, line_no: usize) -> Result<(usize, usize)> {
    let malformed = || ConfigurationError::MalformedHeader { line: line_no };
    let parts: Vec<&str> = line.split_whitespace().collect();
    match parts.as_slice() {
        ["p", "cnf", vars, clauses] => Ok((
            vars.parse().map_err(|_| malformed())?,
            clauses.parse().map_err(|_| malformed())?,
        )),
        _ => Err(malformed()),
    }
}

/// Parses the plain-text clause format, e.g. `"1 2\n-1 -2\n1 -2"`.
///
/// Each line is a clause; a `0` also ends one, so `"1 0 -1 0"` is two
/// clauses. Lines starting with `c` or `p` are skipped, so the variable count
/// comes from `num_vars` or the largest variable used.
///
/// # Errors
///
/// As [`parse_dimacs`], except that no header is ever read.
pub fn parse_text(input: &str, num_vars: Option<usize>) -> Result<Cnf> {
    parse_clauses(input.as_bytes(), num_vars, Layout::Lines)
}

/// Parses a DIMACS CNF file specified by its path.
///
/// # Errors
///
/// [`ConfigurationError::Io`] if the file cannot be opened or read, otherwise
/// as [`parse_dimacs`].
pub fn parse_file(file_path: impl AsRef<Path>, num_vars: Option<usize>) -> Result<Cnf> {
    let path = file_path.as_ref();
    let io_error = |source| ConfigurationError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = std::fs::File::open(path).map_err(io_error)?;
    let reader = io::BufReader::new(file);
    parse_dimacs(reader, num_vars).map_err(|e| match e {
        ConfigurationError::Io { source, .. } => io_error(source),
        other => other,
    })
}
