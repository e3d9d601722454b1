//! Command-line interface module for moviecull.
//!
//! This module handles all CLI-related functionality including:
//! - Argument parsing and threshold validation
//! - Destination preparation
//! - The CSV pass and candidate selection
//! - Per-candidate moves and the final summary

use crate::directory_mover::DirectoryMover;
use crate::error::{AppError, AppResult};
use crate::movie_filter::{self, Threshold};
use crate::output::OutputFormatter;
use crate::summary::RunSummary;
use clap::Parser;
use std::path::PathBuf;

/// CSV export read when `--csv-file` is not given.
pub const DEFAULT_CSV_FILE: &str = "plex_movies_export.csv";

/// Exit code for usage, input and destination errors.
pub const EXIT_FATAL: u8 = 1;
/// Exit code for a completed `--strict` run with failed moves.
pub const EXIT_MOVE_FAILURES: u8 = 2;

/// Move the directories of movies rated below a threshold.
#[derive(Parser, Debug)]
#[command(name = "moviecull", version)]
#[command(
    about = "Move the directories of movies rated below a threshold",
    long_about = "Reads a movie CSV export (rating in column 3, directory in column 5) and \
                  moves every movie rated strictly below <max_rating> into <destination_dir>. \
                  Existing entries in the destination are never overwritten."
)]
pub struct Cli {
    /// Movies rated strictly below this value are moved (e.g. 5 or 6.5)
    #[arg(value_name = "max_rating", value_parser = Threshold::parse)]
    pub max_rating: Threshold,

    /// Directory the movies are moved into; created if missing
    #[arg(value_name = "destination_dir")]
    pub destination: PathBuf,

    /// CSV export to read
    #[arg(short = 'c', long, env = "MOVIECULL_CSV", default_value = DEFAULT_CSV_FILE)]
    pub csv_file: PathBuf,

    /// Report what would be moved without touching the filesystem
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Exit with code 2 if any directory failed to move
    #[arg(long)]
    pub strict: bool,

    /// Print per-row diagnostics
    #[arg(short, long)]
    pub verbose: bool,
}

/// Inputs for one run, independent of how they were obtained.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub threshold: Threshold,
    pub destination: PathBuf,
    pub csv_file: PathBuf,
    pub dry_run: bool,
}

impl From<&Cli> for RunOptions {
    fn from(cli: &Cli) -> Self {
        Self {
            threshold: cli.max_rating,
            destination: cli.destination.clone(),
            csv_file: cli.csv_file.clone(),
            dry_run: cli.dry_run,
        }
    }
}

/// Runs the whole pipeline: validate, prepare, filter, move.
///
/// Only the fatal categories are returned as errors. Every per-candidate
/// problem is printed and counted in the returned [`RunSummary`].
///
/// # Examples
///
/// ```no_run
/// use moviecull::cli::{RunOptions, run_cli};
/// use moviecull::movie_filter::Threshold;
/// use std::path::PathBuf;
///
/// let options = RunOptions {
///     threshold: Threshold::parse("5").unwrap(),
///     destination: PathBuf::from("/srv/low-rated"),
///     csv_file: PathBuf::from("plex_movies_export.csv"),
///     dry_run: true,
/// };
/// match run_cli(&options) {
///     Ok(summary) => println!("{} candidates", summary.candidates),
///     Err(e) => eprintln!("Error: {}", e),
/// }
/// ```
pub fn run_cli(options: &RunOptions) -> AppResult<RunSummary> {
    if !options.csv_file.is_file() {
        return Err(AppError::CsvNotFound {
            path: options.csv_file.clone(),
        });
    }

    let mover = DirectoryMover::prepare(&options.destination, options.dry_run)?;
    if mover.is_dry_run() {
        OutputFormatter::dry_run_notice("No directories will be moved.");
    }
    OutputFormatter::info(&format!(
        "Destination ready: {}",
        mover.destination().display()
    ));
    OutputFormatter::info(&format!(
        "Reading '{}', selecting ratings below {}",
        options.csv_file.display(),
        options.threshold
    ));

    let scan = movie_filter::scan_file(&options.csv_file, options.threshold)?;
    let mut summary = RunSummary::from_scan(&scan);

    if scan.candidates.is_empty() {
        OutputFormatter::plain("No movies rated below the threshold.");
    }

    for candidate in &scan.candidates {
        log::debug!(
            "Line {}: rating {} -> '{}'",
            candidate.line,
            candidate.rating,
            candidate.directory
        );
        let outcome = mover.relocate(&candidate.directory);
        OutputFormatter::outcome(candidate.line, &outcome);
        summary.record(&outcome);
    }

    OutputFormatter::summary(&summary, mover.is_dry_run());
    Ok(summary)
}

/// Exit code for a run that reached the end of the pipeline.
pub fn completion_exit_code(summary: &RunSummary, strict: bool) -> u8 {
    if strict && summary.has_failures() {
        EXIT_MOVE_FAILURES
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_positional_arguments() {
        let cli = Cli::try_parse_from(["moviecull", "5.5", "/srv/low"]).expect("parse");

        assert_eq!(cli.max_rating.value(), 5.5);
        assert_eq!(cli.destination, PathBuf::from("/srv/low"));
        assert!(!cli.dry_run);
        assert!(!cli.strict);
    }

    #[test]
    fn test_parse_options() {
        let cli = Cli::try_parse_from([
            "moviecull",
            "--dry-run",
            "--strict",
            "-c",
            "export.csv",
            "3",
            "/srv/low",
        ])
        .expect("parse");

        let options = RunOptions::from(&cli);
        assert!(options.dry_run);
        assert!(cli.strict);
        assert_eq!(options.csv_file, PathBuf::from("export.csv"));
        assert_eq!(options.threshold.value(), 3.0);
    }

    #[test]
    fn test_parse_rejects_wrong_argument_count() {
        assert!(Cli::try_parse_from(["moviecull", "5"]).is_err());
        assert!(Cli::try_parse_from(["moviecull", "5", "/a", "/b"]).is_err());
    }

    #[test]
    fn test_parse_rejects_bad_threshold() {
        assert!(Cli::try_parse_from(["moviecull", "five", "/srv/low"]).is_err());
        assert!(Cli::try_parse_from(["moviecull", "1e2", "/srv/low"]).is_err());
    }

    #[test]
    fn test_completion_exit_code() {
        let mut summary = RunSummary::default();
        assert_eq!(completion_exit_code(&summary, true), 0);

        summary.failed = 1;
        assert_eq!(completion_exit_code(&summary, false), 0);
        assert_eq!(completion_exit_code(&summary, true), EXIT_MOVE_FAILURES);
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
