//! Output formatting and styling module.
//!
//! Provides a centralized interface for all console output: colored status
//! lines for each candidate, section headers and the end-of-run summary.
//! Informational and success lines go to stdout, warnings and errors to stderr.

use crate::directory_mover::MoveOutcome;
use crate::summary::RunSummary;
use colored::*;

/// Usage line printed alongside argument errors.
pub const USAGE: &str = "Usage: moviecull [OPTIONS] <max_rating> <destination_dir>";

/// Manages all CLI output with consistent styling and formatting.
///
/// This struct provides methods for:
/// - Success messages (green with ✓)
/// - Error messages (red with ✗)
/// - Warning messages (yellow with ⚠)
/// - Info messages (cyan)
/// - The per-candidate outcome line and the run summary
pub struct OutputFormatter;

impl OutputFormatter {
    /// Prints a success message in green with a checkmark.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use moviecull::output::OutputFormatter;
    /// OutputFormatter::success("Moved 'Bad Movie (1999)'");
    /// ```
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Prints an error message in red with an X mark.
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Prints a warning message in yellow with a warning symbol.
    pub fn warning(message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Prints an info message in cyan.
    pub fn info(message: &str) {
        println!("{}", message.cyan());
    }

    /// Prints a regular message without styling.
    pub fn plain(message: &str) {
        println!("{}", message);
    }

    /// Prints a section header.
    pub fn header(header: &str) {
        println!("\n{}", header.bold());
    }

    /// Prints a dry-run notice message.
    pub fn dry_run_notice(message: &str) {
        println!("{}", format!("[DRY RUN] {}", message).yellow());
    }

    /// Prints a fatal error followed, where useful, by the usage line.
    pub fn fatal(message: &str, with_usage: bool) {
        Self::error(message);
        if with_usage {
            eprintln!("{}", USAGE);
        }
    }

    /// Prints the status line for one candidate outcome.
    ///
    /// Empty paths are skipped without a line of their own.
    pub fn outcome(line: u64, outcome: &MoveOutcome) {
        match outcome {
            MoveOutcome::SkippedEmptyPath => {
                log::debug!("Line {}: empty directory path, skipped", line);
            }
            MoveOutcome::SkippedMissingSource { source } => Self::warning(&format!(
                "Line {}: SKIPPED, source '{}' not found",
                line,
                source.display()
            )),
            MoveOutcome::SkippedExistingTarget { target, .. } => Self::warning(&format!(
                "Line {}: SKIPPED, '{}' already exists",
                line,
                target.display()
            )),
            MoveOutcome::Moved { source, target } => Self::success(&format!(
                "Line {}: moved '{}' -> '{}'",
                line,
                source.display(),
                target.display()
            )),
            MoveOutcome::WouldMove {
                source,
                target,
                size_bytes,
            } => Self::dry_run_notice(&format!(
                "Line {}: would move '{}' -> '{}' ({})",
                line,
                source.display(),
                target.display(),
                format_bytes(*size_bytes)
            )),
            MoveOutcome::Failed(e) => Self::error(&format!("Line {}: FAILED, {}", line, e)),
        }
    }

    /// Prints the completion banner and counters for a run.
    pub fn summary(summary: &RunSummary, dry_run: bool) {
        Self::header("SUMMARY");

        let rows = [
            ("Rows read", summary.rows_read.to_string().normal()),
            ("Candidates", summary.candidates.to_string().normal()),
            ("Moved", summary.moved.to_string().green()),
            ("Skipped", summary.skipped.to_string().yellow()),
            ("Failed", summary.failed.to_string().red()),
        ];
        let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);

        for (label, value) in &rows {
            println!("{:<width$} | {}", label, value, width = width);
        }
        if summary.unreadable_rows > 0 {
            println!(
                "{:<width$} | {}",
                "Unreadable",
                summary.unreadable_rows.to_string().yellow(),
                width = width
            );
        }

        if dry_run {
            Self::header("DRY RUN");
            println!(
                "{} {} would be moved, {} in total.",
                summary.would_move,
                if summary.would_move == 1 {
                    "directory"
                } else {
                    "directories"
                },
                format_bytes(summary.bytes_to_move).bold()
            );
            if !summary.conflicts.is_empty() {
                println!(
                    "{}",
                    format!("Conflicts detected: {}", summary.conflicts.len()).yellow()
                );
                for target in &summary.conflicts {
                    println!("  - '{}' already exists", target.display());
                }
            }
            println!("Run again without --dry-run to move them.");
        }

        println!("\n{}", "Done.".bold());
    }
}

/// Formats a byte count with binary units and two decimals.
///
/// # Example
///
/// ```
/// use moviecull::output::format_bytes;
/// assert_eq!(format_bytes(1536), "1.50 KB");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.2} {}", value, UNITS[unit])
}
