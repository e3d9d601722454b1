//! Error types for moviecull.
//!
//! Two layers of failure exist. [`AppError`] covers the fatal categories that
//! stop the run before any directory is touched (bad arguments, missing CSV,
//! unusable destination). [`MoveError`] covers a single candidate and is only
//! ever reported, never propagated out of the processing loop.

use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors. Each one ends the process with exit code 1.
#[derive(Debug, Error)]
pub enum AppError {
    /// Bad command-line arguments.
    #[error("{0}")]
    Usage(String),

    /// The CSV source file is absent.
    #[error("CSV file not found: {}", path.display())]
    CsvNotFound { path: PathBuf },

    /// The CSV source exists but could not be opened.
    #[error("Could not open CSV file {}: {source}", path.display())]
    CsvUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The destination directory could not be created.
    #[error("Failed to create destination directory {}: {source}", path.display())]
    DestinationCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The destination path exists but is not a directory.
    #[error("Destination {} exists but is not a directory", path.display())]
    DestinationNotDirectory { path: PathBuf },
}

impl AppError {
    /// Whether the usage line should accompany this error on stderr.
    pub fn shows_usage(&self) -> bool {
        matches!(
            self,
            Self::Usage(_) | Self::CsvNotFound { .. } | Self::CsvUnreadable { .. }
        )
    }
}

/// Failure to relocate one candidate directory.
#[derive(Debug, Error)]
pub enum MoveError {
    /// The source path has no final component (`/`, `..`).
    #[error("path {} has no final component", source_path.display())]
    NoBasename { source_path: PathBuf },

    /// The move primitive itself failed.
    #[error("failed to move {} to {}: {source}", from.display(), to.display())]
    Io {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for fatal, run-level operations.
pub type AppResult<T> = Result<T, AppError>;
