//! moviecull - move low-rated movies out of a library
//!
//! This library reads a CSV export of movie metadata, selects the movies rated
//! below a threshold, and moves their directories into a destination folder
//! without ever overwriting an existing entry.

pub mod cli;
pub mod directory_mover;
pub mod error;
pub mod logging;
pub mod movie_filter;
pub mod output;
pub mod summary;

pub use directory_mover::{DirectoryMover, MoveOutcome};
pub use error::{AppError, AppResult, MoveError};
pub use movie_filter::{Candidate, CsvScan, MovieRecord, Rating, Threshold};
pub use summary::RunSummary;

pub use cli::{Cli, RunOptions, run_cli};
