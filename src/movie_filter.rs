//! CSV reading and rating-based candidate selection.
//!
//! The export is a CSV file with a header row. Only two columns matter: the
//! rating in the 3rd column and the movie directory in the 5th. Every other
//! column is ignored.
//!
//! A row becomes a [`Candidate`] when its rating is a real number strictly
//! below the [`Threshold`]. The `"N/A"` sentinel, non-numeric ratings and rows
//! too short to carry a directory never match.

use crate::error::{AppError, AppResult};
use regex::Regex;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::LazyLock;

/// Zero-based index of the rating column.
pub const RATING_COLUMN: usize = 2;
/// Zero-based index of the directory column.
pub const DIRECTORY_COLUMN: usize = 4;
/// Literal the export writes when no rating is available.
pub const UNAVAILABLE_RATING: &str = "N/A";

static THRESHOLD_GRAMMAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+(\.[0-9]+)?$").expect("threshold grammar is valid"));

/// Upper bound (exclusive) for selected ratings.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Threshold(f64);

impl Threshold {
    /// Parses a threshold written as digits with an optional decimal part.
    ///
    /// Signs, exponents and bare dots (`.5`, `5.`) are rejected so that the
    /// accepted grammar stays `^[0-9]+([.][0-9]+)?$`.
    ///
    /// # Examples
    ///
    /// ```
    /// use moviecull::movie_filter::Threshold;
    ///
    /// assert_eq!(Threshold::parse("6.5").unwrap().value(), 6.5);
    /// assert!(Threshold::parse("-1").is_err());
    /// ```
    pub fn parse(input: &str) -> AppResult<Self> {
        if !THRESHOLD_GRAMMAR.is_match(input) {
            return Err(AppError::Usage(format!(
                "'{}' is not a valid rating; expected a non-negative number such as 5 or 6.5",
                input
            )));
        }
        input
            .parse::<f64>()
            .map(Self)
            .map_err(|e| AppError::Usage(format!("'{}' is not a valid rating: {}", input, e)))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The rating column of one row.
#[derive(Debug, Clone, PartialEq)]
pub enum Rating {
    /// A finite numeric rating.
    Score(f64),
    /// The `"N/A"` sentinel.
    Unavailable,
    /// Anything else, kept verbatim for diagnostics.
    Invalid(String),
}

impl Rating {
    /// Interprets a raw rating field, stripping whitespace and quotes first.
    pub fn parse(raw: &str) -> Self {
        let value = strip_quotes(raw.trim()).trim();
        if value == UNAVAILABLE_RATING {
            return Rating::Unavailable;
        }
        match value.parse::<f64>() {
            Ok(score) if score.is_finite() => Rating::Score(score),
            _ => Rating::Invalid(value.to_string()),
        }
    }

    /// True when this rating is a number strictly below `threshold`.
    pub fn is_below(&self, threshold: Threshold) -> bool {
        match self {
            Rating::Score(score) => *score < threshold.value(),
            Rating::Unavailable | Rating::Invalid(_) => false,
        }
    }
}

/// The two interpreted columns of a CSV data row.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieRecord {
    /// 1-based line in the source file.
    pub line: u64,
    pub rating: Rating,
    /// Directory path with surrounding quotes removed.
    pub directory: String,
}

impl MovieRecord {
    /// Builds a record from raw fields, or `None` when the row has fewer
    /// than five fields.
    pub fn from_fields<'a, I>(line: u64, fields: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let fields: Vec<&str> = fields.into_iter().collect();
        if fields.len() <= DIRECTORY_COLUMN {
            return None;
        }

        Some(Self {
            line,
            rating: Rating::parse(fields[RATING_COLUMN]),
            directory: strip_quotes(fields[DIRECTORY_COLUMN]).to_string(),
        })
    }
}

/// A record selected for relocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub line: u64,
    pub rating: f64,
    pub directory: String,
}

/// Everything learned from one pass over the CSV.
#[derive(Debug, Default)]
pub struct CsvScan {
    /// Data rows read, header excluded.
    pub rows_read: usize,
    /// Rows the CSV reader could not decode.
    pub unreadable_rows: usize,
    /// Selected rows, in file order.
    pub candidates: Vec<Candidate>,
}

/// Reads CSV data from any reader and selects the rows rated below `threshold`.
///
/// Undecodable records are logged and counted but never abort the scan.
pub fn scan_reader<R: Read>(reader: R, threshold: Threshold) -> CsvScan {
    let mut csv_reader = csv_builder().from_reader(reader);
    let mut scan = CsvScan::default();

    for result in csv_reader.records() {
        scan.rows_read += 1;
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                log::warn!("Skipping unreadable CSV row: {}", e);
                scan.unreadable_rows += 1;
                continue;
            }
        };

        let line = record.position().map(|p| p.line()).unwrap_or(0);
        if let Some(candidate) = select(line, record.iter(), threshold) {
            scan.candidates.push(candidate);
        }
    }

    log::debug!(
        "Scanned {} rows, {} candidates below {}",
        scan.rows_read,
        scan.candidates.len(),
        threshold
    );
    scan
}

/// Opens the CSV file at `path` and scans it.
///
/// # Errors
///
/// Returns [`AppError::CsvNotFound`] when the file is absent or is not a
/// regular file, and [`AppError::CsvUnreadable`] when it cannot be opened.
pub fn scan_file(path: &Path, threshold: Threshold) -> AppResult<CsvScan> {
    if !path.is_file() {
        return Err(AppError::CsvNotFound {
            path: path.to_path_buf(),
        });
    }

    let file = File::open(path).map_err(|source| AppError::CsvUnreadable {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(scan_reader(file, threshold))
}

/// Applies the selection rule to one row.
fn select<'a, I>(line: u64, fields: I, threshold: Threshold) -> Option<Candidate>
where
    I: IntoIterator<Item = &'a str>,
{
    let Some(record) = MovieRecord::from_fields(line, fields) else {
        log::debug!("Line {}: fewer than 5 fields, ignored", line);
        return None;
    };

    let selected = record.rating.is_below(threshold);
    match record.rating {
        Rating::Score(score) if selected => Some(Candidate {
            line: record.line,
            rating: score,
            directory: record.directory,
        }),
        Rating::Score(score) => {
            log::debug!("Line {}: rating {} not below {}", line, score, threshold);
            None
        }
        Rating::Unavailable => {
            log::debug!("Line {}: no rating available", line);
            None
        }
        Rating::Invalid(raw) => {
            log::debug!("Line {}: non-numeric rating '{}'", line, raw);
            None
        }
    }
}

fn csv_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder.has_headers(true).flexible(true);
    builder
}

/// Removes any run of double quotes at either end of `value`.
fn strip_quotes(value: &str) -> &str {
    value.trim_matches('"')
}
