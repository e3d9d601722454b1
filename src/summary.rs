//! Counters accumulated over one run.

use crate::directory_mover::MoveOutcome;
use crate::movie_filter::CsvScan;
use std::path::PathBuf;

/// Tally of what a run read, selected and did.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub rows_read: usize,
    pub unreadable_rows: usize,
    pub candidates: usize,
    pub moved: usize,
    pub skipped: usize,
    pub failed: usize,
    /// Dry run only.
    pub would_move: usize,
    /// Dry run only.
    pub bytes_to_move: u64,
    /// Destination paths that were already taken, in processing order.
    pub conflicts: Vec<PathBuf>,
}

impl RunSummary {
    /// Starts a summary from the result of the CSV pass.
    pub fn from_scan(scan: &CsvScan) -> Self {
        Self {
            rows_read: scan.rows_read,
            unreadable_rows: scan.unreadable_rows,
            candidates: scan.candidates.len(),
            ..Self::default()
        }
    }

    /// Counts one candidate outcome.
    pub fn record(&mut self, outcome: &MoveOutcome) {
        match outcome {
            MoveOutcome::Moved { .. } => self.moved += 1,
            MoveOutcome::WouldMove { size_bytes, .. } => {
                self.would_move += 1;
                self.bytes_to_move += size_bytes;
            }
            MoveOutcome::Failed(_) => self.failed += 1,
            MoveOutcome::SkippedExistingTarget { target, .. } => {
                self.skipped += 1;
                self.conflicts.push(target.clone());
            }
            MoveOutcome::SkippedEmptyPath | MoveOutcome::SkippedMissingSource { .. } => {
                self.skipped += 1
            }
        }
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MoveError;

    #[test]
    fn test_record_counts_each_outcome() {
        let mut summary = RunSummary::default();

        summary.record(&MoveOutcome::Moved {
            source: PathBuf::from("/m/A"),
            target: PathBuf::from("/low/A"),
        });
        summary.record(&MoveOutcome::SkippedEmptyPath);
        summary.record(&MoveOutcome::SkippedMissingSource {
            source: PathBuf::from("/m/B"),
        });
        summary.record(&MoveOutcome::SkippedExistingTarget {
            source: PathBuf::from("/m/C"),
            target: PathBuf::from("/low/C"),
        });
        summary.record(&MoveOutcome::Failed(MoveError::NoBasename {
            source_path: PathBuf::from("/"),
        }));
        summary.record(&MoveOutcome::WouldMove {
            source: PathBuf::from("/m/D"),
            target: PathBuf::from("/low/D"),
            size_bytes: 2048,
        });

        assert_eq!(summary.moved, 1);
        assert_eq!(summary.skipped, 3);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.would_move, 1);
        assert_eq!(summary.bytes_to_move, 2048);
        assert_eq!(summary.conflicts, vec![PathBuf::from("/low/C")]);
        assert!(summary.has_failures());
    }

    #[test]
    fn test_from_scan_copies_counters() {
        let scan = CsvScan {
            rows_read: 10,
            unreadable_rows: 1,
            candidates: Vec::new(),
        };
        let summary = RunSummary::from_scan(&scan);

        assert_eq!(summary.rows_read, 10);
        assert_eq!(summary.unreadable_rows, 1);
        assert_eq!(summary.candidates, 0);
        assert!(summary.conflicts.is_empty());
        assert!(!summary.has_failures());
    }
}
