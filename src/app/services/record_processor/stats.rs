//! Processing statistics and result structures for a reservation run
//!
//! The report carries everything the summary needs: line counts, the
//! per-destination tally and where the error log lives.

use crate::app::models::InvalidReason;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Line-level counters for one input file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProcessingStats {
    /// Lines examined, excluding a recognised header
    pub lines_examined: usize,
    /// Whether the first line was skipped as a header
    pub header_skipped: bool,
    /// Lines classified valid
    pub valid_records: usize,
    /// Lines classified invalid
    pub invalid_records: usize,
    /// Invalid lines that were empty or whitespace only
    pub empty_lines: usize,
    /// Invalid lines with the wrong number of fields
    pub field_count_mismatches: usize,
    /// Valid records appended to the master file
    pub master_records: usize,
    /// Invalid lines appended to the corrupt file
    pub corrupt_records: usize,
}

impl ProcessingStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_valid(&mut self) {
        self.lines_examined += 1;
        self.valid_records += 1;
    }

    pub fn record_invalid(&mut self, reason: &InvalidReason) {
        self.lines_examined += 1;
        self.invalid_records += 1;
        match reason {
            InvalidReason::EmptyLine => self.empty_lines += 1,
            InvalidReason::FieldCountMismatch { .. } => self.field_count_mismatches += 1,
        }
    }

    /// Percentage of examined lines that were valid
    pub fn success_rate(&self) -> f64 {
        if self.lines_examined == 0 {
            100.0
        } else {
            (self.valid_records as f64 / self.lines_examined as f64) * 100.0
        }
    }

    /// Every examined line was classified exactly once
    pub fn is_balanced(&self) -> bool {
        self.valid_records + self.invalid_records == self.lines_examined
            && self.empty_lines + self.field_count_mismatches == self.invalid_records
    }
}

/// Result of processing one input file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessingReport {
    /// File that was (or would have been) read
    pub input_path: PathBuf,
    /// Name of the schema lines were checked against
    pub schema: String,
    /// False when the input file did not exist
    pub input_found: bool,
    pub stats: ProcessingStats,
    /// Records routed per destination file, sorted by path
    pub destination_counts: BTreeMap<PathBuf, usize>,
    /// Error log receiving this run's invalid lines
    pub error_log_path: PathBuf,
}

impl ProcessingReport {
    /// Report for an input file that does not exist
    pub fn missing_input(
        input_path: impl Into<PathBuf>,
        schema: impl Into<String>,
        error_log_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            input_path: input_path.into(),
            schema: schema.into(),
            input_found: false,
            stats: ProcessingStats::new(),
            destination_counts: BTreeMap::new(),
            error_log_path: error_log_path.into(),
        }
    }

    /// Total records written to per-destination files
    pub fn routed_total(&self) -> usize {
        self.destination_counts.values().sum()
    }

    /// `(file name, count)` pairs sorted by file name
    pub fn destination_summary(&self) -> Vec<(String, usize)> {
        let mut summary: Vec<(String, usize)> = self
            .destination_counts
            .iter()
            .map(|(path, count)| (display_name(path), *count))
            .collect();
        summary.sort();
        summary
    }

    /// One-line description for logs
    pub fn summary(&self) -> String {
        if !self.input_found {
            return format!("{}: input not found", self.input_path.display());
        }
        format!(
            "{}: {} lines, {} valid ({:.1}%), {} invalid, {} destination files",
            self.input_path.display(),
            self.stats.lines_examined,
            self.stats.valid_records,
            self.stats.success_rate(),
            self.stats.invalid_records,
            self.destination_counts.len()
        )
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
