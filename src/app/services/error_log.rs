//! Append-only diagnostic log for invalid lines
//!
//! One entry per rejected line: `<YYYY-MM-DD HH:MM:SS>, <raw line>, <reason>`.
//! Entries are never rewritten or deduplicated; [`ErrorLog::reset`] is the
//! only way to shorten the file.

use crate::app::adapters::filesystem;
use crate::config::WorkspaceConfig;
use crate::constants::LOG_TIMESTAMP_FORMAT;
use crate::error::Result;
use chrono::{Local, NaiveDateTime};
use std::fmt::Display;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Writer for the run's error log
#[derive(Debug, Clone)]
pub struct ErrorLog {
    path: PathBuf,
}

impl ErrorLog {
    pub fn new(config: &WorkspaceConfig) -> Self {
        Self {
            path: config.error_log_path(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Truncate the log, creating it if absent
    pub fn reset(&self) -> Result<()> {
        filesystem::truncate(&self.path)?;
        info!("Error log reset: {}", self.path.display());
        Ok(())
    }

    /// Append an entry stamped with the current local time
    pub fn record(&self, raw_line: &str, reason: &impl Display) -> Result<()> {
        self.record_at(Local::now().naive_local(), raw_line, reason)
    }

    /// Append an entry with an explicit timestamp
    pub fn record_at(
        &self,
        timestamp: NaiveDateTime,
        raw_line: &str,
        reason: &impl Display,
    ) -> Result<()> {
        let entry = format_entry(timestamp, raw_line, reason);
        filesystem::append_line(&self.path, &entry)?;
        debug!("Logged invalid line: {}", entry);
        Ok(())
    }

    /// Current log content, `None` when the file does not exist
    pub fn contents(&self) -> Result<Option<String>> {
        filesystem::read_if_exists(&self.path)
    }
}

/// Render one log entry
pub fn format_entry(timestamp: NaiveDateTime, raw_line: &str, reason: &impl Display) -> String {
    format!(
        "{}, {}, {}",
        timestamp.format(LOG_TIMESTAMP_FORMAT),
        raw_line,
        reason
    )
}
