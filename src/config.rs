//! Configuration management and validation.
//!
//! Every component receives a [`WorkspaceConfig`] at construction instead of
//! reading global paths, so tests can point a whole run at a temporary
//! directory.

use crate::constants::{
    BACKUP_DIR_PREFIX, BASE_DIR_ENV_VAR, CORRUPT_FILE, CORRUPT_FIXTURE_FILE, DEFAULT_BASE_DIR,
    DESTINATION_FILE_EXTENSION, DESTINATION_FILE_PREFIX, DESTINATIONS_FILE, ERROR_LOG_FILE,
    MASTER_FILE, RESERVATIONS_FILE,
};
use crate::error::{ReservationError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Locations of every input, output and log file used by a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    /// Directory holding all inputs, outputs, logs and backups
    pub base_dir: PathBuf,

    /// Basic (three-field) reservations input
    pub reservations_file: String,

    /// Destination (four-field) reservations input
    pub destinations_file: String,

    /// Destination input seeded with corrupt lines
    pub corrupt_fixture_file: String,

    /// Consolidated file of valid records
    pub master_file: String,

    /// Raw invalid lines
    pub corrupt_file: String,

    /// Timestamped diagnostics for invalid lines
    pub error_log_file: String,

    /// Prefix of per-destination files (`<prefix><slug>.<ext>`)
    pub destination_prefix: String,

    /// Extension of per-destination files, without the dot
    pub destination_extension: String,

    /// Prefix of backup snapshot directories
    pub backup_prefix: String,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from(DEFAULT_BASE_DIR),
            reservations_file: RESERVATIONS_FILE.to_string(),
            destinations_file: DESTINATIONS_FILE.to_string(),
            corrupt_fixture_file: CORRUPT_FIXTURE_FILE.to_string(),
            master_file: MASTER_FILE.to_string(),
            corrupt_file: CORRUPT_FILE.to_string(),
            error_log_file: ERROR_LOG_FILE.to_string(),
            destination_prefix: DESTINATION_FILE_PREFIX.to_string(),
            destination_extension: DESTINATION_FILE_EXTENSION.to_string(),
            backup_prefix: BACKUP_DIR_PREFIX.to_string(),
        }
    }
}

impl WorkspaceConfig {
    /// Default layout rooted at `base_dir`
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self::default().with_base_dir(base_dir)
    }

    /// Layered configuration: defaults, then the environment, then the flag
    pub fn load_layered(base_dir_override: Option<PathBuf>) -> Self {
        let mut config = Self::default();

        if let Ok(dir) = std::env::var(BASE_DIR_ENV_VAR) {
            if !dir.trim().is_empty() {
                debug!("Using {} from environment: {}", BASE_DIR_ENV_VAR, dir);
                config.base_dir = PathBuf::from(dir);
            }
        }

        if let Some(dir) = base_dir_override {
            debug!("Using base directory from command line: {}", dir.display());
            config.base_dir = dir;
        }

        config
    }

    /// Set the working directory
    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = base_dir.into();
        self
    }

    /// Set the error log file name
    pub fn with_error_log_file(mut self, name: impl Into<String>) -> Self {
        self.error_log_file = name.into();
        self
    }

    /// Set the master file name
    pub fn with_master_file(mut self, name: impl Into<String>) -> Self {
        self.master_file = name.into();
        self
    }

    /// Set the per-destination file prefix
    pub fn with_destination_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.destination_prefix = prefix.into();
        self
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn reservations_path(&self) -> PathBuf {
        self.base_dir.join(&self.reservations_file)
    }

    pub fn destinations_path(&self) -> PathBuf {
        self.base_dir.join(&self.destinations_file)
    }

    pub fn corrupt_fixture_path(&self) -> PathBuf {
        self.base_dir.join(&self.corrupt_fixture_file)
    }

    pub fn master_path(&self) -> PathBuf {
        self.base_dir.join(&self.master_file)
    }

    pub fn corrupt_path(&self) -> PathBuf {
        self.base_dir.join(&self.corrupt_file)
    }

    pub fn error_log_path(&self) -> PathBuf {
        self.base_dir.join(&self.error_log_file)
    }

    /// Output file for an already-slugified destination
    pub fn destination_path(&self, slug: &str) -> PathBuf {
        self.base_dir.join(format!(
            "{}{}.{}",
            self.destination_prefix, slug, self.destination_extension
        ))
    }

    /// Glob pattern matching every per-destination file
    pub fn destination_glob(&self) -> String {
        let base = glob::Pattern::escape(&self.base_dir.to_string_lossy());
        Path::new(&base)
            .join(format!(
                "{}*.{}",
                glob::Pattern::escape(&self.destination_prefix),
                glob::Pattern::escape(&self.destination_extension)
            ))
            .to_string_lossy()
            .into_owned()
    }

    /// Every fixed-name file of the layout, in a stable order
    pub fn known_files(&self) -> Vec<PathBuf> {
        vec![
            self.reservations_path(),
            self.destinations_path(),
            self.corrupt_fixture_path(),
            self.master_path(),
            self.corrupt_path(),
            self.error_log_path(),
        ]
    }

    /// Reject file names that would escape the working directory
    pub fn validate(&self) -> Result<()> {
        if self.base_dir.as_os_str().is_empty() {
            return Err(ReservationError::configuration(
                "base directory must not be empty",
            ));
        }

        let names = [
            ("reservations_file", &self.reservations_file),
            ("destinations_file", &self.destinations_file),
            ("corrupt_fixture_file", &self.corrupt_fixture_file),
            ("master_file", &self.master_file),
            ("corrupt_file", &self.corrupt_file),
            ("error_log_file", &self.error_log_file),
            ("destination_extension", &self.destination_extension),
            ("backup_prefix", &self.backup_prefix),
        ];

        for (field, name) in names {
            if name.trim().is_empty() {
                return Err(ReservationError::configuration(format!(
                    "{} must not be empty",
                    field
                )));
            }
            if name.contains('/') || name.contains('\\') {
                return Err(ReservationError::configuration(format!(
                    "{} must be a plain file name, got '{}'",
                    field, name
                )));
            }
        }

        if self.destination_prefix.contains('/') || self.destination_prefix.contains('\\') {
            return Err(ReservationError::configuration(format!(
                "destination_prefix must not contain path separators, got '{}'",
                self.destination_prefix
            )));
        }

        Ok(())
    }
}
