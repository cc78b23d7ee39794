//! Working directory maintenance: creation, backup snapshots and cleanup

use crate::app::adapters::filesystem;
use crate::config::WorkspaceConfig;
use crate::constants::BACKUP_TIMESTAMP_FORMAT;
use crate::error::{ReservationError, Result};
use chrono::{Local, NaiveDateTime};
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Files copied by one backup
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackupReport {
    /// Snapshot directory created for this backup
    pub directory: PathBuf,
    /// Source files copied, sorted
    pub files: Vec<PathBuf>,
    /// Total bytes copied
    pub bytes: u64,
}

/// Operations on the working directory as a whole
#[derive(Debug, Clone)]
pub struct Workspace {
    config: WorkspaceConfig,
}

impl Workspace {
    pub fn new(config: &WorkspaceConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    pub fn config(&self) -> &WorkspaceConfig {
        &self.config
    }

    pub fn exists(&self) -> bool {
        self.config.base_dir().is_dir()
    }

    /// Create the working directory if missing
    pub fn prepare(&self) -> Result<()> {
        filesystem::ensure_dir(self.config.base_dir())?;
        debug!("Working directory ready: {}", self.config.base_dir().display());
        Ok(())
    }

    /// Existing fixed-name files plus every per-destination file, sorted and deduplicated
    pub fn known_files(&self) -> Result<Vec<PathBuf>> {
        let mut files: BTreeSet<PathBuf> = self
            .config
            .known_files()
            .into_iter()
            .filter(|path| path.is_file())
            .collect();

        let pattern = self.config.destination_glob();
        let matches =
            glob::glob(&pattern).map_err(|e| ReservationError::pattern(pattern.clone(), e))?;
        for entry in matches {
            match entry {
                Ok(path) if path.is_file() => {
                    files.insert(path);
                }
                Ok(_) => {}
                Err(e) => warn!("Skipping unreadable path while listing files: {}", e),
            }
        }

        Ok(files.into_iter().collect())
    }

    /// Copy every known file into a new timestamped subdirectory
    ///
    /// Returns `None` when the working directory does not exist.
    pub fn backup(&self) -> Result<Option<BackupReport>> {
        self.backup_at(Local::now().naive_local())
    }

    pub fn backup_at(&self, timestamp: NaiveDateTime) -> Result<Option<BackupReport>> {
        if !self.exists() {
            warn!(
                "Working directory {} does not exist; nothing to back up",
                self.config.base_dir().display()
            );
            return Ok(None);
        }

        let files = self.known_files()?;
        let directory = self.snapshot_dir(timestamp);
        filesystem::ensure_dir(&directory)?;

        let mut bytes = 0;
        for file in &files {
            let Some(name) = file.file_name() else {
                continue;
            };
            bytes += filesystem::copy_file(file, &directory.join(name))?;
        }

        info!(
            "Backed up {} files ({} bytes) to {}",
            files.len(),
            bytes,
            directory.display()
        );

        Ok(Some(BackupReport {
            directory,
            files,
            bytes,
        }))
    }

    /// Delete the whole working tree, returning the number of files removed
    ///
    /// Returns `None` when there was nothing to delete.
    pub fn clean(&self) -> Result<Option<usize>> {
        let removed = filesystem::remove_tree(self.config.base_dir())?;
        match removed {
            Some(count) => info!(
                "Removed {} ({} files)",
                self.config.base_dir().display(),
                count
            ),
            None => info!(
                "Working directory {} does not exist; nothing to clean",
                self.config.base_dir().display()
            ),
        }
        Ok(removed)
    }

    /// First free `backup_<timestamp>[_n]` directory name
    fn snapshot_dir(&self, timestamp: NaiveDateTime) -> PathBuf {
        let stem = format!(
            "{}{}",
            self.config.backup_prefix,
            timestamp.format(BACKUP_TIMESTAMP_FORMAT)
        );
        let base = self.config.base_dir();

        let mut candidate = base.join(&stem);
        let mut suffix = 1;
        while candidate.exists() {
            candidate = base.join(format!("{}_{}", stem, suffix));
            suffix += 1;
        }
        candidate
    }
}

/// File name of `path` for display
pub fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::fs;
    use tempfile::TempDir;

    fn timestamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 11, 2)
            .unwrap()
            .and_hms_opt(18, 30, 5)
            .unwrap()
    }

    fn workspace(temp_dir: &TempDir) -> Workspace {
        Workspace::new(&WorkspaceConfig::new(temp_dir.path().join("Reservas")))
    }

    #[test]
    fn test_prepare_and_clean() {
        let temp_dir = TempDir::new().unwrap();
        let workspace = workspace(&temp_dir);

        assert!(!workspace.exists());
        assert_eq!(workspace.clean().unwrap(), None);

        workspace.prepare().unwrap();
        fs::write(workspace.config().error_log_path(), "x\n").unwrap();
        fs::write(workspace.config().destination_path("lima"), "x\n").unwrap();

        assert_eq!(workspace.clean().unwrap(), Some(2));
        assert!(!workspace.exists());
    }

    #[test]
    fn test_known_files_include_destinations() {
        let temp_dir = TempDir::new().unwrap();
        let workspace = workspace(&temp_dir);
        workspace.prepare().unwrap();

        let config = workspace.config().clone();
        fs::write(config.master_path(), "a\n").unwrap();
        fs::write(config.error_log_path(), "b\n").unwrap();
        fs::write(config.destination_path("madrid"), "c\n").unwrap();
        fs::write(config.base_dir().join("notes.md"), "ignored\n").unwrap();

        let names: Vec<String> = workspace
            .known_files()
            .unwrap()
            .iter()
            .map(|p| file_label(p))
            .collect();

        assert_eq!(
            names,
            vec!["errores.log", "reservas_madrid.txt", "reservas_validas.txt"]
        );
    }

    #[test]
    fn test_backup_copies_into_timestamped_dir() {
        let temp_dir = TempDir::new().unwrap();
        let workspace = workspace(&temp_dir);
        workspace.prepare().unwrap();
        let config = workspace.config().clone();
        fs::write(config.reservations_path(), "asiento, nombre, clase\n").unwrap();
        fs::write(config.destination_path("paris"), "1A, Ana, Economy, París\n").unwrap();

        let report = workspace.backup_at(timestamp()).unwrap().unwrap();

        assert_eq!(report.directory, config.base_dir().join("backup_20241102_183005"));
        assert_eq!(report.files.len(), 2);
        assert!(report.bytes > 0);
        assert_eq!(
            fs::read_to_string(report.directory.join("reservas_paris.txt")).unwrap(),
            "1A, Ana, Economy, París\n"
        );
    }

    #[test]
    fn test_backup_same_second_gets_new_dir() {
        let temp_dir = TempDir::new().unwrap();
        let workspace = workspace(&temp_dir);
        workspace.prepare().unwrap();

        let first = workspace.backup_at(timestamp()).unwrap().unwrap();
        let second = workspace.backup_at(timestamp()).unwrap().unwrap();

        assert_ne!(first.directory, second.directory);
        assert!(second.directory.ends_with("backup_20241102_183005_1"));
        assert!(second.files.is_empty());
    }

    #[test]
    fn test_backup_without_workspace() {
        let temp_dir = TempDir::new().unwrap();
        assert_eq!(workspace(&temp_dir).backup_at(timestamp()).unwrap(), None);
    }
}
