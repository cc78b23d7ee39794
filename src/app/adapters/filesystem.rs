//! Filesystem helpers shared by the writers and maintenance commands
//!
//! Every helper opens, uses and drops its own handle, so no descriptor
//! outlives the call even when a write fails.

use crate::error::{ReservationError, Result};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use tracing::{debug, trace};
use walkdir::WalkDir;

/// Create `dir` and any missing parents
pub fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)
        .map_err(|e| ReservationError::io("Failed to create directory", dir, e))
}

/// Append one line (newline added) to `path`, creating the file if absent
pub fn append_line(path: &Path, line: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| ReservationError::io("Failed to open file for appending", path, e))?;

    writeln!(file, "{}", line)
        .map_err(|e| ReservationError::io("Failed to append line", path, e))?;

    trace!("Appended to {}: {:?}", path.display(), line);
    Ok(())
}

/// Replace the contents of `path` with `lines`, one per line
pub fn write_lines<S: AsRef<str>>(path: &Path, lines: &[S]) -> Result<()> {
    let mut content = String::new();
    for line in lines {
        content.push_str(line.as_ref());
        content.push('\n');
    }

    fs::write(path, content).map_err(|e| ReservationError::io("Failed to write file", path, e))?;
    debug!("Wrote {} lines to {}", lines.len(), path.display());
    Ok(())
}

/// Truncate `path` to zero length, creating it if absent
pub fn truncate(path: &Path) -> Result<()> {
    OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
        .map(drop)
        .map_err(|e| ReservationError::io("Failed to truncate file", path, e))
}

/// Whole file as a string, or `None` when it does not exist
pub fn read_if_exists(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(ReservationError::io("Failed to read file", path, e)),
    }
}

/// Copy `source` to `target`, returning the number of bytes copied
pub fn copy_file(source: &Path, target: &Path) -> Result<u64> {
    fs::copy(source, target).map_err(|e| ReservationError::io("Failed to copy file", source, e))
}

/// Number of regular files under `dir`, recursively
pub fn count_files(dir: &Path) -> Result<usize> {
    let mut count = 0;
    for entry in WalkDir::new(dir) {
        let entry = entry.map_err(|e| {
            ReservationError::directory_traversal(
                format!("Failed to walk {}", dir.display()),
                e,
            )
        })?;
        if entry.file_type().is_file() {
            count += 1;
        }
    }
    Ok(count)
}

/// Delete `dir` and everything beneath it
///
/// Returns the number of files removed, or `None` when `dir` did not exist.
pub fn remove_tree(dir: &Path) -> Result<Option<usize>> {
    if !dir.exists() {
        return Ok(None);
    }

    let files = count_files(dir)?;
    fs::remove_dir_all(dir)
        .map_err(|e| ReservationError::io("Failed to remove directory", dir, e))?;
    debug!("Removed {} ({} files)", dir.display(), files);
    Ok(Some(files))
}
