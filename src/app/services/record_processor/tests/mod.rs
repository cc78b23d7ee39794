//! Tests for the record processing pipeline
//!
//! Every test runs against its own temporary working directory.

pub mod processor_tests;

use crate::config::WorkspaceConfig;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Destination input with a header, accented names and three bad lines
pub const MIXED_DESTINATION_INPUT: &str = "asiento, nombre, clase, destino
12A, Juan Pérez, Economy, Madrid
14B, María López, Business
3C, Ana Gómez, Business, París

7F, Luis Martín, Economy, paris
, , , 
9D, Pedro Sanz, Economy, Nueva York
21B, Carmen Ruiz, First, Madrid, extra
";

/// Temporary working directory with its configuration
pub struct TestWorkspace {
    pub temp_dir: TempDir,
    pub config: WorkspaceConfig,
}

impl TestWorkspace {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let config = WorkspaceConfig::new(temp_dir.path());
        Self { temp_dir, config }
    }

    /// Write `content` to `name` inside the workspace
    pub fn write_input(&self, name: &str, content: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    pub fn read(&self, path: &PathBuf) -> String {
        fs::read_to_string(path).unwrap()
    }
}

/// Lines of `content` after the header
pub fn non_header_lines(content: &str) -> usize {
    content.lines().skip(1).count()
}
