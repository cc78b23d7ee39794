//! Sample input files for the three pipeline stages
//!
//! The corrupt fixture deliberately mixes malformed lines in with good ones
//! so the error log has something to show.

use crate::app::adapters::filesystem;
use crate::app::models::RecordSchema;
use crate::config::WorkspaceConfig;
use crate::error::Result;
use std::path::PathBuf;
use tracing::info;

const BASIC_RECORDS: &[&str] = &[
    "12A, Juan Pérez, Economy",
    "14B, María López, Business",
    "3C, Ana Gómez, Business",
    "7F, Luis Martín, Economy",
    "1A, Carmen Ruiz, First",
];

const DESTINATION_RECORDS: &[&str] = &[
    "12A, Juan Pérez, Economy, Madrid",
    "14B, María López, Business, Bogotá",
    "3C, Ana Gómez, Business, París",
    "7F, Luis Martín, Economy, Nueva York",
    "1A, Carmen Ruiz, First, Madrid",
    "22D, Jorge Díaz, Economy, paris",
];

/// Lines that fail (or only just pass) four-field validation
const CORRUPT_RECORDS: &[&str] = &[
    "",
    "14B, María López, Business",
    "9D, Pedro Sanz, Economy, Lima, Ventanilla",
    ", , , ",
    "   ",
    "sin separadores",
];

/// Basic input: header plus three-field records
pub fn basic_fixture() -> Vec<String> {
    with_header(&RecordSchema::basic(), BASIC_RECORDS.iter().copied())
}

/// Destination input: header plus four-field records
pub fn destination_fixture() -> Vec<String> {
    with_header(&RecordSchema::destination(), DESTINATION_RECORDS.iter().copied())
}

/// Destination input with corrupt lines interleaved
pub fn corrupt_fixture() -> Vec<String> {
    let mut records = Vec::new();
    for (good, bad) in DESTINATION_RECORDS.iter().zip(CORRUPT_RECORDS) {
        records.push(*good);
        records.push(*bad);
    }
    with_header(&RecordSchema::destination(), records.into_iter())
}

fn with_header<'a>(schema: &RecordSchema, records: impl Iterator<Item = &'a str>) -> Vec<String> {
    std::iter::once(schema.header_line())
        .chain(records.map(str::to_string))
        .collect()
}

/// Writes fixture files into the working directory
#[derive(Debug, Clone)]
pub struct FixtureGenerator {
    config: WorkspaceConfig,
}

impl FixtureGenerator {
    pub fn new(config: &WorkspaceConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Overwrite the basic input file
    pub fn generate_basic(&self) -> Result<PathBuf> {
        self.write(self.config.reservations_path(), &basic_fixture())
    }

    /// Overwrite the destination input file
    pub fn generate_destinations(&self) -> Result<PathBuf> {
        self.write(self.config.destinations_path(), &destination_fixture())
    }

    /// Overwrite the corrupt destination input file
    pub fn generate_corrupt(&self) -> Result<PathBuf> {
        self.write(self.config.corrupt_fixture_path(), &corrupt_fixture())
    }

    /// Write every fixture, creating the working directory if needed
    pub fn generate_all(&self) -> Result<Vec<PathBuf>> {
        filesystem::ensure_dir(self.config.base_dir())?;
        Ok(vec![
            self.generate_basic()?,
            self.generate_destinations()?,
            self.generate_corrupt()?,
        ])
    }

    fn write(&self, path: PathBuf, lines: &[String]) -> Result<PathBuf> {
        filesystem::write_lines(&path, lines)?;
        info!("Generated {} ({} lines)", path.display(), lines.len());
        Ok(path)
    }
}
