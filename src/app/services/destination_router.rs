//! Destination-based routing of valid records
//!
//! Each valid record is appended to `reservas_<slug>.txt`, where the slug is
//! derived from the destination field. Routing depends only on the record;
//! the in-memory tally exists for the end-of-run summary.

use crate::app::adapters::filesystem;
use crate::app::models::{RecordSchema, canonical_line};
use crate::app::services::text_normalizer::slugify;
use crate::config::WorkspaceConfig;
use crate::error::{ReservationError, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Appends valid records to per-destination files and tallies them
#[derive(Debug)]
pub struct DestinationRouter {
    config: WorkspaceConfig,
    destination_index: usize,
    counts: BTreeMap<PathBuf, usize>,
}

impl DestinationRouter {
    /// Router for records shaped by `schema`
    ///
    /// Fails when the schema has no destination field.
    pub fn new(config: &WorkspaceConfig, schema: &RecordSchema) -> Result<Self> {
        let destination_index = schema.destination_index().ok_or_else(|| {
            ReservationError::configuration(format!(
                "Schema '{}' has no destination field; cannot route by destination",
                schema.name()
            ))
        })?;

        Ok(Self {
            config: config.clone(),
            destination_index,
            counts: BTreeMap::new(),
        })
    }

    /// Output file for a destination display name
    pub fn output_path(&self, destination: &str) -> PathBuf {
        self.config.destination_path(&slugify(destination))
    }

    /// Append `fields` to its destination file and return that file's path
    pub fn route(&mut self, fields: &[String]) -> Result<PathBuf> {
        let destination = fields.get(self.destination_index).ok_or_else(|| {
            ReservationError::configuration(format!(
                "Record has {} fields but the destination is field {}",
                fields.len(),
                self.destination_index + 1
            ))
        })?;

        let path = self.output_path(destination);
        if slugify(destination).is_empty() {
            warn!(
                "Destination {:?} has no filesystem-safe characters; routing to {}",
                destination,
                path.display()
            );
        }

        filesystem::append_line(&path, &canonical_line(fields))?;

        let count = self.counts.entry(path.clone()).or_insert(0);
        if *count == 0 {
            debug!("New destination file: {}", path.display());
        }
        *count += 1;

        Ok(path)
    }

    /// Records routed per output file, sorted by path
    pub fn counts(&self) -> &BTreeMap<PathBuf, usize> {
        &self.counts
    }

    /// Distinct output files written during this run
    pub fn touched_paths(&self) -> impl Iterator<Item = &Path> {
        self.counts.keys().map(PathBuf::as_path)
    }

    pub fn total_routed(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn into_counts(self) -> BTreeMap<PathBuf, usize> {
        self.counts
    }
}
