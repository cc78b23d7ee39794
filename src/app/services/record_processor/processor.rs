//! Orchestration of a single input file through parser, router and sinks

use super::stats::{ProcessingReport, ProcessingStats};
use crate::app::adapters::filesystem;
use crate::app::models::{ParsedLine, RecordSchema, canonical_line};
use crate::app::services::destination_router::DestinationRouter;
use crate::app::services::error_log::ErrorLog;
use crate::app::services::record_parser::RecordParser;
use crate::config::WorkspaceConfig;
use crate::error::{ReservationError, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Which outputs a run writes besides the error log
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessingPlan {
    /// Append valid records to `reservas_<slug>.txt`
    pub route_by_destination: bool,
    /// Append valid records to the master file
    pub write_master: bool,
    /// Append raw invalid lines to the corrupt file
    pub write_corrupt: bool,
    /// Truncate the error log before the first line
    pub reset_error_log: bool,
}

impl ProcessingPlan {
    /// Split valid records by destination
    pub fn classify() -> Self {
        Self {
            route_by_destination: true,
            ..Self::default()
        }
    }

    /// Consolidate valid records into the master file and invalid ones into the corrupt file
    pub fn consolidate() -> Self {
        Self {
            write_master: true,
            write_corrupt: true,
            ..Self::default()
        }
    }

    /// Fresh error log, destination routing and the corrupt file
    ///
    /// The master file is left alone: it holds basic-schema records only.
    pub fn with_errors() -> Self {
        Self {
            route_by_destination: true,
            write_corrupt: true,
            reset_error_log: true,
            ..Self::default()
        }
    }

    pub fn with_error_log_reset(mut self, enabled: bool) -> Self {
        self.reset_error_log = enabled;
        self
    }
}

/// Reads an input file and sends each line to the right sink
///
/// One line is parsed and fully written (routed or logged) before the next
/// is looked at. Malformed lines never stop the run; write failures always
/// do, leaving files already written as they are.
#[derive(Debug, Clone)]
pub struct RecordProcessor {
    config: WorkspaceConfig,
    parser: RecordParser,
    plan: ProcessingPlan,
}

impl RecordProcessor {
    /// Fails when the plan routes by destination but the schema has no destination field
    pub fn new(config: &WorkspaceConfig, schema: RecordSchema, plan: ProcessingPlan) -> Result<Self> {
        if plan.route_by_destination && schema.destination_index().is_none() {
            return Err(ReservationError::configuration(format!(
                "Schema '{}' has no destination field; cannot route by destination",
                schema.name()
            )));
        }

        Ok(Self {
            config: config.clone(),
            parser: RecordParser::new(schema),
            plan,
        })
    }

    pub fn schema(&self) -> &RecordSchema {
        self.parser.schema()
    }

    pub fn plan(&self) -> ProcessingPlan {
        self.plan
    }

    /// Process `input_path`; a missing file yields a report with `input_found == false`
    pub fn process_file(&self, input_path: &Path) -> Result<ProcessingReport> {
        let error_log = ErrorLog::new(&self.config);

        if !input_path.is_file() {
            warn!("Input file not found: {}", input_path.display());
            return Ok(ProcessingReport::missing_input(
                input_path,
                self.schema().name(),
                error_log.path(),
            ));
        }

        let content = fs::read_to_string(input_path)
            .map_err(|e| ReservationError::io("Failed to read input file", input_path, e))?;

        info!(
            "Processing {} with schema '{}'",
            input_path.display(),
            self.schema().name()
        );

        self.process_content(input_path, &content)
    }

    /// Process already-loaded `content` as if read from `input_path`
    pub fn process_content(&self, input_path: &Path, content: &str) -> Result<ProcessingReport> {
        let error_log = ErrorLog::new(&self.config);
        if self.plan.reset_error_log {
            error_log.reset()?;
        }

        let mut router = if self.plan.route_by_destination {
            Some(DestinationRouter::new(&self.config, self.schema())?)
        } else {
            None
        };
        let master_path = self.config.master_path();
        let corrupt_path = self.config.corrupt_path();

        let mut stats = ProcessingStats::new();
        let mut lines = content.lines().peekable();

        if let Some(first) = lines.peek() {
            if self.schema().is_header(first) {
                debug!("Skipping header line: {:?}", first);
                stats.header_skipped = true;
                lines.next();
            }
        }

        for line in lines {
            match self.parser.parse_line(line) {
                ParsedLine::Valid { fields, .. } => {
                    if let Some(router) = router.as_mut() {
                        router.route(&fields)?;
                    }
                    if self.plan.write_master {
                        filesystem::append_line(&master_path, &canonical_line(&fields))?;
                        stats.master_records += 1;
                    }
                    stats.record_valid();
                }
                ParsedLine::Invalid { reason, raw_line } => {
                    debug!("Invalid line {:?}: {}", raw_line, reason);
                    error_log.record(&raw_line, &reason)?;
                    if self.plan.write_corrupt {
                        filesystem::append_line(&corrupt_path, &raw_line)?;
                        stats.corrupt_records += 1;
                    }
                    stats.record_invalid(&reason);
                }
            }
        }

        let destination_counts = router
            .map(DestinationRouter::into_counts)
            .unwrap_or_else(BTreeMap::new);

        let report = ProcessingReport {
            input_path: input_path.to_path_buf(),
            schema: self.schema().name().to_string(),
            input_found: true,
            stats,
            destination_counts,
            error_log_path: error_log.path().to_path_buf(),
        };

        info!("{}", report.summary());
        Ok(report)
    }
}
