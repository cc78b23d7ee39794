//! Pipeline stage commands
//!
//! Each stage prepares its input, runs the record processor with the right
//! schema and plan, then prints its summary.

use super::shared::print_report;
use crate::app::models::RecordSchema;
use crate::app::services::error_log::ErrorLog;
use crate::app::services::fixtures::FixtureGenerator;
use crate::app::services::record_processor::{ProcessingPlan, ProcessingReport, RecordProcessor};
use crate::app::services::workspace::Workspace;
use crate::cli::args::{OutputFormat, ProcessArgs};
use crate::config::WorkspaceConfig;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

/// Generate the basic file and validate it into the master and corrupt files
pub fn run_create_process(config: &WorkspaceConfig, format: OutputFormat) -> Result<ProcessingReport> {
    Workspace::new(config)
        .prepare()
        .context("Failed to create working directory")?;

    let input = FixtureGenerator::new(config)
        .generate_basic()
        .context("Failed to generate reservations file")?;

    let processor = RecordProcessor::new(config, RecordSchema::basic(), ProcessingPlan::consolidate())?;
    run_stage("create-process", config, &processor, &input, format)
}

/// Split the destination file into per-destination files
pub fn run_classify(config: &WorkspaceConfig, format: OutputFormat) -> Result<ProcessingReport> {
    Workspace::new(config)
        .prepare()
        .context("Failed to create working directory")?;

    let input = config.destinations_path();
    if !input.exists() {
        info!("{} not found; generating it", input.display());
        FixtureGenerator::new(config)
            .generate_destinations()
            .context("Failed to generate destinations file")?;
    }

    let processor = RecordProcessor::new(config, RecordSchema::destination(), ProcessingPlan::classify())?;
    run_stage("classify", config, &processor, &input, format)
}

/// Seed the corrupt file, reset the error log and process with every output enabled
pub fn run_process_errors(config: &WorkspaceConfig, format: OutputFormat) -> Result<ProcessingReport> {
    Workspace::new(config)
        .prepare()
        .context("Failed to create working directory")?;

    let input = FixtureGenerator::new(config)
        .generate_corrupt()
        .context("Failed to seed corrupt reservations file")?;

    let processor =
        RecordProcessor::new(config, RecordSchema::destination(), ProcessingPlan::with_errors())?;
    run_stage("process-errors", config, &processor, &input, format)
}

/// Every stage in order
pub fn run_all(config: &WorkspaceConfig, format: OutputFormat) -> Result<Vec<ProcessingReport>> {
    Ok(vec![
        run_create_process(config, format)?,
        run_classify(config, format)?,
        run_process_errors(config, format)?,
    ])
}

/// Process a user-supplied file
pub fn run_process(
    config: &WorkspaceConfig,
    args: &ProcessArgs,
    format: OutputFormat,
) -> Result<ProcessingReport> {
    let schema = args.schema.schema();
    let plan = ProcessingPlan {
        route_by_destination: schema.destination_index().is_some() && !args.no_route,
        write_master: args.consolidate,
        write_corrupt: args.consolidate,
        ..ProcessingPlan::default()
    }
    .with_error_log_reset(args.reset_log);

    // A missing input must not leave anything behind
    if args.input.is_file() {
        Workspace::new(config)
            .prepare()
            .context("Failed to create working directory")?;
    }

    let processor = RecordProcessor::new(config, schema, plan)?;
    run_stage("process", config, &processor, &args.input, format)
}

fn run_stage(
    stage: &str,
    config: &WorkspaceConfig,
    processor: &RecordProcessor,
    input: &Path,
    format: OutputFormat,
) -> Result<ProcessingReport> {
    let report = processor
        .process_file(input)
        .with_context(|| format!("Stage '{}' failed on {}", stage, input.display()))?;

    print_report(stage, &report, &ErrorLog::new(config), format)?;
    Ok(report)
}
