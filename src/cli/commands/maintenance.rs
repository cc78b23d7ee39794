//! Working directory maintenance commands: generate, backup and clean

use crate::app::services::fixtures::FixtureGenerator;
use crate::app::services::workspace::{Workspace, file_label};
use crate::cli::args::OutputFormat;
use crate::config::WorkspaceConfig;
use anyhow::{Context, Result};
use colored::*;
use serde_json::json;
use std::path::PathBuf;

/// Write every fixture input file
pub fn run_generate(config: &WorkspaceConfig, format: OutputFormat) -> Result<Vec<PathBuf>> {
    let files = FixtureGenerator::new(config)
        .generate_all()
        .context("Failed to generate fixture files")?;

    match format {
        OutputFormat::Human => {
            println!("{}", "Generated input files:".bright_green().bold());
            for file in &files {
                println!("  {}", file.display());
            }
        }
        OutputFormat::Json => println!("{}", json!({ "generated": files })),
    }
    Ok(files)
}

/// Copy every known file into a timestamped subdirectory
pub fn run_backup(config: &WorkspaceConfig, format: OutputFormat) -> Result<()> {
    let report = Workspace::new(config)
        .backup()
        .context("Backup failed")?;

    match (report, format) {
        (Some(report), OutputFormat::Human) => {
            println!(
                "{} {} files ({} bytes) to {}",
                "Backed up".bright_green().bold(),
                report.files.len(),
                report.bytes,
                report.directory.display()
            );
            for file in &report.files {
                println!("  {}", file_label(file));
            }
        }
        (Some(report), OutputFormat::Json) => {
            println!(
                "{}",
                serde_json::to_string_pretty(&report).context("Failed to serialize backup report")?
            );
        }
        (None, OutputFormat::Human) => println!(
            "{} {}",
            "Nothing to back up; working directory not found:".bright_yellow(),
            config.base_dir().display()
        ),
        (None, OutputFormat::Json) => println!("{}", json!({ "backup": null })),
    }
    Ok(())
}

/// Delete the working directory tree
pub fn run_clean(config: &WorkspaceConfig, format: OutputFormat) -> Result<()> {
    let removed = Workspace::new(config).clean().context("Clean failed")?;

    match format {
        OutputFormat::Human => match removed {
            Some(count) => println!(
                "{} {} ({} files)",
                "Removed".bright_green().bold(),
                config.base_dir().display(),
                count
            ),
            None => println!(
                "{} {}",
                "Nothing to clean; working directory not found:".bright_yellow(),
                config.base_dir().display()
            ),
        },
        OutputFormat::Json => println!(
            "{}",
            json!({ "directory": config.base_dir(), "files_removed": removed })
        ),
    }
    Ok(())
}
