//! Shared components for CLI commands
//!
//! Logging setup and summary rendering used by every command.

use crate::app::services::error_log::ErrorLog;
use crate::app::services::record_processor::ProcessingReport;
use crate::cli::args::{Args, OutputFormat};
use crate::constants::EMPTY_ERROR_LOG_PLACEHOLDER;
use anyhow::{Context, Result};
use colored::*;
use serde::Serialize;
use tracing::debug;

/// Set up structured logging on stderr
pub fn setup_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("reservation_router={}", log_level)));

    let result = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stderr),
        )
        .try_init();

    if result.is_ok() {
        debug!("Logging initialized at level: {}", log_level);
    }
}

/// JSON document emitted per stage
#[derive(Debug, Serialize)]
struct StageOutput<'a> {
    stage: &'a str,
    report: &'a ProcessingReport,
    error_log: Option<String>,
}

/// Print a stage report followed by the error log's current content
pub fn print_report(
    stage: &str,
    report: &ProcessingReport,
    error_log: &ErrorLog,
    format: OutputFormat,
) -> Result<()> {
    let log_content = error_log
        .contents()
        .with_context(|| format!("Failed to read error log {}", error_log.path().display()))?;

    match format {
        OutputFormat::Human => {
            print_human_report(stage, report, log_content.as_deref());
            Ok(())
        }
        OutputFormat::Json => {
            let output = StageOutput {
                stage,
                report,
                error_log: log_content,
            };
            println!(
                "{}",
                serde_json::to_string_pretty(&output).context("Failed to serialize report")?
            );
            Ok(())
        }
    }
}

fn print_human_report(stage: &str, report: &ProcessingReport, log_content: Option<&str>) {
    println!("\n{}", format!("== {} ==", stage).bright_green().bold());

    if !report.input_found {
        println!(
            "{} {}",
            "Input file not found:".bright_yellow(),
            report.input_path.display()
        );
        return;
    }

    println!("{} {}", "Input:".bright_cyan(), report.input_path.display());
    println!(
        "{} {} lines, {} valid, {} invalid ({:.1}% valid)",
        "Records:".bright_cyan(),
        report.stats.lines_examined,
        report.stats.valid_records.to_string().bright_white().bold(),
        report.stats.invalid_records.to_string().bright_white().bold(),
        report.stats.success_rate()
    );

    if report.stats.master_records > 0 || report.stats.corrupt_records > 0 {
        println!(
            "{} {} valid, {} corrupt",
            "Master files:".bright_cyan(),
            report.stats.master_records,
            report.stats.corrupt_records
        );
    }

    let summary = report.destination_summary();
    if !summary.is_empty() {
        println!("{}", "Valid records per destination file:".bright_cyan());
        for (file, count) in summary {
            println!("  {}: {}", file, count);
        }
    }

    println!(
        "{} {}",
        "Error log:".bright_cyan(),
        report.error_log_path.display()
    );
    println!("{}", error_log_text(log_content));
}

/// Error log content for display, or a placeholder when there is none
pub fn error_log_text(content: Option<&str>) -> String {
    match content {
        Some(text) if !text.trim().is_empty() => text.trim_end().to_string(),
        _ => EMPTY_ERROR_LOG_PLACEHOLDER.to_string(),
    }
}
