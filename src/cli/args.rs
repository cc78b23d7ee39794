//! Command-line argument definitions for the reservation router
//!
//! This module defines the CLI interface using the clap derive API. Running
//! without a subcommand executes the full pipeline.

use crate::app::models::RecordSchema;
use crate::config::WorkspaceConfig;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the reservation router
///
/// Validates comma-separated reservation files, splits valid records by
/// destination and logs malformed lines with a timestamp and reason.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "reservas",
    version,
    about = "Validate reservation files and route records by destination",
    long_about = "Reads plain-text, comma-separated reservation records, separates well-formed \
                  records from malformed ones, writes valid records to one file per destination \
                  and appends every malformed line to a timestamped error log. Without a \
                  subcommand the full pipeline (run-all) is executed."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Working directory holding inputs, outputs, logs and backups
    ///
    /// Defaults to ./Reservas, or to $RESERVAS_DIR when set.
    #[arg(
        short = 'd',
        long = "base-dir",
        value_name = "PATH",
        global = true,
        help = "Working directory (default: ./Reservas or $RESERVAS_DIR)"
    )]
    pub base_dir: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Only show errors on stderr
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Suppress log output except errors"
    )]
    pub quiet: bool,

    /// Output format for run summaries
    #[arg(
        long = "output-format",
        value_enum,
        default_value = "human",
        global = true,
        help = "Output format for summaries"
    )]
    pub output_format: OutputFormat,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Create the working directory, generate the basic file and validate it into master files
    #[command(name = "create-process", alias = "create+process")]
    CreateProcess,

    /// Split the destination file into one file per destination
    #[command(name = "classify", alias = "classify-by-destination")]
    Classify,

    /// Seed a file with corrupt lines, reset the error log and process it
    #[command(name = "process-errors", alias = "process-with-errors")]
    ProcessErrors,

    /// Run create-process, classify and process-errors in order (default)
    #[command(name = "run-all", alias = "all")]
    RunAll,

    /// Process an arbitrary input file
    Process(ProcessArgs),

    /// Write every fixture input file, overwriting existing ones
    Generate,

    /// Copy every known file into a timestamped backup directory
    Backup,

    /// Delete the whole working directory
    Clean,
}

/// Arguments for the process command
#[derive(Debug, Clone, Parser)]
pub struct ProcessArgs {
    /// Input file, one record per line
    #[arg(short = 'i', long = "input", value_name = "FILE")]
    pub input: PathBuf,

    /// Record schema the lines are checked against
    #[arg(short = 's', long = "schema", value_enum, default_value = "destination")]
    pub schema: SchemaChoice,

    /// Do not split valid records by destination
    #[arg(long = "no-route")]
    pub no_route: bool,

    /// Write valid records to the master file and invalid lines to the corrupt file
    #[arg(long = "consolidate")]
    pub consolidate: bool,

    /// Truncate the error log before processing
    #[arg(long = "reset-log")]
    pub reset_log: bool,
}

/// Record schemas selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SchemaChoice {
    /// Seat, name, class
    Basic,
    /// Seat, name, class, destination
    Destination,
}

impl SchemaChoice {
    pub fn schema(self) -> RecordSchema {
        match self {
            SchemaChoice::Basic => RecordSchema::basic(),
            SchemaChoice::Destination => RecordSchema::destination(),
        }
    }
}

/// Output format options for summaries
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting, one document per stage
    Json,
}

impl Args {
    /// The requested command, defaulting to the full pipeline
    pub fn get_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::RunAll)
    }

    /// Determine the log level from the verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Working directory configuration after environment and flag overrides
    pub fn workspace_config(&self) -> WorkspaceConfig {
        WorkspaceConfig::load_layered(self.base_dir.clone())
    }
}
