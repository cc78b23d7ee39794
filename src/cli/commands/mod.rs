//! Command implementations for the reservation router CLI
//!
//! Each command lives in its own module:
//! - [`pipeline`] - the three processing stages, `run-all` and `process`
//! - [`maintenance`] - `generate`, `backup` and `clean`
//! - [`shared`] - logging setup and summary rendering

pub mod maintenance;
pub mod pipeline;
pub mod shared;

use crate::cli::args::{Args, Commands};
use anyhow::Result;
use tracing::debug;

/// Main command runner
///
/// Dispatches to the subcommand handler; without a subcommand the full
/// pipeline runs.
pub fn run(args: Args) -> Result<()> {
    shared::setup_logging(&args);
    debug!("Arguments: {:?}", args);

    let config = args.workspace_config();
    config.validate()?;
    let format = args.output_format;

    match args.get_command() {
        Commands::CreateProcess => pipeline::run_create_process(&config, format).map(drop),
        Commands::Classify => pipeline::run_classify(&config, format).map(drop),
        Commands::ProcessErrors => pipeline::run_process_errors(&config, format).map(drop),
        Commands::RunAll => pipeline::run_all(&config, format).map(drop),
        Commands::Process(process_args) => {
            pipeline::run_process(&config, &process_args, format).map(drop)
        }
        Commands::Generate => maintenance::run_generate(&config, format).map(drop),
        Commands::Backup => maintenance::run_backup(&config, format),
        Commands::Clean => maintenance::run_clean(&config, format),
    }
}
