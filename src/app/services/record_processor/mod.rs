//! Record processing pipeline for reservation files
//!
//! Reads an input file line by line and sends every line to exactly one
//! place: valid records to the destination router and/or master file,
//! invalid lines to the error log and/or corrupt file.
//!
//! # Architecture
//!
//! - [`processor`] - `RecordProcessor` and the `ProcessingPlan` selecting outputs
//! - [`stats`] - Line counters and the per-run report
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use reservation_router::WorkspaceConfig;
//! use reservation_router::app::models::RecordSchema;
//! use reservation_router::app::services::record_processor::{ProcessingPlan, RecordProcessor};
//!
//! # fn example() -> reservation_router::Result<()> {
//! let config = WorkspaceConfig::new("Reservas");
//! let processor = RecordProcessor::new(&config, RecordSchema::destination(), ProcessingPlan::classify())?;
//! let report = processor.process_file(&config.destinations_path())?;
//!
//! for (file, count) in report.destination_summary() {
//!     println!("{}: {}", file, count);
//! }
//! # Ok(())
//! # }
//! ```

pub mod processor;
pub mod stats;

#[cfg(test)]
pub mod tests;

pub use processor::{ProcessingPlan, RecordProcessor};
pub use stats::{ProcessingReport, ProcessingStats};
