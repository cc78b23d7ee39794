//! Reservation Router Library
//!
//! Validates plain-text, comma-separated reservation records and routes them
//! to output files.
//!
//! This library provides tools for:
//! - Classifying each input line as a valid record or a malformed line with a reason
//! - Turning destination names into filesystem-safe slugs
//! - Appending valid records to one file per destination
//! - Logging malformed lines with a timestamp to an append-only error log
//! - Maintaining the working directory (fixtures, backups, cleanup)

pub mod config;
pub mod constants;
pub mod error;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod destination_router;
        pub mod error_log;
        pub mod fixtures;
        pub mod record_parser;
        pub mod record_processor;
        pub mod text_normalizer;
        pub mod workspace;
    }
    pub mod adapters {
        pub mod filesystem;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{InvalidReason, ParsedLine, RecordSchema};
pub use app::services::text_normalizer::slugify;
pub use config::WorkspaceConfig;
pub use error::{ReservationError, Result};
