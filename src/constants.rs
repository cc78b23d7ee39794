//! Application constants for the reservation router
//!
//! File names, separators and formats shared by the parser, the writers
//! and the command-line interface.

// =============================================================================
// Working Directory Layout
// =============================================================================

/// Default working directory, relative to the current directory
pub const DEFAULT_BASE_DIR: &str = "Reservas";

/// Environment variable that overrides the working directory
pub const BASE_DIR_ENV_VAR: &str = "RESERVAS_DIR";

/// Basic reservations input (seat, name, class)
pub const RESERVATIONS_FILE: &str = "reservas.txt";

/// Reservations input carrying a destination column
pub const DESTINATIONS_FILE: &str = "reservas_destinos.txt";

/// Destination input seeded with deliberately corrupt lines
pub const CORRUPT_FIXTURE_FILE: &str = "reservas_con_errores.txt";

/// Consolidated file of every record that passed validation
pub const MASTER_FILE: &str = "reservas_validas.txt";

/// Raw text of every line that failed validation
pub const CORRUPT_FILE: &str = "reservas_corruptas.txt";

/// Append-only diagnostic log for invalid lines
pub const ERROR_LOG_FILE: &str = "errores.log";

/// Prefix and extension of per-destination output files
pub const DESTINATION_FILE_PREFIX: &str = "reservas_";
pub const DESTINATION_FILE_EXTENSION: &str = "txt";

/// Prefix of timestamped backup directories
pub const BACKUP_DIR_PREFIX: &str = "backup_";

// =============================================================================
// Record Format
// =============================================================================

/// Field separator in input lines (no quoting or escaping)
pub const FIELD_SEPARATOR: char = ',';

/// Separator used when writing records back out
pub const CANONICAL_SEPARATOR: &str = ", ";

/// Field names of the three-column schema
pub const BASIC_FIELDS: &[&str] = &["asiento", "nombre", "clase"];

/// Field names of the four-column schema
pub const DESTINATION_FIELDS: &[&str] = &["asiento", "nombre", "clase", "destino"];

/// Name of the field that drives destination routing
pub const DESTINATION_FIELD: &str = "destino";

// =============================================================================
// Timestamps
// =============================================================================

/// Error log timestamp format
pub const LOG_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Backup directory suffix format
pub const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Shown in the summary when the error log is empty or missing
pub const EMPTY_ERROR_LOG_PLACEHOLDER: &str = "(no errors recorded)";
