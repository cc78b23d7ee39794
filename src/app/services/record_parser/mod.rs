//! Line-oriented parser for reservation records
//!
//! Each input line is classified on its own, with no quoting or escaping
//! support: a comma inside a field is indistinguishable from a separator.
//!
//! ## Usage
//!
//! ```rust
//! use reservation_router::app::models::{ParsedLine, RecordSchema};
//! use reservation_router::app::services::record_parser::RecordParser;
//!
//! let parser = RecordParser::new(RecordSchema::destination());
//! match parser.parse_line("12A, Juan Pérez, Economy, Madrid\n") {
//!     ParsedLine::Valid { fields, .. } => assert_eq!(fields[3], "Madrid"),
//!     ParsedLine::Invalid { reason, .. } => panic!("unexpected: {}", reason),
//! }
//! ```

pub mod parser;

#[cfg(test)]
pub mod tests;

pub use parser::{RecordParser, parse_line, strip_line_terminator};
