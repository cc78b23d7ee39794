//! Test utilities for the record parser
//!
//! Shared sample lines used across the parser test modules.

use crate::app::models::RecordSchema;
use crate::app::services::record_parser::RecordParser;

mod parser_tests;

/// Well-formed four-field lines with accented names and destinations
pub const VALID_DESTINATION_LINES: &[&str] = &[
    "12A, Juan Pérez, Economy, Madrid",
    "3C, Ana Gómez, Business, París",
    "7F,Luis Martín,Economy,Nueva York",
    "  21B ,  Carmen Ruiz  , First ,  Bogotá  ",
];

/// Lines that must be rejected by the four-field schema
pub const MALFORMED_DESTINATION_LINES: &[&str] = &[
    "",
    "   ",
    "14B, María López, Business",
    "9D, Pedro Sanz, Economy, Lima, extra",
    "single-field",
];

pub fn destination_parser() -> RecordParser {
    RecordParser::new(RecordSchema::destination())
}

pub fn basic_parser() -> RecordParser {
    RecordParser::new(RecordSchema::basic())
}
