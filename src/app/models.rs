//! Core data models for reservation processing
//!
//! This module defines the record schema, the tagged result of parsing a
//! line, and the reasons a line can be rejected.

use crate::constants::{
    BASIC_FIELDS, CANONICAL_SEPARATOR, DESTINATION_FIELD, DESTINATION_FIELDS, FIELD_SEPARATOR,
};
use crate::error::{ReservationError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Expected shape of a reservation line
///
/// A schema is an explicit value rather than a bare field count so the
/// three- and four-column pipelines cannot be mixed up silently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSchema {
    name: String,
    fields: Vec<String>,
}

impl RecordSchema {
    /// Build a schema from an ordered list of field names
    pub fn new(name: impl Into<String>, fields: &[&str]) -> Self {
        Self {
            name: name.into(),
            fields: fields.iter().map(|f| f.to_string()).collect(),
        }
    }

    /// Seat, passenger name and fare class
    pub fn basic() -> Self {
        Self::new("basic", BASIC_FIELDS)
    }

    /// Seat, passenger name, fare class and destination
    pub fn destination() -> Self {
        Self::new("destination", DESTINATION_FIELDS)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Position of a named field
    pub fn field_index(&self, field: &str) -> Option<usize> {
        self.fields.iter().position(|f| f == field)
    }

    /// Position of the destination field, if this schema has one
    pub fn destination_index(&self) -> Option<usize> {
        self.field_index(DESTINATION_FIELD)
    }

    /// Header line listing the field names
    pub fn header_line(&self) -> String {
        self.fields.join(CANONICAL_SEPARATOR)
    }

    /// True when `line` names exactly this schema's fields, ignoring case and padding
    pub fn is_header(&self, line: &str) -> bool {
        let pieces: Vec<&str> = line.split(FIELD_SEPARATOR).map(str::trim).collect();
        pieces.len() == self.fields.len()
            && pieces
                .iter()
                .zip(&self.fields)
                .all(|(piece, field)| piece.eq_ignore_ascii_case(field))
    }
}

impl FromStr for RecordSchema {
    type Err = ReservationError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "basic" | "3" => Ok(Self::basic()),
            "destination" | "4" => Ok(Self::destination()),
            other => Err(ReservationError::configuration(format!(
                "Unknown record schema '{}'. Expected 'basic' or 'destination'",
                other
            ))),
        }
    }
}

/// Why a line was rejected
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvalidReason {
    /// Line was empty or whitespace only
    EmptyLine,
    /// Line split into the wrong number of fields
    FieldCountMismatch { expected: usize, received: usize },
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidReason::EmptyLine => write!(f, "empty line"),
            InvalidReason::FieldCountMismatch { expected, received } => write!(
                f,
                "field count mismatch — expected {}, received {}",
                expected, received
            ),
        }
    }
}

/// Outcome of parsing one line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ParsedLine {
    /// Correctly shaped line with its trimmed fields
    Valid { fields: Vec<String>, raw_line: String },
    /// Malformed line, kept verbatim
    Invalid {
        reason: InvalidReason,
        raw_line: String,
    },
}

impl ParsedLine {
    pub fn is_valid(&self) -> bool {
        matches!(self, ParsedLine::Valid { .. })
    }

    /// Line without its terminator, exactly as read
    pub fn raw_line(&self) -> &str {
        match self {
            ParsedLine::Valid { raw_line, .. } | ParsedLine::Invalid { raw_line, .. } => raw_line,
        }
    }

    /// Fields of a valid line
    pub fn fields(&self) -> Option<&[String]> {
        match self {
            ParsedLine::Valid { fields, .. } => Some(fields),
            ParsedLine::Invalid { .. } => None,
        }
    }

    /// Reason of an invalid line
    pub fn reason(&self) -> Option<&InvalidReason> {
        match self {
            ParsedLine::Valid { .. } => None,
            ParsedLine::Invalid { reason, .. } => Some(reason),
        }
    }
}

/// Join fields into the form written to output files
pub fn canonical_line(fields: &[String]) -> String {
    fields.join(CANONICAL_SEPARATOR)
}
