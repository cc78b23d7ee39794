//! Classification of a single line against a record schema

use crate::app::models::{InvalidReason, ParsedLine, RecordSchema};
use crate::constants::FIELD_SEPARATOR;
use tracing::trace;

/// Parser bound to one record schema
#[derive(Debug, Clone)]
pub struct RecordParser {
    schema: RecordSchema,
}

impl RecordParser {
    pub fn new(schema: RecordSchema) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> &RecordSchema {
        &self.schema
    }

    /// Classify one line (terminator optional)
    pub fn parse_line(&self, line: &str) -> ParsedLine {
        parse_line(line, &self.schema)
    }
}

/// Remove a trailing `\n` or `\r\n`
pub fn strip_line_terminator(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

/// Classify `line` against `schema`
///
/// Pure: the same line and schema always give the same result. Fields are
/// trimmed but otherwise unchecked, so `", , , "` is a valid four-field
/// record.
pub fn parse_line(line: &str, schema: &RecordSchema) -> ParsedLine {
    let raw_line = strip_line_terminator(line);

    if raw_line.trim().is_empty() {
        return ParsedLine::Invalid {
            reason: InvalidReason::EmptyLine,
            raw_line: raw_line.to_string(),
        };
    }

    let fields: Vec<String> = raw_line
        .split(FIELD_SEPARATOR)
        .map(|piece| piece.trim().to_string())
        .collect();

    if fields.len() != schema.field_count() {
        trace!(
            "Expected {} fields for schema '{}', got {}: {:?}",
            schema.field_count(),
            schema.name(),
            fields.len(),
            raw_line
        );
        return ParsedLine::Invalid {
            reason: InvalidReason::FieldCountMismatch {
                expected: schema.field_count(),
                received: fields.len(),
            },
            raw_line: raw_line.to_string(),
        };
    }

    ParsedLine::Valid {
        fields,
        raw_line: raw_line.to_string(),
    }
}
