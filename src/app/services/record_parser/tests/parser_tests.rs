//! Tests for line classification

use super::*;
use crate::app::models::{InvalidReason, ParsedLine, RecordSchema};
use crate::app::services::record_parser::{parse_line, strip_line_terminator};

fn fields(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[test]
fn test_valid_destination_record() {
    let parsed = destination_parser().parse_line("12A, Juan Pérez, Economy, Madrid");

    assert_eq!(
        parsed,
        ParsedLine::Valid {
            fields: fields(&["12A", "Juan Pérez", "Economy", "Madrid"]),
            raw_line: "12A, Juan Pérez, Economy, Madrid".to_string(),
        }
    );
}

#[test]
fn test_short_record_is_field_count_mismatch() {
    let parsed = destination_parser().parse_line("14B, María López, Business");

    assert_eq!(
        parsed.reason(),
        Some(&InvalidReason::FieldCountMismatch {
            expected: 4,
            received: 3
        })
    );
    assert!(parsed.reason().unwrap().to_string().contains("expected 4, received 3"));
    assert_eq!(parsed.raw_line(), "14B, María López, Business");
}

#[test]
fn test_long_record_is_field_count_mismatch() {
    let parsed = destination_parser().parse_line("9D, Pedro Sanz, Economy, Lima, extra");
    assert_eq!(
        parsed.reason(),
        Some(&InvalidReason::FieldCountMismatch {
            expected: 4,
            received: 5
        })
    );
}

#[test]
fn test_empty_line_for_any_schema() {
    for schema in [RecordSchema::basic(), RecordSchema::destination()] {
        for line in ["", "   ", "\t", "\n", "  \r\n"] {
            let parsed = parse_line(line, &schema);
            assert_eq!(
                parsed.reason(),
                Some(&InvalidReason::EmptyLine),
                "line {:?} with schema {}",
                line,
                schema.name()
            );
            assert_eq!(parsed.reason().unwrap().to_string(), "empty line");
        }
    }
}

#[test]
fn test_four_empty_fields_are_valid() {
    let parsed = destination_parser().parse_line(", , , ");

    assert_eq!(
        parsed,
        ParsedLine::Valid {
            fields: fields(&["", "", "", ""]),
            raw_line: ", , , ".to_string(),
        }
    );
}

#[test]
fn test_fields_are_trimmed_but_raw_line_is_kept() {
    let line = "  21B ,  Carmen Ruiz  , First ,  Bogotá  ";
    let parsed = destination_parser().parse_line(line);

    assert_eq!(
        parsed.fields(),
        Some(fields(&["21B", "Carmen Ruiz", "First", "Bogotá"]).as_slice())
    );
    assert_eq!(parsed.raw_line(), line);
}

#[test]
fn test_line_terminators_are_stripped() {
    assert_eq!(strip_line_terminator("a, b, c\n"), "a, b, c");
    assert_eq!(strip_line_terminator("a, b, c\r\n"), "a, b, c");
    assert_eq!(strip_line_terminator("a, b, c"), "a, b, c");

    let parsed = basic_parser().parse_line("1A, Ana, Economy\r\n");
    assert_eq!(parsed.raw_line(), "1A, Ana, Economy");
    assert_eq!(parsed.fields().map(|f| f[2].as_str()), Some("Economy"));
}

#[test]
fn test_comma_inside_field_is_a_separator() {
    let parsed = basic_parser().parse_line("1A, López, Ana, Economy");
    assert_eq!(
        parsed.reason(),
        Some(&InvalidReason::FieldCountMismatch {
            expected: 3,
            received: 4
        })
    );
}

#[test]
fn test_same_line_different_schema() {
    let line = "12A, Juan Pérez, Economy";
    assert!(basic_parser().parse_line(line).is_valid());
    assert!(!destination_parser().parse_line(line).is_valid());
}

#[test]
fn test_parsing_is_pure() {
    let parser = destination_parser();
    for line in VALID_DESTINATION_LINES
        .iter()
        .chain(MALFORMED_DESTINATION_LINES)
    {
        assert_eq!(parser.parse_line(line), parser.parse_line(line));
    }
}

#[test]
fn test_sample_lines_classification() {
    let parser = destination_parser();
    assert!(VALID_DESTINATION_LINES
        .iter()
        .all(|line| parser.parse_line(line).is_valid()));
    assert!(MALFORMED_DESTINATION_LINES
        .iter()
        .all(|line| !parser.parse_line(line).is_valid()));
}
