//! Tests for the record processor

use super::*;
use crate::app::models::RecordSchema;
use crate::app::services::record_parser::parse_line;
use crate::app::services::record_processor::{ProcessingPlan, RecordProcessor};
use crate::error::ReservationError;

fn classify_processor(workspace: &TestWorkspace) -> RecordProcessor {
    RecordProcessor::new(
        &workspace.config,
        RecordSchema::destination(),
        ProcessingPlan::classify(),
    )
    .unwrap()
}

#[test]
fn test_routing_requires_destination_schema() {
    let workspace = TestWorkspace::new();
    let result = RecordProcessor::new(
        &workspace.config,
        RecordSchema::basic(),
        ProcessingPlan::classify(),
    );
    assert!(matches!(result, Err(ReservationError::Configuration { .. })));

    let result = RecordProcessor::new(
        &workspace.config,
        RecordSchema::basic(),
        ProcessingPlan::consolidate(),
    );
    assert!(result.is_ok());
}

#[test]
fn test_missing_input_is_reported_not_raised() {
    let workspace = TestWorkspace::new();
    let processor = RecordProcessor::new(
        &workspace.config,
        RecordSchema::destination(),
        ProcessingPlan::with_errors(),
    )
    .unwrap();

    let missing = workspace.temp_dir.path().join("nope.txt");
    let report = processor.process_file(&missing).unwrap();

    assert!(!report.input_found);
    assert_eq!(report.stats.lines_examined, 0);
    assert!(report.destination_counts.is_empty());
    // Nothing is created, not even the error log
    assert_eq!(fs::read_dir(workspace.temp_dir.path()).unwrap().count(), 0);
}

#[test]
fn test_mixed_input_classification() {
    let workspace = TestWorkspace::new();
    let input = workspace.write_input("input.txt", MIXED_DESTINATION_INPUT);

    let report = classify_processor(&workspace).process_file(&input).unwrap();

    assert!(report.input_found);
    assert!(report.stats.header_skipped);
    assert_eq!(report.stats.lines_examined, 8);
    assert_eq!(report.stats.valid_records, 5);
    assert_eq!(report.stats.invalid_records, 3);
    assert_eq!(report.stats.empty_lines, 1);
    assert_eq!(report.stats.field_count_mismatches, 2);
    assert!(report.stats.is_balanced());

    assert_eq!(
        report.destination_summary(),
        vec![
            ("reservas_.txt".to_string(), 1),
            ("reservas_madrid.txt".to_string(), 1),
            ("reservas_nueva_york.txt".to_string(), 1),
            ("reservas_paris.txt".to_string(), 2),
        ]
    );
}

#[test]
fn test_sum_property() {
    let workspace = TestWorkspace::new();
    let input = workspace.write_input("input.txt", MIXED_DESTINATION_INPUT);

    let report = classify_processor(&workspace).process_file(&input).unwrap();

    assert_eq!(
        report.routed_total() + report.stats.invalid_records,
        non_header_lines(MIXED_DESTINATION_INPUT)
    );
}

#[test]
fn test_scenario_madrid_record() {
    let workspace = TestWorkspace::new();
    let input = workspace.write_input("input.txt", "12A, Juan Pérez, Economy, Madrid\n");

    let report = classify_processor(&workspace).process_file(&input).unwrap();

    let madrid = workspace.config.destination_path("madrid");
    assert_eq!(report.destination_counts.get(&madrid), Some(&1));
    assert_eq!(workspace.read(&madrid), "12A, Juan Pérez, Economy, Madrid\n");
    assert!(!report.stats.header_skipped);
}

#[test]
fn test_scenario_short_record_logged_verbatim() {
    let workspace = TestWorkspace::new();
    let input = workspace.write_input("input.txt", "14B, María López, Business\n");

    let report = classify_processor(&workspace).process_file(&input).unwrap();
    assert_eq!(report.stats.invalid_records, 1);
    assert!(report.destination_counts.is_empty());

    let log = workspace.read(&workspace.config.error_log_path());
    let entry = log.lines().next().unwrap();
    let (timestamp, rest) = entry.split_at(19);
    assert!(chrono::NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%d %H:%M:%S").is_ok());
    assert!(rest.starts_with(", 14B, María López, Business, "));
    assert!(rest.contains("expected 4, received 3"));
}

#[test]
fn test_slug_collision_merges_counts() {
    let workspace = TestWorkspace::new();
    let input = workspace.write_input(
        "input.txt",
        "1A, Ana, Economy, París\n2B, Luis, Business, paris\n3C, Eva, First, PARIS\n",
    );

    let report = classify_processor(&workspace).process_file(&input).unwrap();

    assert_eq!(report.destination_counts.len(), 1);
    assert_eq!(report.routed_total(), 3);
    let paris = workspace.config.destination_path("paris");
    assert_eq!(workspace.read(&paris).lines().count(), 3);
}

#[test]
fn test_routed_files_round_trip() {
    let workspace = TestWorkspace::new();
    let input = workspace.write_input("input.txt", MIXED_DESTINATION_INPUT);
    let schema = RecordSchema::destination();

    let report = classify_processor(&workspace).process_file(&input).unwrap();

    let expected: Vec<Vec<String>> = MIXED_DESTINATION_INPUT
        .lines()
        .skip(1)
        .filter_map(|line| parse_line(line, &schema).fields().map(|f| f.to_vec()))
        .collect();

    let mut reparsed = Vec::new();
    for path in report.destination_counts.keys() {
        for line in workspace.read(path).lines() {
            let parsed = parse_line(line, &schema);
            assert!(parsed.is_valid(), "written line did not re-parse: {:?}", line);
            reparsed.push(parsed.fields().unwrap().to_vec());
        }
    }

    assert_eq!(reparsed.len(), expected.len());
    for fields in &expected {
        assert!(reparsed.contains(fields), "missing record {:?}", fields);
    }
}

#[test]
fn test_runs_append_without_reset() {
    let workspace = TestWorkspace::new();
    let input = workspace.write_input("input.txt", "14B, María López, Business\n");
    let processor = classify_processor(&workspace);

    processor.process_file(&input).unwrap();
    processor.process_file(&input).unwrap();

    let log = workspace.read(&workspace.config.error_log_path());
    assert_eq!(log.lines().count(), 2);
}

#[test]
fn test_reset_plan_truncates_log_first() {
    let workspace = TestWorkspace::new();
    let input = workspace.write_input("input.txt", "14B, María López, Business\n");
    let processor = RecordProcessor::new(
        &workspace.config,
        RecordSchema::destination(),
        ProcessingPlan::classify().with_error_log_reset(true),
    )
    .unwrap();

    processor.process_file(&input).unwrap();
    processor.process_file(&input).unwrap();

    let log = workspace.read(&workspace.config.error_log_path());
    assert_eq!(log.lines().count(), 1);
}

#[test]
fn test_consolidate_writes_master_and_corrupt_files() {
    let workspace = TestWorkspace::new();
    let input = workspace.write_input(
        "input.txt",
        "asiento, nombre, clase\n1A ,Ana, Economy\n2B, Luis\n\n3C, Eva, First\n",
    );
    let processor = RecordProcessor::new(
        &workspace.config,
        RecordSchema::basic(),
        ProcessingPlan::consolidate(),
    )
    .unwrap();

    let report = processor.process_file(&input).unwrap();

    assert_eq!(report.stats.master_records, 2);
    assert_eq!(report.stats.corrupt_records, 2);
    assert_eq!(
        workspace.read(&workspace.config.master_path()),
        "1A, Ana, Economy\n3C, Eva, First\n"
    );
    assert_eq!(workspace.read(&workspace.config.corrupt_path()), "2B, Luis\n\n");
    assert!(report.destination_counts.is_empty());
}

#[test]
fn test_four_empty_fields_routed_not_logged() {
    let workspace = TestWorkspace::new();
    let input = workspace.write_input("input.txt", ", , , \n");

    let report = classify_processor(&workspace).process_file(&input).unwrap();

    assert_eq!(report.stats.valid_records, 1);
    assert_eq!(report.stats.invalid_records, 0);
    assert!(!workspace.config.error_log_path().exists());
}

#[test]
fn test_header_only_skipped_on_first_line() {
    let workspace = TestWorkspace::new();
    let input = workspace.write_input(
        "input.txt",
        "1A, Ana, Economy, Lima\nasiento, nombre, clase, destino\n",
    );

    let report = classify_processor(&workspace).process_file(&input).unwrap();

    assert!(!report.stats.header_skipped);
    assert_eq!(report.stats.valid_records, 2);
    assert!(workspace.config.destination_path("destino").exists());
}

#[test]
fn test_write_failure_halts_run() {
    let workspace = TestWorkspace::new();
    let input = workspace.write_input("input.txt", MIXED_DESTINATION_INPUT);
    let config = workspace
        .config
        .clone()
        .with_base_dir(workspace.temp_dir.path().join("missing"));
    let processor =
        RecordProcessor::new(&config, RecordSchema::destination(), ProcessingPlan::classify())
            .unwrap();

    let result = processor.process_file(&input);
    assert!(matches!(result, Err(ReservationError::Io { .. })));
}

#[test]
fn test_non_utf8_input_aborts_before_any_output() {
    let workspace = TestWorkspace::new();
    let input = workspace.temp_dir.path().join("latin1.txt");
    // "París" encoded as Latin-1
    fs::write(&input, b"3C, Ana, Business, Par\xeds\n").unwrap();

    let processor = RecordProcessor::new(
        &workspace.config,
        RecordSchema::destination(),
        ProcessingPlan::with_errors(),
    )
    .unwrap();

    match processor.process_file(&input).unwrap_err() {
        ReservationError::Io { path, source, .. } => {
            assert_eq!(path, input);
            assert_eq!(source.kind(), std::io::ErrorKind::InvalidData);
        }
        other => panic!("Expected Io error, got {:?}", other),
    }

    // The whole file is rejected: no log, no routed or corrupt output
    assert!(!workspace.config.error_log_path().exists());
    assert!(!workspace.config.corrupt_path().exists());
    assert!(!workspace.config.destination_path("paris").exists());
}
