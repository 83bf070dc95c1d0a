//! Content domain: tests for tuning parsing and validation.

use super::{TuningFile, parse_tuning, sanitize_tuning, validate_tuning};

#[test]
fn test_default_tuning_is_valid() {
    let tuning = TuningFile::default();
    assert!(validate_tuning(&tuning).is_empty());
    assert_eq!(tuning.transition.middle_segment_multiplier, 2.5);
    assert_eq!(tuning.ports.angle_limit_degrees, 90.0);
}

#[test]
fn test_parse_partial_file_keeps_defaults() {
    let source = r#"(
        schema_version: 1,
        transition: (base_speed: 90.0),
    )"#;

    let tuning = parse_tuning(source, "inline").expect("should parse");
    assert_eq!(tuning.schema_version, 1);
    assert_eq!(tuning.transition.base_speed, 90.0);
    assert_eq!(tuning.transition.middle_segment_multiplier, 2.5);
    assert_eq!(tuning.movement.move_speed, 220.0);
}

#[test]
fn test_parse_error_names_origin() {
    let err = parse_tuning("(schema_version: ", "broken.ron").unwrap_err();
    assert_eq!(err.file, "broken.ron");
    assert!(err.to_string().starts_with("Failed to load broken.ron"));
}

#[test]
fn test_validation_flags_bad_values() {
    let mut tuning = TuningFile::default();
    tuning.transition.base_speed = 0.0;
    tuning.ports.angle_limit_degrees = 200.0;

    let errors = validate_tuning(&tuning);
    assert_eq!(errors.len(), 2);
    assert!(errors.iter().any(|e| e.field == "base_speed"));
    assert!(errors.iter().any(|e| e.field == "angle_limit_degrees"));
}

#[test]
fn test_sanitize_resets_only_failing_sections() {
    let mut tuning = TuningFile::default();
    tuning.transition.base_speed = -5.0;
    tuning.movement.move_speed = 300.0;

    let errors = validate_tuning(&tuning);
    let tuning = sanitize_tuning(tuning, &errors);

    assert_eq!(tuning.transition.base_speed, 180.0);
    assert_eq!(tuning.movement.move_speed, 300.0);
}
