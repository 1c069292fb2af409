use super::*;

#[test]
fn partial_json_keeps_defaults() {
    let cfg = AnimatorConfig::from_json_str(r#"{ "adjacency_threshold": 2.5, "speed": 1.5 }"#).unwrap();
    assert_eq!(cfg.adjacency_threshold, 2.5);
    assert_eq!(cfg.speed, 1.5);
    assert_eq!(cfg.stroke_timing, TimingPolicy::stroke());
    assert_eq!(cfg.rest_offset, RestOffset::default());
    assert!(!cfg.count_scaling);
}

#[test]
fn empty_object_is_default() {
    assert_eq!(AnimatorConfig::from_json_str("{}").unwrap(), AnimatorConfig::default());
}

#[test]
fn rejects_out_of_range_values() {
    let err = AnimatorConfig::from_json_str(r#"{ "speed": 5.0 }"#).unwrap_err();
    assert!(err.to_string().starts_with("validation error:"));

    assert!(AnimatorConfig::from_json_str(r#"{ "adjacency_threshold": -1.0 }"#).is_err());

    let inverted = r#"{ "travel_timing": { "min_length": 10, "max_length": 1, "min_duration": 0.1, "max_duration": 0.2 } }"#;
    assert!(AnimatorConfig::from_json_str(inverted).is_err());
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = AnimatorConfig::from_json_str("{ nope").unwrap_err();
    assert!(matches!(err, GlyphPenError::Serde(_)));
}

#[test]
fn missing_file_mentions_path() {
    let err = AnimatorConfig::from_path(Path::new("/definitely/not/here.json")).unwrap_err();
    assert!(format!("{err:#}").contains("here.json"));
}
