//! # Configuration Tests
//!
//! Defaults, deserialization (including aliases), validation and file loading.

use std::io::Write;

use pretty_assertions::assert_eq;
use rstest::rstest;
use slru_core::common::ConfigError;
use slru_core::config::*;

#[test]
fn test_slru_config_defaults() {
    let config = SlruConfig::default();
    assert_eq!(config.protected_size, 8);
    assert_eq!(config.probation_size, 8);
    assert_eq!(config.victim_selection, VictimSelection::DemoteProtected);
    assert!(config.validate().is_ok());
}

#[test]
fn test_cache_config_defaults() {
    let config = CacheConfig::default();
    assert_eq!(config.size_bytes, 1024);
    assert_eq!(config.line_bytes, 64);
    assert_eq!(config.ways, 4);
    assert_eq!(config.sets().unwrap(), 4);
    assert_eq!(config.slru, SlruConfig::default());
}

#[test]
fn test_missing_fields_use_defaults() {
    let config = SlruConfig::from_json("{}").unwrap();
    assert_eq!(config, SlruConfig::default());

    let cache: CacheConfig = serde_json::from_str(r#"{ "ways": 2 }"#).unwrap();
    assert_eq!(cache.ways, 2);
    assert_eq!(cache.size_bytes, 1024);
    assert_eq!(cache.slru, SlruConfig::default());
}

#[rstest]
#[case("\"demote_protected\"", VictimSelection::DemoteProtected)]
#[case("\"DemoteProtected\"", VictimSelection::DemoteProtected)]
#[case("\"fallback\"", VictimSelection::DemoteProtected)]
#[case("\"strict\"", VictimSelection::Strict)]
#[case("\"Strict\"", VictimSelection::Strict)]
fn test_victim_selection_names(#[case] json: &str, #[case] expected: VictimSelection) {
    let parsed: VictimSelection = serde_json::from_str(json).unwrap();
    assert_eq!(parsed, expected);
}

#[test]
fn test_full_cache_config_json() {
    let json = r#"{
        "size_bytes": 4096,
        "line_bytes": 32,
        "ways": 8,
        "slru": {
            "protected_size": 48,
            "probation_size": 80,
            "victim_selection": "strict"
        }
    }"#;
    let config = CacheConfig::from_json(json).unwrap();
    assert_eq!(config.sets().unwrap(), 16);
    assert_eq!(config.slru.protected_size, 48);
    assert_eq!(config.slru.probation_size, 80);
    assert_eq!(config.slru.victim_selection, VictimSelection::Strict);
}

#[test]
fn test_zero_protected_size_rejected() {
    let err = SlruConfig::from_json(r#"{ "protected_size": 0 }"#).unwrap_err();
    assert!(matches!(err, ConfigError::ZeroProtectedSize));
}

#[test]
fn test_zero_probation_size_rejected() {
    let err = SlruConfig::new(4, 0).validate().unwrap_err();
    assert!(matches!(err, ConfigError::ZeroProbationSize));
}

#[test]
fn test_malformed_json_is_a_parse_error() {
    let err = SlruConfig::from_json(r#"{ "protected_size": "many" }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[rstest]
#[case(1024, 48, 2)] // line not a power of two
#[case(1000, 64, 2)] // size not a multiple of a set
#[case(1024, 64, 0)] // no ways
#[case(0, 64, 2)] // empty cache
#[case(1024, 64, 1 << 60)] // line_bytes * ways overflows
#[case(1024, 64, usize::MAX)] // line_bytes * ways overflows
fn test_invalid_geometry(#[case] size_bytes: usize, #[case] line_bytes: usize, #[case] ways: usize) {
    let config = CacheConfig {
        size_bytes,
        line_bytes,
        ways,
        slru: SlruConfig::default(),
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidGeometry { .. })
    ));
}

#[test]
fn test_huge_ways_from_json_is_a_geometry_error() {
    let err = CacheConfig::from_json(
        r#"{ "size_bytes": 1024, "line_bytes": 64, "ways": 1152921504606846976 }"#,
    )
    .unwrap_err();
    match err {
        ConfigError::InvalidGeometry { reason, .. } => assert!(reason.contains("overflows")),
        other => panic!("expected InvalidGeometry, got {other:?}"),
    }
}

#[test]
fn test_from_json_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{ "protected_size": 3, "probation_size": 5, "victim_selection": "strict" }}"#
    )
    .unwrap();

    let config = SlruConfig::from_json_file(file.path()).unwrap();
    assert_eq!(
        config,
        SlruConfig::new(3, 5).with_victim_selection(VictimSelection::Strict)
    );
}

#[test]
fn test_missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");
    let err = SlruConfig::from_json_file(&path).unwrap_err();
    match err {
        ConfigError::Io { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("expected Io error, got {other:?}"),
    }
}
