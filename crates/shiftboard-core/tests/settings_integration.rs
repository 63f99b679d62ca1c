//! Integration tests for loading settings files.

use shiftboard_core::{ConfigError, Settings};
use std::io::Write;

#[test]
fn test_missing_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let settings = Settings::load_from(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(settings, Settings::default());
}

#[test]
fn test_full_file_round_trip() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
base_url = "http://localhost:8080/v2"
request_timeout_secs = 3
refresh_interval_secs = 60
default_location_ids = ["147255", "9"]
"#
    )
    .unwrap();

    let settings = Settings::load_from(file.path()).unwrap();
    assert_eq!(settings.base_url, "http://localhost:8080/v2");
    assert_eq!(settings.request_timeout().as_secs(), 3);
    assert_eq!(settings.refresh_interval().as_secs(), 60);
    assert_eq!(settings.default_location_ids, vec!["147255", "9"]);
}

#[test]
fn test_syntax_error_is_parse_failure() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "request_timeout_secs = = 3").unwrap();

    let err = Settings::load_from(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::ParseFailed { .. }));
}

#[test]
fn test_bad_base_url_is_rejected() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, r#"base_url = "not a url""#).unwrap();

    let err = Settings::load_from(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "base_url"));
}
