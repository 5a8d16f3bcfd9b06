//! Tests for TOML config loading, creation, and path resolution.

use super::*;
use std::path::Path;

#[test]
fn load_from_nonexistent_is_file_not_found() {
    let err = load_from_path(Path::new("/tmp/nonexistent_memslot_config.toml")).unwrap_err();
    assert!(matches!(err, memslot_common::ConfigError::FileNotFound(_)));
}

#[test]
fn load_valid_partial_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[bridge]
offline = true

[host]
slot_count = 4
"#,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert!(config.bridge.offline);
    assert_eq!(config.host.slot_count, 4);
    // Defaults preserved
    assert_eq!(config.host.status_interval_ms, 500);
    assert_eq!(config.logging.level, "memslot=info");
    assert!(config.host.data_file.is_none());
}

#[test]
fn load_invalid_toml_returns_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "this is not valid toml {{{").unwrap();

    let err = load_from_path(&path).unwrap_err();
    assert!(matches!(err, memslot_common::ConfigError::ParseError(_)));
}

#[test]
fn out_of_range_values_are_kept() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[host]\nslot_count = 500\n").unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.host.slot_count, 500);
}

#[test]
fn create_and_load_default_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("memslot").join("config.toml");

    assert!(create_default_config(&path).unwrap());
    assert!(path.exists());

    let config = load_from_path(&path).unwrap();
    assert!(!config.bridge.offline);
    assert_eq!(config.host.slot_count, 10);
}

#[test]
fn data_file_override_parses_as_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[host]\ndata_file = \"/var/lib/memslot/slots.json\"\n").unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(
        config.host.data_file.as_deref(),
        Some(Path::new("/var/lib/memslot/slots.json"))
    );
}

#[test]
fn default_config_path_is_reasonable() {
    if let Ok(path) = default_config_path() {
        let path_str = path.to_string_lossy();
        assert!(path_str.contains("memslot"));
        assert!(path_str.ends_with("config.toml"));
    }
}

#[test]
fn load_or_create_writes_template_when_missing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("memslot").join("config.toml");

    let config = load_or_create(&path).unwrap();
    assert_eq!(config.host.slot_count, 10);
    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.starts_with("# memslot configuration"));
}

#[test]
fn load_or_create_keeps_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[host]\nslot_count = 4\n").unwrap();

    let config = load_or_create(&path).unwrap();
    assert_eq!(config.host.slot_count, 4);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "[host]\nslot_count = 4\n");
}

#[test]
fn unreadable_config_is_an_error_and_left_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    let original = b"[host]\nslot_count = 4\nexternal_url = \"https://x.example/\xff\"\n".to_vec();
    std::fs::write(&path, &original).unwrap();

    let err = load_or_create(&path).unwrap_err();
    assert!(matches!(err, memslot_common::ConfigError::ParseError(_)));
    assert_eq!(std::fs::read(&path).unwrap(), original);
}

#[test]
fn create_default_config_never_overwrites() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[bridge]\noffline = true\n").unwrap();

    assert!(!create_default_config(&path).unwrap());
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "[bridge]\noffline = true\n"
    );
}
