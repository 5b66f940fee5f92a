//! Configuration tests

use super::*;
use std::collections::HashMap;

fn no_env(_: &str) -> Option<String> {
    None
}

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

fn parse(toml_str: &str) -> FileConfig {
    toml::from_str(toml_str).unwrap()
}

/// Serialized defaults must parse back to the same config
#[test]
fn test_config_roundtrip_default() {
    let config = Config::default();
    let file = parse(&config.to_toml());
    assert_eq!(Config::from_sources(file, no_env), config);
}

#[test]
fn test_config_roundtrip_custom() {
    let mut config = Config::default();
    config.default_language = "powershell".to_string();
    config.show_copy = false;
    config.tick_ms = 30;
    config.logging.file_rotation = LogRotation::Hourly;
    config.logging.file_dir = PathBuf::from(r"C:\logs\docsnip");

    let file = parse(&config.to_toml());
    assert_eq!(Config::from_sources(file, no_env), config);
}

#[test]
fn test_defaults() {
    let config = Config::from_sources(FileConfig::default(), no_env);
    assert_eq!(config.default_language, "bash");
    assert!(config.show_copy);
    assert_eq!(config.tick(), Duration::from_millis(50));
    assert!(config.mouse);
    assert!(!config.logging.file_enabled);
}

#[test]
fn test_env_overrides_file() {
    let file = parse(
        r#"
default_language = "json"
mouse = true
"#,
    );
    let env = env_from(&[
        ("DOCSNIP_DEFAULT_LANGUAGE", "powershell"),
        ("DOCSNIP_NO_MOUSE", "1"),
        ("DOCSNIP_LOG_DIR", "/tmp/docsnip-logs"),
    ]);
    let config = Config::from_sources(file, env);

    assert_eq!(config.default_language, "powershell");
    assert!(!config.mouse);
    assert!(config.logging.file_enabled);
    assert_eq!(config.logging.file_dir, PathBuf::from("/tmp/docsnip-logs"));
}

#[test]
fn test_file_overrides_defaults() {
    let file = parse(
        r#"
show_copy = false
tick_ms = 5

[logging]
level = "debug"
file_rotation = "NEVER"
"#,
    );
    let config = Config::from_sources(file, no_env);
    assert!(!config.show_copy);
    // Tick is floored
    assert_eq!(config.tick(), Duration::from_millis(10));
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.file_rotation, LogRotation::Never);
}

#[test]
fn test_no_mouse_ignores_falsy_values() {
    let env = env_from(&[("DOCSNIP_NO_MOUSE", "0")]);
    assert!(Config::from_sources(FileConfig::default(), env).mouse);
}

#[test]
fn test_unknown_rotation_is_daily() {
    assert_eq!(LogRotation::parse("weekly"), LogRotation::Daily);
    assert_eq!(LogRotation::parse(" Hourly "), LogRotation::Hourly);
}

#[test]
fn test_broken_file_is_an_error() {
    let dir = std::env::temp_dir().join(format!("docsnip-config-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("config.toml");
    std::fs::write(&path, "show_copy = maybe\n").unwrap();

    let err = Config::load_file_config(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to parse"));

    Config::write_default(&path).unwrap();
    assert!(Config::load_file_config(&path).is_ok());

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_missing_file_is_empty_config() {
    let file = Config::load_file_config(Path::new("/definitely/not/here.toml")).unwrap();
    assert!(file.default_language.is_none());
}

/// Copy feedback and anchor delay are fixed; stray keys are ignored
#[test]
fn test_timing_keys_are_not_configurable() {
    let file = parse(
        r#"
copy_feedback_ms = 0
anchor_delay_ms = 0
"#,
    );
    assert_eq!(Config::from_sources(file, no_env), Config::default());
    assert!(!Config::default().to_toml().contains("copy_feedback_ms"));
}

#[test]
fn test_template_is_written_once() {
    let dir = std::env::temp_dir().join(format!("docsnip-template-{}", std::process::id()));
    let path = dir.join("nested").join("config.toml");
    let _ = std::fs::remove_dir_all(&dir);

    assert!(Config::ensure_config_at(&path).unwrap());
    std::fs::write(&path, "show_copy = false\n").unwrap();
    assert!(!Config::ensure_config_at(&path).unwrap());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "show_copy = false\n");

    std::fs::remove_dir_all(&dir).unwrap();
}
