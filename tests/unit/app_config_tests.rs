/*!
 * Tests for application configuration functionality
 */

use scribe::app_config::{Config, LogLevel};
use std::path::PathBuf;

use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.database_path.is_none());
    assert_eq!(
        config.post_rules.title_phrases,
        vec!["Won't Believe", "Secret", "Top", "Guess"]
    );
}

#[test]
fn test_loadOrCreate_withMissingFile_shouldWriteDefaultConfig() {
    let dir = common::create_temp_dir().unwrap();
    let path = dir.path().join("conf.json");

    let config = Config::load_or_create(&path).expect("default config");

    assert!(path.exists());
    assert_eq!(config, Config::default());
    assert_eq!(Config::load(&path).unwrap(), config);
}

#[test]
fn test_load_withCustomPhrases_shouldOverrideDefaults() {
    let dir = common::create_temp_dir().unwrap();
    let path = dir.path().join("conf.json");
    std::fs::write(
        &path,
        r#"{
            "database_path": "/var/lib/scribe/blog.db",
            "post_rules": { "title_phrases": ["Breaking"] },
            "log_level": "warn"
        }"#,
    )
    .unwrap();

    let config = Config::load(&path).unwrap();

    assert!(config.validate().is_ok());
    assert_eq!(config.log_level, LogLevel::Warn);
    assert_eq!(config.post_rules.title_phrases, vec!["Breaking"]);
    assert_eq!(
        config.database_path,
        Some(PathBuf::from("/var/lib/scribe/blog.db"))
    );
}

#[test]
fn test_load_withMalformedJson_shouldReportPath() {
    let dir = common::create_temp_dir().unwrap();
    let path = dir.path().join("conf.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = Config::load(&path).unwrap_err();

    assert!(format!("{:#}", err).contains("Failed to parse config file"));
}

#[test]
fn test_validate_withNoPhrases_shouldFail() {
    let mut config = Config::default();
    config.post_rules.title_phrases.clear();

    assert!(config.validate().is_err());
}
