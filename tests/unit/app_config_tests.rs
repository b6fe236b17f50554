/*!
 * Tests for application configuration functionality
 */

use anyhow::Result;
use log::LevelFilter;
use termaudit::app_config::{Config, LogLevel, MatchingConfig};
use termaudit::terminology::{CheckOptions, LemmatizerEngine, MatchPolicy, ReportFormat};
use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.glossary_extension, "txt");
    assert_eq!(config.translation_extension, "tmx");
    assert_eq!(config.matching.policy, MatchPolicy::Presence);
    assert!(config.matching.morphology);
    assert_eq!(config.matching.engine, LemmatizerEngine::Rules);
    assert!(config.matching.hyphenation);
    assert!(!config.glossary.fold_case);
    assert_eq!(config.glossary.marker_chars, "*");
    assert_eq!(config.output.format, ReportFormat::Text);
    assert!(config.output.color);
    assert_eq!(config.log_level, LogLevel::Info);
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();
    assert!(config.validate().is_ok());

    config.glossary_extension = ".".to_string();
    assert!(config.validate().is_err());

    config.glossary_extension = ".TMX".to_string();
    assert!(config.validate().is_err());

    config.glossary_extension = ".tsv".to_string();
    config.translation_extension = "  ".to_string();
    assert!(config.validate().is_err());

    config.translation_extension = "tmx".to_string();
    config.glossary.marker_chars = String::new();
    assert!(config.validate().is_ok());
}

/// Test that a partial JSON file falls back to defaults
#[test]
fn test_deserialize_withPartialJson_shouldFillDefaults() -> Result<()> {
    let json = r#"{
        "matching": { "policy": "occurrence-count", "engine": "snowball" },
        "glossary": { "fold_case": true },
        "output": { "format": "json" },
        "log_level": "debug"
    }"#;
    let config: Config = serde_json::from_str(json)?;

    assert_eq!(config.glossary_extension, "txt");
    assert_eq!(config.matching.policy, MatchPolicy::OccurrenceCount);
    assert_eq!(config.matching.engine, LemmatizerEngine::Snowball);
    assert!(config.matching.morphology);
    assert!(config.glossary.fold_case);
    assert_eq!(config.glossary.marker_chars, "*");
    assert_eq!(config.output.format, ReportFormat::Json);
    assert!(config.output.color);
    assert_eq!(config.log_level, LogLevel::Debug);
    Ok(())
}

/// Test saving and loading round trip through a file
#[test]
fn test_load_or_create_withMissingFile_shouldWriteDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");

    let (created, was_created) = Config::load_or_create(&path)?;
    assert!(was_created);
    assert!(path.exists());
    assert_eq!(created, Config::default());

    let mut changed = created.clone();
    changed.matching.hyphenation = false;
    changed.save(&path)?;

    let (loaded, was_created) = Config::load_or_create(&path)?;
    assert!(!was_created);
    assert_eq!(loaded, changed);
    Ok(())
}

/// Test that an invalid file is reported
#[test]
fn test_load_withInvalidJson_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "conf.json", "{ not json")?;

    let error = Config::load(&path).unwrap_err();
    assert!(format!("{:#}", error).contains("Failed to parse config file"));
    Ok(())
}

/// Test conversion into checker options and log filters
#[test]
fn test_conversions_shouldMapFields() {
    let matching = MatchingConfig {
        policy: MatchPolicy::OccurrenceCount,
        morphology: false,
        engine: LemmatizerEngine::Snowball,
        hyphenation: true,
    };
    let options = CheckOptions::from(&matching);

    assert_eq!(options.policy, MatchPolicy::OccurrenceCount);
    assert!(!options.morphology);
    assert!(options.hyphenation);
    assert_eq!(LevelFilter::from(LogLevel::Trace), LevelFilter::Trace);
    assert_eq!(LevelFilter::from(LogLevel::Warn), LevelFilter::Warn);
}
