/*!
 * Tests for application configuration functionality
 */

use viewlingo::app_config::{CacheConfig, Config, LogLevel, RecognitionMode};

use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.default_target_language, "ko");
    assert!(config.supported_languages.contains(&"en".to_string()));
    assert!(config.downloaded_languages.contains(&"ja".to_string()));
    assert_eq!(config.cache.max_entries, 1000);
    assert_eq!(config.cache.ttl_secs, None);
    assert!(config.cache.enabled);
    assert_eq!(config.recognition.min_interval_ms, 500);
    assert_eq!(config.recognition.mode, RecognitionMode::Accurate);
    assert_eq!(config.orchestrator.max_concurrent_sessions, 4);
    assert_eq!(config.log_level, LogLevel::Info);
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();
    assert!(config.validate().is_ok());

    config.default_target_language = "it".to_string();
    assert!(config.validate().is_err());
    config.default_target_language = "ko".to_string();

    config.recognition.min_confidence = 1.5;
    assert!(config.validate().is_err());
    config.recognition.min_confidence = 0.7;

    config.cache = CacheConfig {
        enabled: true,
        max_entries: 0,
        ttl_secs: None,
    };
    assert!(config.validate().is_err());
    config.cache.enabled = false;
    assert!(config.validate().is_ok());

    config.orchestrator.max_concurrent_sessions = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_fromFile_withPartialJson_shouldFillDefaults() -> anyhow::Result<()> {
    let dir = common::create_temp_dir()?;
    let path = common::create_config_file(
        dir.path(),
        r#"{
            "default_target_language": "ja",
            "cache": { "max_entries": 50, "ttl_secs": 300 },
            "recognition": { "mode": "fast" },
            "log_level": "debug"
        }"#,
    )?;

    let config = Config::from_file(&path)?;
    assert_eq!(config.default_target_language, "ja");
    assert_eq!(config.cache.max_entries, 50);
    assert_eq!(config.cache.ttl_secs, Some(300));
    assert!(config.cache.enabled);
    assert_eq!(config.recognition.mode, RecognitionMode::Fast);
    assert_eq!(config.recognition.max_spans, 10);
    assert_eq!(config.log_level, LogLevel::Debug);
    assert!(config.validate().is_ok());
    Ok(())
}

#[test]
fn test_fromFile_withMalformedJson_shouldFail() -> anyhow::Result<()> {
    let dir = common::create_temp_dir()?;
    let path = common::create_config_file(dir.path(), "{ not json")?;

    let err = Config::from_file(&path).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config file"));
    Ok(())
}

#[test]
fn test_saveThenLoad_shouldPreserveValues() -> anyhow::Result<()> {
    let dir = common::create_temp_dir()?;
    let path = dir.path().join("saved.json");

    let mut config = Config::default();
    config.default_target_language = "es".to_string();
    config.cache.ttl_secs = Some(60);
    config.save(&path)?;

    let loaded = Config::from_file(&path)?;
    assert_eq!(loaded.default_target_language, "es");
    assert_eq!(loaded.cache, config.cache);
    assert_eq!(loaded.recognition, config.recognition);
    Ok(())
}

#[test]
fn test_loadOrDefault_withMissingFile_shouldReturnDefaults() -> anyhow::Result<()> {
    let dir = common::create_temp_dir()?;
    let config = Config::load_or_default(dir.path().join("missing.json"))?;
    assert_eq!(config.default_target_language, "ko");
    Ok(())
}

#[test]
fn test_logLevel_toLevelFilter_shouldMapEveryLevel() {
    assert_eq!(LogLevel::Error.to_level_filter(), log::LevelFilter::Error);
    assert_eq!(LogLevel::Trace.to_level_filter(), log::LevelFilter::Trace);
}
