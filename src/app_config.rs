use anyhow::{Context, Result, anyhow};
use log::warn;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::language_utils;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Languages the app offers packs for (ISO 639-1)
    #[serde(default = "default_supported_languages")]
    pub supported_languages: Vec<String>,

    /// Languages whose packs are installed on the device
    #[serde(default = "default_downloaded_languages")]
    pub downloaded_languages: Vec<String>,

    /// Target language selected by default
    #[serde(default = "default_target_language")]
    pub default_target_language: String,

    /// Translation cache settings
    #[serde(default)]
    pub cache: CacheConfig,

    /// Text recognition settings
    #[serde(default)]
    pub recognition: RecognitionConfig,

    /// Orchestrator settings
    #[serde(default)]
    pub orchestrator: OrchestratorConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation cache configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CacheConfig {
    /// Whether caching is enabled
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Maximum number of cached translations before the oldest is evicted
    #[serde(default = "default_cache_max_entries")]
    pub max_entries: usize,

    /// Optional time-to-live for entries, in seconds
    #[serde(default)]
    pub ttl_secs: Option<u64>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_entries: default_cache_max_entries(),
            ttl_secs: None,
        }
    }
}

/// Recognition accuracy/speed trade-off passed to the OCR engine
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RecognitionMode {
    /// Faster, less accurate recognition for live preview
    Fast,
    /// Slower, more accurate recognition
    #[default]
    Accurate,
}

impl std::fmt::Display for RecognitionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fast => write!(f, "fast"),
            Self::Accurate => write!(f, "accurate"),
        }
    }
}

impl std::str::FromStr for RecognitionMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "fast" => Ok(Self::Fast),
            "accurate" => Ok(Self::Accurate),
            _ => Err(anyhow!("Invalid recognition mode: {}", s)),
        }
    }
}

/// Text recognition configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RecognitionConfig {
    /// Minimum confidence for a span to count as detected
    #[serde(default = "default_min_confidence")]
    pub min_confidence: f32,

    /// Maximum number of spans retained per recognition cycle
    #[serde(default = "default_max_spans")]
    pub max_spans: usize,

    /// Minimum delay between two accepted processing requests
    #[serde(default = "default_min_interval_ms")]
    pub min_interval_ms: u64,

    /// Initial recognition mode
    #[serde(default)]
    pub mode: RecognitionMode,
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            min_confidence: default_min_confidence(),
            max_spans: default_max_spans(),
            min_interval_ms: default_min_interval_ms(),
            mode: RecognitionMode::default(),
        }
    }
}

/// Orchestrator configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct OrchestratorConfig {
    /// Maximum number of language-pair sub-batches dispatched at once
    #[serde(default = "default_max_concurrent_sessions")]
    pub max_concurrent_sessions: usize,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            max_concurrent_sessions: default_max_concurrent_sessions(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Convert to the log crate's level filter
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_supported_languages() -> Vec<String> {
    ["en", "ko", "ja", "zh", "es", "fr", "de"]
        .iter()
        .map(|code| code.to_string())
        .collect()
}

fn default_downloaded_languages() -> Vec<String> {
    ["en", "ko", "ja", "es", "fr", "de"]
        .iter()
        .map(|code| code.to_string())
        .collect()
}

fn default_target_language() -> String {
    "ko".to_string()
}

fn default_cache_max_entries() -> usize {
    1000
}

fn default_min_confidence() -> f32 {
    0.7
}

fn default_max_spans() -> usize {
    10
}

fn default_min_interval_ms() -> u64 {
    500
}

fn default_max_concurrent_sessions() -> usize {
    4
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;

        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load configuration from a file, or fall back to defaults if it does not exist
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path)
        } else {
            warn!("Config file not found at '{}', using defaults.", path.display());
            Ok(Self::default())
        }
    }

    /// Save configuration as pretty-printed JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;

        std::fs::write(path, json)
            .with_context(|| format!("Failed to write config to file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.supported_languages.is_empty() {
            return Err(anyhow!("At least one supported language is required"));
        }

        for code in self.supported_languages.iter().chain(self.downloaded_languages.iter()) {
            if !language_utils::is_valid_language_code(code) {
                return Err(anyhow!("Invalid language code in configuration: {}", code));
            }
        }

        if !self.supported_languages.contains(&self.default_target_language) {
            return Err(anyhow!(
                "Default target language '{}' is not a supported language",
                self.default_target_language
            ));
        }

        if !(0.0..=1.0).contains(&self.recognition.min_confidence) {
            return Err(anyhow!(
                "Recognition min_confidence must be within [0, 1], got {}",
                self.recognition.min_confidence
            ));
        }

        if self.recognition.max_spans == 0 {
            return Err(anyhow!("Recognition max_spans must be greater than zero"));
        }

        if self.cache.enabled && self.cache.max_entries == 0 {
            return Err(anyhow!("Cache max_entries must be greater than zero when caching is enabled"));
        }

        if self.orchestrator.max_concurrent_sessions == 0 {
            return Err(anyhow!("Orchestrator max_concurrent_sessions must be greater than zero"));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            supported_languages: default_supported_languages(),
            downloaded_languages: default_downloaded_languages(),
            default_target_language: default_target_language(),
            cache: CacheConfig::default(),
            recognition: RecognitionConfig::default(),
            orchestrator: OrchestratorConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
