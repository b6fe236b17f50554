use anyhow::{anyhow, Context, Result};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::Path;

use crate::file_utils::FileManager;
use crate::terminology::{CheckOptions, GlossaryOptions, LemmatizerEngine, MatchPolicy, ReportFormat};

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Extension of glossary files (without the dot)
    #[serde(default = "default_glossary_extension")]
    pub glossary_extension: String,

    /// Extension of translation files (without the dot)
    #[serde(default = "default_translation_extension")]
    pub translation_extension: String,

    /// Matching stages
    #[serde(default)]
    pub matching: MatchingConfig,

    /// Glossary normalization
    #[serde(default)]
    pub glossary: GlossaryOptions,

    /// Report output
    #[serde(default)]
    pub output: OutputConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Matching stage configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MatchingConfig {
    // @field: Literal stage policy
    #[serde(default)]
    pub policy: MatchPolicy,

    // @field: Run the lemma-based re-check
    #[serde(default = "default_true")]
    pub morphology: bool,

    // @field: Lemmatizer used by the re-check
    #[serde(default)]
    pub engine: LemmatizerEngine,

    // @field: Note hyphenated renderings
    #[serde(default = "default_true")]
    pub hyphenation: bool,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            policy: MatchPolicy::default(),
            morphology: true,
            engine: LemmatizerEngine::default(),
            hyphenation: true,
        }
    }
}

impl From<&MatchingConfig> for CheckOptions {
    fn from(matching: &MatchingConfig) -> Self {
        CheckOptions {
            policy: matching.policy,
            morphology: matching.morphology,
            hyphenation: matching.hyphenation,
        }
    }
}

/// Report output configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct OutputConfig {
    /// Report format
    #[serde(default)]
    pub format: ReportFormat,

    /// Colour the text report with ANSI escapes
    #[serde(default = "default_true")]
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: ReportFormat::default(),
            color: true,
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn default_glossary_extension() -> String {
    "txt".to_string()
}

fn default_translation_extension() -> String {
    "tmx".to_string()
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load a configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = FileManager::read_to_string(path)?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Load a configuration file, writing the defaults there if it does not exist
    ///
    /// Returns the configuration and whether it was created.
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<(Self, bool)> {
        let path = path.as_ref();
        if FileManager::file_exists(path) {
            return Ok((Self::load(path)?, false));
        }

        let config = Self::default();
        config.save(path)?;
        Ok((config, true))
    }

    /// Save the configuration as pretty-printed JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;
        FileManager::write_to_file(path, &config_json)
    }

    /// Stage options for the checker
    pub fn check_options(&self) -> CheckOptions {
        CheckOptions::from(&self.matching)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        let glossary_ext = normalize_extension(&self.glossary_extension);
        let translation_ext = normalize_extension(&self.translation_extension);

        if glossary_ext.is_empty() {
            return Err(anyhow!("Glossary extension must not be empty"));
        }
        if translation_ext.is_empty() {
            return Err(anyhow!("Translation extension must not be empty"));
        }
        if glossary_ext.eq_ignore_ascii_case(&translation_ext) {
            return Err(anyhow!(
                "Glossary and translation extensions must differ (both are '{}')",
                glossary_ext
            ));
        }

        Ok(())
    }
}

/// Extension without leading dots or surrounding whitespace
pub fn normalize_extension(extension: &str) -> &str {
    extension.trim().trim_start_matches('.')
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            glossary_extension: default_glossary_extension(),
            translation_extension: default_translation_extension(),
            matching: MatchingConfig::default(),
            glossary: GlossaryOptions::default(),
            output: OutputConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
