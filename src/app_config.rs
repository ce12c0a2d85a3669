use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

use crate::errors::ConfigError;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings, plus the credential
/// store that persists the API key outside the config file.

/// Gemini models offered by the tool
pub const GEMINI_MODELS: [&str; 3] =
    ["gemini-2.0-flash", "gemini-1.5-flash", "gemini-1.5-pro"];

/// Target language for translation
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TargetLanguage {
    // @language: Vietnamese
    #[default]
    Vi,
    // @language: English
    En,
    // @language: French
    Fr,
    // @language: Spanish
    Es,
}

impl TargetLanguage {
    // @returns: ISO 639-1 code sent to the model
    pub fn code(&self) -> &'static str {
        match self {
            Self::Vi => "vi",
            Self::En => "en",
            Self::Fr => "fr",
            Self::Es => "es",
        }
    }

    // @returns: Native-script display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Vi => "Tiếng Việt",
            Self::En => "English",
            Self::Fr => "Français",
            Self::Es => "Español",
        }
    }
}

impl std::fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for TargetLanguage {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, ConfigError> {
        match s.to_lowercase().as_str() {
            "vi" => Ok(Self::Vi),
            "en" => Ok(Self::En),
            "fr" => Ok(Self::Fr),
            "es" => Ok(Self::Es),
            _ => Err(ConfigError::UnknownLanguage(s.to_string())),
        }
    }
}

/// Translation mode. Selects instruction wording in the prompt only; it
/// never changes parsing.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TranslationMode {
    /// Natural, fluid phrasing with a light humorous touch
    #[default]
    SmoothHumorous,
    /// Concise, literal, minimal rephrasing (cheaper on tokens)
    Fast,
}

impl TranslationMode {
    // @returns: Identifier used in config files and the CLI
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SmoothHumorous => "smooth-humorous",
            Self::Fast => "fast",
        }
    }
}

impl std::fmt::Display for TranslationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TranslationMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, ConfigError> {
        match s.to_lowercase().as_str() {
            "smooth-humorous" | "smooth" => Ok(Self::SmoothHumorous),
            "fast" => Ok(Self::Fast),
            _ => Err(ConfigError::UnknownMode(s.to_string())),
        }
    }
}

/// Log level configuration
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Target language for translation
    #[serde(default)]
    pub target_language: TargetLanguage,

    /// Translation mode
    #[serde(default)]
    pub mode: TranslationMode,

    /// Gemini model name
    #[serde(default = "default_model")]
    pub model: String,

    /// Service endpoint URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Maximum subtitle entries per translation batch
    #[serde(default = "default_max_entries_per_batch")]
    pub max_entries_per_batch: usize,

    /// Minimum display duration in milliseconds enforced by repair
    #[serde(default = "default_min_display_ms")]
    pub min_display_ms: u64,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

fn default_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_endpoint() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_max_entries_per_batch() -> usize {
    25
}

fn default_min_display_ms() -> u64 {
    800
}

fn default_timeout_secs() -> u64 {
    60
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target_language: TargetLanguage::default(),
            mode: TranslationMode::default(),
            model: default_model(),
            endpoint: default_endpoint(),
            max_entries_per_batch: default_max_entries_per_batch(),
            min_display_ms: default_min_display_ms(),
            timeout_secs: default_timeout_secs(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Validate the configuration. Surfaced to the caller before any
    /// network activity starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_entries_per_batch == 0 {
            return Err(ConfigError::InvalidBatchSize(self.max_entries_per_batch));
        }

        if self.model.trim().is_empty() {
            return Err(ConfigError::EmptyModel);
        }

        if url::Url::parse(&self.endpoint).is_err() {
            return Err(ConfigError::InvalidEndpoint(self.endpoint.clone()));
        }

        Ok(())
    }
}

/// Stored credential file contents
#[derive(Debug, Serialize, Deserialize)]
struct StoredCredential {
    api_key: String,
}

/// Persists the API key at a fixed well-known location in the user's home
/// directory, outside the config file.
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    /// Open the default store at `~/.srtran/credentials.json`
    pub fn default_store() -> Result<Self> {
        let home = dirs::home_dir().context("Could not determine home directory")?;
        Ok(Self {
            path: home.join(".srtran").join("credentials.json"),
        })
    }

    /// Open a store at an explicit path (used by tests)
    #[allow(dead_code)]
    pub fn at_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Load the stored API key, if any
    pub fn load(&self) -> Option<String> {
        let content = std::fs::read_to_string(&self.path).ok()?;
        let stored: StoredCredential = serde_json::from_str(&content).ok()?;
        if stored.api_key.is_empty() {
            None
        } else {
            Some(stored.api_key)
        }
    }

    /// Persist the API key
    pub fn save(&self, api_key: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }

        let stored = StoredCredential {
            api_key: api_key.to_string(),
        };
        let json = serde_json::to_string_pretty(&stored)
            .context("Failed to serialize credential")?;

        std::fs::write(&self.path, json)
            .with_context(|| format!("Failed to write credential file: {:?}", self.path))?;

        Ok(())
    }

    /// Resolve the API key to use: an explicit key (CLI flag or
    /// environment) wins over the stored one.
    pub fn resolve(&self, explicit: Option<String>) -> Result<String, ConfigError> {
        explicit
            .filter(|k| !k.trim().is_empty())
            .or_else(|| self.load())
            .ok_or(ConfigError::MissingApiKey)
    }
}
