//! Configuration loading, validation, and management for mnemo.
//!
//! Loads configuration from `~/.mnemo/config.toml` with environment
//! variable overrides. Validates all settings at startup. The loaded
//! config is resolved once at session construction and never mutated.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.mnemo/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// API key for the model endpoint (local servers usually ignore it)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Model provider: "lmstudio", "ollama", or "openai"
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Override the provider's base URL (e.g. a remote LM Studio host)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Model identifier sent to the provider
    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Memory policy settings
    #[serde(default)]
    pub memory: MemoryConfig,

    /// Transcript logging settings
    #[serde(default)]
    pub transcript: TranscriptConfig,

    /// Override the system prompt entirely (skips tool-instruction rendering)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_prompt_override: Option<String>,
}

fn default_provider() -> String {
    "lmstudio".into()
}
fn default_model() -> String {
    "hugging-quants/llama-3.2-3b-instruct".into()
}
fn default_temperature() -> f32 {
    0.7
}

/// Redact a secret string for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &redact(&self.api_key))
            .field("provider", &self.provider)
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("memory", &self.memory)
            .field("transcript", &self.transcript)
            .finish()
    }
}

/// Memory policy options.
///
/// `short_memory_size` bounds the recent-interaction buffer in messages
/// (each turn contributes two). `long_memory_size` is the approximate token
/// budget the summarizer is asked to stay within — it is a size hint, not an
/// enforced count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryConfig {
    /// Maximum buffered messages before FIFO eviction (SHORT_MEMORY_SIZE)
    #[serde(default = "default_short_memory_size")]
    pub short_memory_size: usize,

    /// Approximate token budget for the long-term summary (LONG_MEMORY_SIZE)
    #[serde(default = "default_long_memory_size")]
    pub long_memory_size: usize,

    /// Disable the long-term summary entirely (DISABLE_LONG_MEMORY)
    #[serde(default)]
    pub disable_long_memory: bool,

    /// Disable short-term buffering entirely (DISABLE_SHORT_MEMORY)
    #[serde(default)]
    pub disable_short_memory: bool,
}

fn default_short_memory_size() -> usize {
    20
}
fn default_long_memory_size() -> usize {
    5096
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            short_memory_size: default_short_memory_size(),
            long_memory_size: default_long_memory_size(),
            disable_long_memory: false,
            disable_short_memory: false,
        }
    }
}

/// Transcript logging options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptConfig {
    /// Whether to write a per-session transcript file
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Directory for transcript files (relative to the working directory
    /// unless absolute)
    #[serde(default = "default_transcript_dir")]
    pub dir: String,
}

fn default_true() -> bool {
    true
}
fn default_transcript_dir() -> String {
    "transcripts".into()
}

impl Default for TranscriptConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dir: default_transcript_dir(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.mnemo/config.toml).
    ///
    /// Environment variables take priority over the file:
    /// - `MNEMO_API_KEY` (falls back to `OPENAI_API_KEY`)
    /// - `MNEMO_PROVIDER`
    /// - `MNEMO_MODEL`
    /// - `MNEMO_BASE_URL`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;

        if config.api_key.is_none() {
            config.api_key = std::env::var("MNEMO_API_KEY")
                .ok()
                .or_else(|| std::env::var("OPENAI_API_KEY").ok());
        }
        if let Ok(provider) = std::env::var("MNEMO_PROVIDER") {
            config.provider = provider;
        }
        if let Ok(model) = std::env::var("MNEMO_MODEL") {
            config.model = model;
        }
        if let Ok(url) = std::env::var("MNEMO_BASE_URL") {
            config.base_url = Some(url);
        }

        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".mnemo")
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.temperature < 0.0 || self.temperature > 2.0 {
            return Err(ConfigError::ValidationError(
                "temperature must be between 0.0 and 2.0".into(),
            ));
        }

        if !self.memory.disable_short_memory && self.memory.short_memory_size < 2 {
            return Err(ConfigError::ValidationError(
                "short_memory_size must hold at least one turn (2 messages)".into(),
            ));
        }

        if !self.memory.disable_long_memory && self.memory.long_memory_size == 0 {
            return Err(ConfigError::ValidationError(
                "long_memory_size must be greater than 0".into(),
            ));
        }

        match self.provider.as_str() {
            "lmstudio" | "ollama" | "openai" => Ok(()),
            other => Err(ConfigError::ValidationError(format!(
                "unsupported provider: {other} (expected lmstudio, ollama, or openai)"
            ))),
        }
    }

    /// Generate a default config TOML string (for `onboard`).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&Self::default()).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            provider: default_provider(),
            base_url: None,
            model: default_model(),
            temperature: default_temperature(),
            memory: MemoryConfig::default(),
            transcript: TranscriptConfig::default(),
            system_prompt_override: None,
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
