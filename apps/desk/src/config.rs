//! # Desk Configuration
//!
//! Configuration for the desk application: where the database lives and how
//! the AI assist is reached.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                            │
//! │     BESHOB_DB_PATH=/data/beshob.db                                      │
//! │     BESHOB_GEMINI_API_KEY=...                                           │
//! │     BESHOB_ASSIST_MODEL=gemini-3-flash-preview                          │
//! │     BESHOB_ASSIST_ENABLED=false                                         │
//! │                                                                         │
//! │  2. TOML Config File                                                    │
//! │     ~/.config/beshob-invoice/desk.toml (Linux)                          │
//! │     ~/Library/Application Support/com.beshob.invoice/desk.toml (macOS)  │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                    │
//! │     Platform data dir database, assist disabled until a key is set      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # desk.toml
//! [storage]
//! database_path = "/home/me/beshob.db"
//!
//! [assist]
//! enabled = true
//! api_key = "..."
//! model = "gemini-3-flash-preview"
//! endpoint = "https://generativelanguage.googleapis.com"
//! timeout_secs = 20
//!
//! [display]
//! currency_symbol = "Tk "
//! receipt_width = 48
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Default Gemini model for every assist call.
pub const DEFAULT_ASSIST_MODEL: &str = "gemini-3-flash-preview";

/// Default Gemini API base URL.
pub const DEFAULT_ASSIST_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

// =============================================================================
// Errors
// =============================================================================

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config file is not valid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config could not be encoded: {0}")]
    Encode(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("No config path available")]
    NoPath,
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Sections
// =============================================================================

/// `[storage]` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// SQLite file. `None` means the platform data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_path: Option<PathBuf>,
}

/// `[assist]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistConfig {
    /// Whether remote assist calls are made at all.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Gemini API key. Assist runs offline without one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Per-request timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_true() -> bool {
    true
}

fn default_model() -> String {
    DEFAULT_ASSIST_MODEL.to_string()
}

fn default_endpoint() -> String {
    DEFAULT_ASSIST_ENDPOINT.to_string()
}

fn default_timeout_secs() -> u64 {
    20
}

impl Default for AssistConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_key: None,
            model: default_model(),
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl AssistConfig {
    /// True when remote calls should be attempted.
    pub fn is_remote(&self) -> bool {
        self.enabled && self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }
}

/// `[display]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Replaces `৳` in plain-text output, for printers without the glyph.
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    /// Characters per line for the text receipt.
    #[serde(default = "default_receipt_width")]
    pub receipt_width: usize,
}

fn default_currency_symbol() -> String {
    "৳".to_string()
}

fn default_receipt_width() -> usize {
    48
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency_symbol: default_currency_symbol(),
            receipt_width: default_receipt_width(),
        }
    }
}

impl DisplayConfig {
    /// Swaps the Taka sign in rendered text for the configured symbol.
    pub fn localize(&self, text: &str) -> String {
        if self.currency_symbol == "৳" {
            text.to_string()
        } else {
            text.replace('৳', &self.currency_symbol)
        }
    }
}

// =============================================================================
// Desk Config
// =============================================================================

/// Complete desk configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeskConfig {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub assist: AssistConfig,

    #[serde(default)]
    pub display: DisplayConfig,
}

impl DeskConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (desk.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading desk config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(|name| std::env::var(name).ok());

        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load desk config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> ConfigResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or(ConfigError::NoPath)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Desk config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.assist.model.trim().is_empty() {
            return Err(ConfigError::Invalid("assist.model must not be empty".into()));
        }

        if !self.assist.endpoint.starts_with("http://")
            && !self.assist.endpoint.starts_with("https://")
        {
            return Err(ConfigError::Invalid(format!(
                "assist.endpoint must start with http:// or https://, got: {}",
                self.assist.endpoint
            )));
        }

        if self.assist.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "assist.timeout_secs must be greater than 0".into(),
            ));
        }

        if self.display.currency_symbol.is_empty() {
            return Err(ConfigError::Invalid(
                "display.currency_symbol must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// Applies `BESHOB_*` overrides read through `lookup`.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup("BESHOB_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.storage.database_path = Some(PathBuf::from(path));
        }

        if let Some(key) = lookup("BESHOB_GEMINI_API_KEY") {
            debug!("Overriding assist API key from environment");
            self.assist.api_key = Some(key);
        }

        if let Some(model) = lookup("BESHOB_ASSIST_MODEL") {
            debug!(model = %model, "Overriding assist model from environment");
            self.assist.model = model;
        }

        if let Some(enabled) = lookup("BESHOB_ASSIST_ENABLED") {
            match enabled.to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.assist.enabled = true,
                "0" | "false" | "no" | "off" => self.assist.enabled = false,
                _ => warn!(value = %enabled, "Unknown BESHOB_ASSIST_ENABLED value"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join("desk.toml"))
    }

    /// Resolves the database file, creating the data directory if needed.
    ///
    /// ## Platform-Specific Defaults
    /// - **macOS**: `~/Library/Application Support/com.beshob.invoice/beshob.db`
    /// - **Windows**: `%APPDATA%\beshob\invoice\data\beshob.db`
    /// - **Linux**: `~/.local/share/invoice/beshob.db`
    pub fn database_path(&self) -> ConfigResult<PathBuf> {
        if let Some(path) = &self.storage.database_path {
            return Ok(path.clone());
        }

        let dirs = project_dirs().ok_or(ConfigError::NoPath)?;
        let data_dir = dirs.data_dir();
        std::fs::create_dir_all(data_dir)?;

        Ok(data_dir.join("beshob.db"))
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("com", "beshob", "invoice")
}
