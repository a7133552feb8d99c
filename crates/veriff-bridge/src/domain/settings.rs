//! Bridge settings.
//!
//! [`BridgeSettings`] tunes the bridge itself (not a single verification
//! session): the default base URL for legacy tokens, where bundled resources
//! live, and how patient remote logo fetches are.  It is parsed from TOML:
//!
//! ```toml
//! log_level = "debug"
//!
//! [session]
//! default_base_url = "https://magic.veriff.me"
//!
//! [assets]
//! resource_dir = "assets"
//! fetch_timeout_secs = 10
//! max_logo_bytes = 5242880
//! ```
//!
//! # Serde default values
//!
//! Every field has a `#[serde(default = "...")]` helper, so an empty file (or
//! no file at all) yields the same values as [`BridgeSettings::default`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for settings parsing.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The settings file exists but could not be read.
    #[error("I/O error reading settings at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse settings TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value parsed but is unusable.
    #[error("invalid setting {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

// ── Settings schema types ─────────────────────────────────────────────────────

/// Top-level bridge settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BridgeSettings {
    /// `tracing` level used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub session: SessionSettings,
    #[serde(default)]
    pub assets: AssetSettings,
}

/// Session addressing defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionSettings {
    /// Prefix for legacy `sessionToken` launches without a `baseUrl`.
    #[serde(default = "default_base_url")]
    pub default_base_url: String,
}

/// Logo resolution settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssetSettings {
    /// Root directory of the bundled-resource catalog.
    #[serde(default = "default_resource_dir")]
    pub resource_dir: PathBuf,
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
    /// Remote logos larger than this are treated as a failed fetch.
    #[serde(default = "default_max_logo_bytes")]
    pub max_logo_bytes: u64,
}

// ── Default helpers ───────────────────────────────────────────────────────────

pub const DEFAULT_BASE_URL: &str = "https://magic.veriff.me";

fn default_log_level() -> String {
    "info".to_string()
}
fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}
fn default_resource_dir() -> PathBuf {
    PathBuf::from("assets")
}
fn default_fetch_timeout_secs() -> u64 {
    10
}
fn default_max_logo_bytes() -> u64 {
    5 * 1024 * 1024
}

impl Default for BridgeSettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            session: SessionSettings::default(),
            assets: AssetSettings::default(),
        }
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            default_base_url: default_base_url(),
        }
    }
}

impl Default for AssetSettings {
    fn default() -> Self {
        Self {
            resource_dir: default_resource_dir(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
            max_logo_bytes: default_max_logo_bytes(),
        }
    }
}

impl BridgeSettings {
    /// Loads settings from `path`.
    ///
    /// A missing file is not an error: the defaults are returned, so the
    /// bridge runs unconfigured out of the box.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Io`] for file-system errors other than "not
    /// found", plus everything [`from_toml_str`](Self::from_toml_str) returns.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::from_toml_str(&text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("no settings at {}; using defaults", path.display());
                Ok(Self::default())
            }
            Err(source) => Err(SettingsError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Parses settings from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Parse`] for malformed TOML and
    /// [`SettingsError::Invalid`] for a zero fetch timeout or an empty
    /// default base URL.
    pub fn from_toml_str(text: &str) -> Result<Self, SettingsError> {
        let settings: BridgeSettings = toml::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if self.assets.fetch_timeout_secs == 0 {
            return Err(SettingsError::Invalid {
                key: "assets.fetch_timeout_secs",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.session.default_base_url.trim().is_empty() {
            return Err(SettingsError::Invalid {
                key: "session.default_base_url",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

impl AssetSettings {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
