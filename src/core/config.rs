//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.smartshop/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SmartShopConfig {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ServiceConfig {
    pub base_url: Option<String>,
    pub chat_path: Option<String>,
    /// 0 disables the timeout.
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UiConfig {
    pub typing_interval_ms: Option<u64>,
    pub reveal_stagger_ms: Option<u64>,
    pub probe_images: Option<bool>,
    pub show_welcome: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub file: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_BASE_URL: &str = "http://localhost:5001";
pub const DEFAULT_CHAT_PATH: &str = "/chat";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_TYPING_INTERVAL_MS: u64 = 500;
pub const DEFAULT_REVEAL_STAGGER_MS: u64 = 100;
pub const DEFAULT_LOG_FILE: &str = "smartshop.log";
pub const DEFAULT_LOG_LEVEL: &str = "debug";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub base_url: String,
    pub chat_path: String,
    pub request_timeout: Option<Duration>,
    pub typing_interval: Duration,
    pub reveal_stagger: Duration,
    pub probe_images: bool,
    pub show_welcome: bool,
    pub log_level: log::LevelFilter,
    pub log_file: String,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.smartshop/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".smartshop").join("config.toml"))
}

/// Load config from `~/.smartshop/config.toml`, or from `override_path` when
/// given.
///
/// A missing default file is generated (commented out) and treated as empty.
/// A missing explicit path is an error. A malformed file is
/// `ConfigError::Parse`.
pub fn load_config(override_path: Option<&Path>) -> Result<SmartShopConfig, ConfigError> {
    if let Some(path) = override_path {
        return read_config(path);
    }

    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(SmartShopConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(SmartShopConfig::default());
    }

    read_config(&path)
}

fn read_config(path: &Path) -> Result<SmartShopConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: SmartShopConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# SmartShop Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [service]
# base_url = "http://localhost:5001"   # Or set SMARTSHOP_BASE_URL
# chat_path = "/chat"
# request_timeout_secs = 30            # 0 = wait forever; or SMARTSHOP_TIMEOUT_SECS

# [ui]
# typing_interval_ms = 500             # "Thinking..." animation speed
# reveal_stagger_ms = 100              # Delay between product cards appearing
# probe_images = true                  # Check image URLs, fall back when broken
# show_welcome = true

# [logging]
# level = "debug"                      # "error", "warn", "info", "debug", "trace", "off"
# file = "smartshop.log"
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_base_url` is the `--base-url` flag (None = not specified).
pub fn resolve(config: &SmartShopConfig, cli_base_url: Option<&str>) -> ResolvedConfig {
    // Base URL: CLI → env → config → default
    let base_url = cli_base_url
        .map(|s| s.to_string())
        .or_else(|| std::env::var("SMARTSHOP_BASE_URL").ok())
        .or_else(|| config.service.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    // Timeout: env → config → default; 0 means no timeout
    let timeout_secs = std::env::var("SMARTSHOP_TIMEOUT_SECS")
        .ok()
        .and_then(|s| s.trim().parse::<u64>().ok())
        .or(config.service.request_timeout_secs)
        .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);
    let request_timeout = (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs));

    let log_level = config
        .logging
        .level
        .as_deref()
        .and_then(|s| s.parse::<log::LevelFilter>().ok())
        .unwrap_or(log::LevelFilter::Debug);

    ResolvedConfig {
        base_url,
        chat_path: config
            .service
            .chat_path
            .clone()
            .unwrap_or_else(|| DEFAULT_CHAT_PATH.to_string()),
        request_timeout,
        typing_interval: Duration::from_millis(
            config
                .ui
                .typing_interval_ms
                .filter(|ms| *ms > 0)
                .unwrap_or(DEFAULT_TYPING_INTERVAL_MS),
        ),
        reveal_stagger: Duration::from_millis(
            config.ui.reveal_stagger_ms.unwrap_or(DEFAULT_REVEAL_STAGGER_MS),
        ),
        probe_images: config.ui.probe_images.unwrap_or(true),
        show_welcome: config.ui.show_welcome.unwrap_or(true),
        log_level,
        log_file: config
            .logging
            .file
            .clone()
            .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string()),
    }
}
