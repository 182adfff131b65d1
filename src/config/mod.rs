//! Application Configuration
//!
//! User settings and preferences stored in TOML format.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable overriding the lgogdownloader cache directory
pub const LGOG_CACHE_ENV: &str = "LGOG_CACHE";
/// Environment variable overriding the game library directory
pub const GOG_DIR_ENV: &str = "GOG_DIR";

/// Application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Download manager server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Polling settings
    #[serde(default)]
    pub polling: PollingConfig,
    /// Local library locations
    #[serde(default)]
    pub library: LibraryConfig,
}

/// Download manager server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Base URL of the download manager web API
    pub base_url: String,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl ServerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

/// Polling settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PollingConfig {
    /// Seconds between poll ticks
    pub interval_secs: u64,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self { interval_secs: 5 }
    }
}

impl PollingConfig {
    /// Poll interval, never shorter than one second
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs.max(1))
    }
}

/// Local library locations shared with lgogdownloader
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    /// lgogdownloader cache directory (holds `gamedetails.json`)
    pub cache_dir: PathBuf,
    /// Directory holding one sub-directory per downloaded game
    pub library_dir: PathBuf,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            cache_dir: env_or_home(LGOG_CACHE_ENV, "~/.cache/lgogdownloader"),
            library_dir: env_or_home(GOG_DIR_ENV, "~/GOG"),
        }
    }
}

impl LibraryConfig {
    /// Path of the cached game details database
    pub fn game_details_path(&self) -> PathBuf {
        expand_home(&self.cache_dir).join("gamedetails.json")
    }

    /// Library directory with `~` expanded
    pub fn library_path(&self) -> PathBuf {
        expand_home(&self.library_dir)
    }
}

fn env_or_home(var: &str, fallback: &str) -> PathBuf {
    let raw = std::env::var(var).unwrap_or_else(|_| fallback.to_string());
    expand_home(Path::new(&raw))
}

/// Expand a leading `~` to the user's home directory
pub fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match directories::BaseDirs::new() {
        Some(dirs) => dirs.home_dir().join(rest),
        None => path.to_path_buf(),
    }
}

/// Load configuration from file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {:?}", path))?;
    let config: AppConfig = toml::from_str(&content)?;
    Ok(config)
}

/// Save configuration to file
pub fn save_config(config: &AppConfig, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}
