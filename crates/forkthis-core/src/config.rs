// SPDX-License-Identifier: Apache-2.0

//! Configuration management for ForkThis.
//!
//! Provides layered configuration from files and environment variables.
//! Uses XDG-compliant paths with environment variable support.
//!
//! # Configuration Sources (in priority order)
//!
//! 1. Environment variables (prefix: `FORKTHIS_`)
//! 2. Config file: `~/.config/forkthis/config.toml`
//! 3. Built-in defaults
//!
//! # Examples
//!
//! ```bash
//! # Reveal 20 issues per "load more" step
//! FORKTHIS_FEED__PAGE_SIZE=20 forkthis search rust-lang/rust
//! ```

use std::path::PathBuf;

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::ForkError;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// GitHub API settings.
    pub github: GitHubConfig,
    /// AI summarizer settings.
    pub ai: AiConfig,
    /// Issue feed settings.
    pub feed: FeedConfig,
    /// Leaderboard settings.
    pub leaderboard: LeaderboardConfig,
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Local workflow store settings.
    pub storage: StorageConfig,
}

/// GitHub API settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// Override for the REST API base URL (GitHub Enterprise, test servers).
    pub api_base_url: Option<String>,
    /// Issues requested per page (GitHub caps this at 100).
    pub per_page: u8,
    /// API request timeout in seconds.
    pub api_timeout_seconds: u64,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_base_url: None,
            per_page: 100,
            api_timeout_seconds: 10,
        }
    }
}

/// One entry of a user-defined summarizer chain.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ChainLinkConfig {
    /// Provider name as listed in the registry (e.g., `groq`).
    pub provider: String,
    /// Model identifier sent to the provider.
    pub model: String,
}

/// AI summarizer settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
    /// Issue bodies longer than this many characters are truncated.
    pub max_body_length: usize,
    /// Circuit breaker failure threshold before opening (default: 3).
    pub circuit_breaker_threshold: u32,
    /// Circuit breaker reset timeout in seconds (default: 60).
    pub circuit_breaker_reset_seconds: u64,
    /// Custom fallback chain. Empty means the built-in chain.
    pub chain: Vec<ChainLinkConfig>,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            max_body_length: 4000,
            circuit_breaker_threshold: 3,
            circuit_breaker_reset_seconds: 60,
            chain: Vec::new(),
        }
    }
}

/// Issue feed settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Issues revealed initially and per "load more".
    pub page_size: usize,
    /// Fetch every page of the repository instead of just the first.
    pub fetch_all_pages: bool,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            page_size: 10,
            fetch_all_pages: false,
        }
    }
}

/// Leaderboard settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LeaderboardConfig {
    /// Count authors across every page instead of the first page only.
    pub all_pages: bool,
}

/// HTTP server settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address.
    pub host: String,
    /// Bind port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

/// Local workflow store settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Explicit store file. Defaults to `store.json` in the data directory.
    pub path: Option<PathBuf>,
}

impl StorageConfig {
    /// Resolves the store file path.
    #[must_use]
    pub fn resolve_path(&self) -> PathBuf {
        self.path
            .clone()
            .unwrap_or_else(|| data_dir().join("store.json"))
    }
}

fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// Returns the ForkThis configuration directory.
///
/// Respects the `XDG_CONFIG_HOME` environment variable if set,
/// otherwise defaults to `~/.config/forkthis`.
#[must_use]
pub fn config_dir() -> PathBuf {
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME")
        && !xdg_config.is_empty()
    {
        return PathBuf::from(xdg_config).join("forkthis");
    }
    home_dir().join(".config").join("forkthis")
}

/// Returns the ForkThis data directory.
///
/// Respects the `XDG_DATA_HOME` environment variable if set,
/// otherwise defaults to `~/.local/share/forkthis`.
#[must_use]
pub fn data_dir() -> PathBuf {
    if let Ok(xdg_data) = std::env::var("XDG_DATA_HOME")
        && !xdg_data.is_empty()
    {
        return PathBuf::from(xdg_data).join("forkthis");
    }
    home_dir().join(".local").join("share").join("forkthis")
}

/// Returns the path to the configuration file.
#[must_use]
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Load application configuration.
///
/// Loads from config file (if exists) and environment variables.
/// Environment variables use the prefix `FORKTHIS_` and double underscore
/// for nested keys (e.g., `FORKTHIS_SERVER__PORT`).
///
/// # Errors
///
/// Returns `ForkError::Config` if the config file exists but is invalid.
pub fn load_config() -> Result<AppConfig, ForkError> {
    let config_path = config_file_path();

    let config = Config::builder()
        .add_source(File::with_name(config_path.to_string_lossy().as_ref()).required(false))
        .add_source(
            Environment::with_prefix("FORKTHIS")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let app_config: AppConfig = config.try_deserialize()?;

    Ok(app_config)
}
