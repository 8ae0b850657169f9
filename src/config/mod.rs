//! Configuration management for newsdeck.
//!
//! Configuration is read from `~/.config/newsdeck/config.toml` at startup.
//! If the file doesn't exist, a default configuration with comments is created.

pub mod colors;

pub use colors::ColorConfig;

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::FeedSource;
use crate::store::ErrorPolicy;

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Applied to every feed store when a refresh fails.
    pub on_error: ErrorPolicy,
    pub server: ServerConfig,
    pub feeds: FeedsConfig,
    pub colors: ColorConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Base URL the feed endpoints are resolved against.
    pub base_url: String,
    pub user_agent: String,
    /// Request timeout. Unset means requests may wait forever.
    pub timeout_secs: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            user_agent: concat!("newsdeck/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: None,
        }
    }
}

/// Endpoint path per feed source.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeedsConfig {
    pub hacker_news: String,
    pub reddit: String,
    pub medium: String,
}

impl Default for FeedsConfig {
    fn default() -> Self {
        Self {
            hacker_news: FeedSource::HackerNews.default_endpoint().to_string(),
            reddit: FeedSource::Reddit.default_endpoint().to_string(),
            medium: FeedSource::Medium.default_endpoint().to_string(),
        }
    }
}

impl FeedsConfig {
    pub fn endpoint(&self, source: FeedSource) -> &str {
        match source {
            FeedSource::HackerNews => &self.hacker_news,
            FeedSource::Reddit => &self.reddit,
            FeedSource::Medium => &self.medium,
        }
    }
}

impl Config {
    /// Load configuration from the default path.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::default_config_path()?)
    }

    /// Load configuration from `path`, writing the commented default there first
    /// if nothing exists yet. Missing fields use default values.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            Self::create_default_config(path)?;
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the default config file path: `~/.config/newsdeck/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("newsdeck").join("config.toml"))
    }

    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        fs::write(path, DEFAULT_CONFIG).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

const DEFAULT_CONFIG: &str = r##"# newsdeck configuration

# What a feed shows after a failed refresh:
# "clear" drops its articles, "preserve" keeps the last good ones.
on_error = "clear"

[server]
base_url = "http://localhost:3000"
# Request timeout in seconds. Leave unset to wait indefinitely.
# timeout_secs = 30

[feeds]
# Endpoint paths, resolved against server.base_url.
hacker_news = "/api/hackernews"
reddit = "/api/reddit"
medium = "/api/medium"

[colors]
# Named colors (Cyan, DarkGray, LightRed, ...) or hex ("#RRGGBB", "#RGB").
active_tab = "Cyan"
inactive_tab = "DarkGray"
border = "DarkGray"
selection_bg = "Cyan"
selection_fg = "Black"
card_meta = "Yellow"
loading = "LightBlue"
error = "LightRed"
status_fg = "White"
status_bg = "DarkGray"
"##;

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;

    #[test]
    fn test_default_config_deserializes() {
        let config: Config = toml::from_str(DEFAULT_CONFIG).expect("Default config should be valid TOML");

        assert_eq!(config.on_error, ErrorPolicy::Clear);
        assert_eq!(config.server.base_url, "http://localhost:3000");
        assert_eq!(config.server.timeout_secs, None);
        assert_eq!(config.feeds.endpoint(FeedSource::Reddit), "/api/reddit");
        assert_eq!(config.colors.active_tab, Color::Cyan);
    }

    #[test]
    fn test_partial_config() {
        let content = r##"
on_error = "preserve"

[feeds]
medium = "/v2/medium"
"##;
        let config: Config = toml::from_str(content).expect("Partial config should work");

        assert_eq!(config.on_error, ErrorPolicy::Preserve);
        assert_eq!(config.feeds.endpoint(FeedSource::Medium), "/v2/medium");
        assert_eq!(config.feeds.endpoint(FeedSource::HackerNews), "/api/hackernews");
    }

    #[test]
    fn test_empty_config() {
        let config: Config = toml::from_str("").expect("Empty config should work");
        assert_eq!(config.on_error, ErrorPolicy::Clear);
        assert_eq!(config.feeds.reddit, "/api/reddit");
    }

    #[test]
    fn test_load_from_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.server.base_url, "http://localhost:3000");

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.feeds.medium, "/api/medium");
    }

    #[test]
    fn test_load_from_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "on_error = \"explode\"").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
