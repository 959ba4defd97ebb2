use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::live::LiveWindows;

/// Environment variable that overrides `api_url` for one session
pub const API_URL_ENV: &str = "MONEX_API_URL";

const MAX_RECENT_SEARCHES: usize = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api_url: Option<String>,
    #[serde(default = "default_native_symbol")]
    pub native_symbol: String,
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default = "default_highlight_secs")]
    pub highlight_secs: u64,
    #[serde(default)]
    pub recent_searches: Vec<String>,
    #[serde(skip)]
    api_url_override: Option<String>,
}

fn default_native_symbol() -> String {
    "MON".to_string()
}

fn default_poll_interval_secs() -> u64 {
    10
}

fn default_page_size() -> usize {
    10
}

fn default_highlight_secs() -> u64 {
    3
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: None,
            native_symbol: default_native_symbol(),
            poll_interval_secs: default_poll_interval_secs(),
            page_size: default_page_size(),
            highlight_secs: default_highlight_secs(),
            recent_searches: Vec::new(),
            api_url_override: None,
        }
    }
}

impl Config {
    /// Returns the config directory path (~/.config/monex on Linux/macOS)
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join("monex"))
            .context("Could not determine config directory")
    }

    /// Returns the config file path
    fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load config from disk, or return default if not found.
    /// `MONEX_API_URL` takes precedence over the stored URL.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config from {path:?}"))?;
            Self::from_toml(&contents)?
        } else {
            Self::default()
        };

        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                config.api_url_override = Some(url.trim().to_string());
            }
        }

        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Failed to parse config file")
    }

    /// Save config to disk
    pub fn save(&self) -> Result<()> {
        let dir = Self::config_dir()?;
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create config directory {dir:?}"))?;

        let path = Self::config_path()?;
        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(&path, contents)
            .with_context(|| format!("Failed to write config to {path:?}"))?;

        Ok(())
    }

    /// The API URL in effect: environment override first, then the file
    pub fn api_url(&self) -> Option<&str> {
        self.api_url_override
            .as_deref()
            .or(self.api_url.as_deref())
    }

    /// Set the API URL and persist
    pub fn set_api_url(&mut self, url: String) -> Result<()> {
        self.api_url = Some(url);
        self.api_url_override = None;
        self.save()
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(1))
    }

    pub fn live_windows(&self) -> LiveWindows {
        let window = Duration::from_secs(self.highlight_secs);
        LiveWindows {
            highlight: window,
            failure: window,
        }
    }

    /// Move `query` to the front of the history (keeps last 10)
    pub fn push_recent_search(&mut self, query: String) {
        self.recent_searches.retain(|s| s != &query);
        self.recent_searches.insert(0, query);
        self.recent_searches.truncate(MAX_RECENT_SEARCHES);
    }

    /// Add a search to recent history and persist
    pub fn add_recent_search(&mut self, query: String) -> Result<()> {
        self.push_recent_search(query);
        self.save()
    }
}
