use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{BreedError, Result};
use crate::loader::LoaderConfig;
use crate::retry::RetryPolicy;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/breeds";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    pub base_url: String,
    /// Records per upstream response; a shorter response marks the last page.
    pub page_size: usize,
    pub max_pages: u32,
    pub timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: 7,
            max_pages: 20,
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub page_size: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { page_size: 15 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub initial_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            initial_delay_ms: 500,
            max_delay_ms: 8000,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub retry: RetryConfig,
}

fn config_path() -> Option<PathBuf> {
    let config_dir = dirs::config_dir()?;
    Some(config_dir.join("breedlist").join("config.toml"))
}

impl Config {
    /// Load from an explicit path, or the default location. Falls back to defaults
    /// when the file is missing or cannot be parsed.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path.map(Path::to_path_buf).or_else(config_path) else {
            return Config::default();
        };

        let Ok(content) = std::fs::read_to_string(&path) else {
            return Config::default();
        };

        match toml::from_str::<Config>(&content) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("ignoring {}: {}", path.display(), e);
                Config::default()
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.upstream.page_size == 0 {
            return Err(BreedError::Config("upstream.page_size must be at least 1".into()));
        }
        if self.display.page_size == 0 {
            return Err(BreedError::Config("display.page_size must be at least 1".into()));
        }
        if self.upstream.base_url.trim().is_empty() {
            return Err(BreedError::Config("upstream.base_url is empty".into()));
        }
        Ok(())
    }

    pub fn loader_config(&self) -> LoaderConfig {
        LoaderConfig {
            upstream_page_size: self.upstream.page_size,
            display_page_size: self.display.page_size,
            max_upstream_pages: self.upstream.max_pages,
        }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.retry.max_attempts.max(1),
            initial_delay: Duration::from_millis(self.retry.initial_delay_ms),
            max_delay: Duration::from_millis(self.retry.max_delay_ms),
            multiplier: 2,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.upstream.timeout_secs)
    }
}
