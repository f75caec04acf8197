#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_range, validate_url, validate_url_path, Validate};
use std::time::Duration;
use toml_config::FileConfig;

pub const DEFAULT_API_BASE_URL: &str = "https://code-reviewer-ggok.onrender.com";
pub const DEFAULT_REVIEW_PATH: &str = "/ai/get-review";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const MAX_TIMEOUT_SECS: u64 = 600;

/// Settings the HTTP adapter runs with, after flags, environment and the
/// config file have been merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewSettings {
    pub api_base_url: String,
    pub review_path: String,
    pub timeout: Duration,
}

impl Default for ReviewSettings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            review_path: DEFAULT_REVIEW_PATH.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ReviewSettings {
    /// Explicit values (flag or environment) win over the file, the file wins
    /// over the built-in defaults.
    pub fn resolve(
        api_base_url: Option<String>,
        timeout_secs: Option<u64>,
        file: Option<&FileConfig>,
    ) -> Self {
        let api = file.map(|f| &f.api);
        let defaults = Self::default();

        let api_base_url = api_base_url
            .filter(|url| !url.trim().is_empty())
            .or_else(|| api.and_then(|a| a.base_url.clone()))
            .unwrap_or(defaults.api_base_url);

        let timeout = timeout_secs
            .or_else(|| api.and_then(|a| a.timeout_seconds))
            .map(Duration::from_secs)
            .unwrap_or(defaults.timeout);

        let review_path = api
            .and_then(|a| a.review_path.clone())
            .unwrap_or(defaults.review_path);

        Self {
            api_base_url,
            review_path,
            timeout,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl ConfigProvider for ReviewSettings {
    fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    fn review_path(&self) -> &str {
        &self.review_path
    }

    fn request_timeout(&self) -> Duration {
        self.timeout
    }
}

impl Validate for ReviewSettings {
    fn validate(&self) -> Result<()> {
        validate_url("api_base_url", &self.api_base_url)?;
        validate_url_path("review_path", &self.review_path)?;
        validate_range("timeout_seconds", self.timeout.as_secs(), 1, MAX_TIMEOUT_SECS)?;
        Ok(())
    }
}
