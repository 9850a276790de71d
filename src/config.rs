use crate::constants;
use crate::error::{CrawlerError, Result};
use serde::Deserialize;
use std::fs;
use std::time::Duration;

/// Settings for one feed cycle. Every field has a default matching the
/// public ThreatFox recent-URLs export, so a config file is optional.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub feed_url: String,
    pub output_dir: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            feed_url: constants::DEFAULT_FEED_URL.to_string(),
            output_dir: constants::DEFAULT_OUTPUT_DIR.to_string(),
            request_timeout_secs: constants::DEFAULT_TIMEOUT_SECS,
            user_agent: constants::DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl FeedConfig {
    pub fn load(config_path: &str) -> Result<Self> {
        let config_content = fs::read_to_string(config_path).map_err(|e| {
            CrawlerError::Config(format!("Failed to read config file '{}': {}", config_path, e))
        })?;

        let config: FeedConfig = toml::from_str(&config_content)?;
        Ok(config)
    }

    /// Loads `config.toml` when present, otherwise falls back to defaults.
    pub fn load_or_default() -> Result<Self> {
        let config_path = "config.toml";
        if fs::metadata(config_path).is_ok() {
            Self::load(config_path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_feed_endpoint() {
        let config = FeedConfig::default();
        assert_eq!(config.feed_url, constants::DEFAULT_FEED_URL);
        assert_eq!(config.request_timeout_secs, 60);
        assert_eq!(config.user_agent, "ThreatIntel-Crawler/1.0");
    }

    #[test]
    fn partial_toml_keeps_defaults_for_missing_fields() {
        let config: FeedConfig = toml::from_str("feed_url = \"http://localhost/feed\"").unwrap();
        assert_eq!(config.feed_url, "http://localhost/feed");
        assert_eq!(config.output_dir, constants::DEFAULT_OUTPUT_DIR);
    }
}
