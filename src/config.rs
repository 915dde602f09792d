use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Per-request timeout for feed and API calls, in seconds
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout: u64,
    /// YouTube Data API key; falls back to the YOUTUBE_API_KEY env var
    #[serde(default)]
    pub api_key: Option<String>,
    pub channels: Vec<Channel>,
}

fn default_fetch_timeout() -> u64 {
    30
}

/// A subscribed channel: display name plus its RSS/Atom feed URL.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct Channel {
    pub name: String,
    pub url: String,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Parse config from a TOML string (useful for testing)
    pub fn from_str(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// The configured API key, or the YOUTUBE_API_KEY environment variable.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var("YOUTUBE_API_KEY").ok())
    }
}
