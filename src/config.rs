use serde::Deserialize;
use std::time::Duration;

/// Prefix for every environment variable read by [`Config::from_env`]
pub const ENV_PREFIX: &str = "ANIVIBE_";

/// Client configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Base URL of the recommendation backend
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Path of the recommendations endpoint, relative to the base URL
    #[serde(default = "default_recommendations_path")]
    pub recommendations_path: String,

    /// Per-request timeout for the HTTP transport; unset means wait forever
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_api_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_recommendations_path() -> String {
    "recommendations".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            recommendations_path: default_recommendations_path(),
            request_timeout_secs: None,
        }
    }
}

impl Config {
    /// Load configuration from `ANIVIBE_*` environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Load configuration from an explicit set of variables
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::prefixed(ENV_PREFIX)
            .from_iter(vars)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Full URL of the recommendations endpoint
    pub fn recommendations_url(&self) -> String {
        format!(
            "{}/{}",
            self.api_base_url.trim_end_matches('/'),
            self.recommendations_path.trim_start_matches('/')
        )
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}
