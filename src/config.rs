use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Address used when nothing else is configured
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:2300";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub console: ConsoleConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: Option<String>,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// Quiet period before a free-text form reports its parameters
    pub debounce_ms: u64,
    /// How long a record stays marked as copied
    pub copied_ack_ms: u64,
    pub stale_policy: StalePolicy,
}

/// Which response wins when several requests are in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StalePolicy {
    /// Drop any response older than the latest issued request
    #[default]
    LatestRequested,
    /// Apply every response in arrival order
    LastArrived,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: 30,
        }
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 500,
            copied_ack_ms: 2000,
            stale_policy: StalePolicy::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and config file
    pub fn load() -> anyhow::Result<Self> {
        let mut config = config::Config::builder();

        // Add default configuration
        config = config.add_source(config::Config::try_from(&AppConfig::default())?);

        // Add config file if it exists
        config = config.add_source(config::File::with_name("console").required(false));

        // Environment variables like CONSOLE_API__BASE_URL
        config = config.add_source(
            config::Environment::with_prefix("CONSOLE")
                .prefix_separator("_")
                .separator("__"),
        );

        let config = config.build()?;
        let app_config: AppConfig = config.try_deserialize()?;

        Ok(app_config)
    }

    /// Get the backend base address from config or environment
    pub fn api_base_url(&self) -> String {
        let url = self
            .api
            .base_url
            .clone()
            .filter(|url| !url.trim().is_empty())
            .or_else(|| std::env::var("API_URL").ok().filter(|url| !url.trim().is_empty()))
            // Default for local development
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        url.trim().trim_end_matches('/').to_string()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }
}

impl ConsoleConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn copied_ack(&self) -> Duration {
        Duration::from_millis(self.copied_ack_ms)
    }
}
