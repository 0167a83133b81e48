//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Upstream CRM service configuration.
    #[serde(default)]
    pub upstream: UpstreamConfig,
    /// Dashboard view configuration.
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Upstream CRM service configuration.
///
/// When `base_url` is absent the server runs against the built-in demo data set.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL of the CRM REST services, e.g. `http://crm.internal/api`.
    pub base_url: Option<String>,
    /// API key sent as `X-API-Key`.
    pub api_key: Option<String>,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Dashboard view configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    /// Number of activities shown in the recent activity list.
    #[serde(default = "default_recent_activity_limit")]
    pub recent_activity_limit: usize,
    /// Maximum queued notifications before the oldest is dropped.
    #[serde(default = "default_notification_capacity")]
    pub notification_capacity: usize,
}

fn default_recent_activity_limit() -> usize {
    10
}

fn default_notification_capacity() -> usize {
    20
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            recent_activity_limit: default_recent_activity_limit(),
            notification_capacity: default_notification_capacity(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources, later ones overriding earlier ones: `config/default`,
    /// `config/{RUN_MODE}`, then `CRM__SECTION__KEY` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("CRM").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
