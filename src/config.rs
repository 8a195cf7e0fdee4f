use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// GitHub (pipeline history + issue tracker) configuration
    #[serde(default)]
    pub github: GitHubConfig,

    /// Metric computation configuration
    #[serde(default)]
    pub computation: ComputationConfig,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Config {
    /// Load configuration from file and environment
    pub fn load() -> Result<Self> {
        let config_path =
            std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config/default.toml".to_string());

        let config: Config = config::Config::builder()
            // Start with default values
            .add_source(config::File::from_str(
                include_str!("../config/default.toml"),
                config::FileFormat::Toml,
            ))
            // Override with config file if it exists
            .add_source(config::File::with_name(&config_path).required(false))
            // Override with environment variables (e.g. DORA__SERVER__PORT)
            .add_source(
                config::Environment::with_prefix("DORA")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Reject values the calculators cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.computation.window_days == 0 {
            return Err(AppError::Configuration(
                "computation.window_days must be at least 1".to_string(),
            ));
        }
        // GitHub caps per_page at 100
        if !(1..=100).contains(&self.github.page_size) {
            return Err(AppError::Configuration(format!(
                "github.page_size must be between 1 and 100, got {}",
                self.github.page_size
            )));
        }
        if self.github.incident_label.trim().is_empty() {
            return Err(AppError::Configuration(
                "github.incident_label must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP server host
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Route receiving signed webhook deliveries
    #[serde(default = "default_webhook_path")]
    pub webhook_path: String,

    /// Route serving the Prometheus exposition feed
    #[serde(default = "default_metrics_path")]
    pub metrics_path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            webhook_path: default_webhook_path(),
            metrics_path: default_metrics_path(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubConfig {
    /// REST API base URL
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Name of the env var holding the API token
    #[serde(default = "default_token_env")]
    pub token_env: String,

    /// Name of the env var holding the webhook secret
    #[serde(default = "default_webhook_secret_env")]
    pub webhook_secret_env: String,

    /// Records requested per call; only the first page is read
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Per-request timeout (seconds)
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// User-Agent sent to the API
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Label an issue must carry to count as an incident
    #[serde(default = "default_incident_label")]
    pub incident_label: String,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            token_env: default_token_env(),
            webhook_secret_env: default_webhook_secret_env(),
            page_size: default_page_size(),
            request_timeout_secs: default_request_timeout(),
            user_agent: default_user_agent(),
            incident_label: default_incident_label(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationConfig {
    /// Trailing window, in days, every calculator looks back over
    #[serde(default = "default_window_days")]
    pub window_days: u32,
}

impl Default for ComputationConfig {
    fn default() -> Self {
        Self {
            window_days: default_window_days(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub json_logs: bool,

    /// Service name
    #[serde(default = "default_service_name")]
    pub service_name: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json_logs: false,
            service_name: default_service_name(),
        }
    }
}

/// Secrets resolved from the environment at startup
#[derive(Clone)]
pub struct Credentials {
    pub github_token: String,
    pub webhook_secret: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("github_token", &"<redacted>")
            .field("webhook_secret", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    /// Read both secrets from the process environment
    pub fn from_env(config: &GitHubConfig) -> Result<Self> {
        Self::from_lookup(config, |name| std::env::var(name).ok())
    }

    /// Resolve both secrets through `lookup`; either one missing is fatal
    pub fn from_lookup<F>(config: &GitHubConfig, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            github_token: resolve_secret(&config.token_env, &lookup)?,
            webhook_secret: resolve_secret(&config.webhook_secret_env, &lookup)?,
        })
    }
}

/// Merge a dotenv file into the process environment.
///
/// `None` reads `.env` from the working directory or its parents. Variables
/// already set in the environment are not overridden. A missing file is
/// `Ok(None)`; an unreadable or malformed one is a configuration error.
pub fn load_dotenv(path: Option<&Path>) -> Result<Option<PathBuf>> {
    let loaded = match path {
        Some(path) => dotenvy::from_path(path).map(|_| path.to_path_buf()),
        None => dotenvy::dotenv(),
    };

    match loaded {
        Ok(path) => Ok(Some(path)),
        Err(e) if e.not_found() => Ok(None),
        Err(e) => Err(AppError::Configuration(format!("Failed to load .env file: {}", e))),
    }
}

/// Resolve a single secret by env var name
pub fn resolve_secret<F>(env_name: &str, lookup: &F) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(env_name) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(AppError::Configuration(format!("{} must be set", env_name))),
    }
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    4040
}

fn default_webhook_path() -> String {
    "/webhook".to_string()
}

fn default_metrics_path() -> String {
    "/metrics".to_string()
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_token_env() -> String {
    "GITHUB_TOKEN".to_string()
}

fn default_webhook_secret_env() -> String {
    "WEBHOOK_SECRET".to_string()
}

fn default_page_size() -> u32 {
    100
}

fn default_request_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    concat!("dora-metrics/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_incident_label() -> String {
    "incident".to_string()
}

fn default_window_days() -> u32 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_service_name() -> String {
    "dora-metrics".to_string()
}
