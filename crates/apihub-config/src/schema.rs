//! Configuration schema types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

use crate::loader::ConfigError;

/// Top-level adapter configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HubConfig {
    /// Remote hub connection settings.
    #[serde(default)]
    pub backend: BackendConfig,
    /// Transport settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl HubConfig {
    /// Checks cross-field constraints that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.backend.mock {
            check_url("backend.base_url", &self.backend.base_url)?;
        }
        if let Some(url) = &self.backend.execute_url {
            check_url("backend.execute_url", url)?;
        }
        if let Some(url) = &self.backend.feedback_url {
            check_url("backend.feedback_url", url)?;
        }
        if self.backend.api_key_header.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "backend.api_key_header",
                reason: "header name must not be empty".to_string(),
            });
        }
        if self.server.transport == TransportKind::Http && self.server.port == 0 {
            return Err(ConfigError::Invalid {
                field: "server.port",
                reason: "port 0 is not allowed for the http transport".to_string(),
            });
        }
        Ok(())
    }
}

fn check_url(field: &'static str, value: &str) -> Result<(), ConfigError> {
    let invalid = |reason: String| ConfigError::Invalid { field, reason };
    let url = Url::parse(value).map_err(|e| invalid(format!("'{value}' is not a valid URL: {e}")))?;
    match url.scheme() {
        "http" | "https" => {}
        other => return Err(invalid(format!("unsupported scheme '{other}' in '{value}'"))),
    }
    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(()),
        _ => Err(invalid(format!("'{value}' has no host"))),
    }
}

/// Remote hub connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the hub; search and load endpoints hang off it.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Execution endpoint base, when it differs from `base_url`.
    #[serde(default)]
    pub execute_url: Option<String>,
    /// Full URL of the feedback endpoint.
    #[serde(default)]
    pub feedback_url: Option<String>,
    /// Agent API key sent with every hub request.
    #[serde(default)]
    pub agent_api_key: Option<String>,
    /// Caller identity attached to feedback.
    #[serde(default)]
    pub user_id: Option<String>,
    /// Header carrying the agent API key.
    #[serde(default = "default_api_key_header")]
    pub api_key_header: String,
    /// User-Agent for outbound requests.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// TCP connect timeout in seconds.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// Whole-request timeout in seconds. Unset means the client default.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    /// Serve from the built-in catalogue instead of the network.
    #[serde(default)]
    pub mock: bool,
}

impl BackendConfig {
    /// Connect timeout as a `Duration`.
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Request timeout as a `Duration`, if configured.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Base used for execution calls.
    pub fn execute_base(&self) -> &str {
        self.execute_url.as_deref().unwrap_or(&self.base_url)
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            execute_url: None,
            feedback_url: None,
            agent_api_key: None,
            user_id: None,
            api_key_header: default_api_key_header(),
            user_agent: default_user_agent(),
            connect_timeout_secs: default_connect_timeout_secs(),
            request_timeout_secs: None,
            mock: false,
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:8080/api/v1".to_string()
}
fn default_api_key_header() -> String {
    "X-API-KEY".to_string()
}
fn default_user_agent() -> String {
    format!("apihub/{}", env!("CARGO_PKG_VERSION"))
}
fn default_connect_timeout_secs() -> u64 {
    10
}

/// Which transport `serve` starts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    /// Line-delimited JSON over stdin/stdout.
    #[default]
    Stdio,
    /// JSON-RPC over `POST /mcp`.
    Http,
}

impl FromStr for TransportKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "stdio" => Ok(Self::Stdio),
            "http" => Ok(Self::Http),
            other => Err(ConfigError::Invalid {
                field: "server.transport",
                reason: format!("unknown transport '{other}' (expected stdio or http)"),
            }),
        }
    }
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdio => f.write_str("stdio"),
            Self::Http => f.write_str("http"),
        }
    }
}

/// Transport settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Transport to serve.
    #[serde(default)]
    pub transport: TransportKind,
    /// Bind address for the http transport.
    #[serde(default = "default_host")]
    pub host: String,
    /// Bind port for the http transport.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Bearer token required on `POST /mcp`, if set.
    #[serde(default)]
    pub token: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            transport: TransportKind::default(),
            host: default_host(),
            port: default_port(),
            token: None,
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    8010
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Plain,
    /// One JSON object per event.
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g. "info", "debug", "apihub_gateway=trace").
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
    /// Append logs to this file instead of stderr.
    #[serde(default)]
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
            file: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_url_accepts_http_and_https() {
        assert!(check_url("f", "http://localhost:1").is_ok());
        assert!(check_url("f", "https://hub.example.com/api").is_ok());
    }

    #[test]
    fn check_url_rejects_other_schemes() {
        assert!(check_url("f", "ftp://x").is_err());
        assert!(check_url("f", "https://").is_err());
        assert!(check_url("f", "localhost").is_err());
    }

    #[test]
    fn check_url_rejects_malformed_hosts() {
        for bad in ["http://exa mple.com", "https://?x", "http://:::::", "http://"] {
            assert!(check_url("f", bad).is_err(), "{bad} accepted");
        }
    }

    #[test]
    fn validate_rejects_malformed_base_url() {
        let mut config = HubConfig::default();
        config.backend.base_url = "http://exa mple.com".into();
        let err = config.validate().expect_err("invalid");
        assert!(matches!(err, ConfigError::Invalid { field: "backend.base_url", .. }));
        config.backend.base_url = "https://hub.example.com/api/v1".into();
        config.backend.feedback_url = Some("https://?x".into());
        assert!(config.validate().is_err());
    }

    #[test]
    fn transport_kind_parses_case_insensitively() {
        assert_eq!("HTTP".parse::<TransportKind>().expect("parse"), TransportKind::Http);
        assert!("grpc".parse::<TransportKind>().is_err());
    }

    #[test]
    fn execute_base_falls_back_to_base_url() {
        let mut b = BackendConfig::default();
        assert_eq!(b.execute_base(), b.base_url);
        b.execute_url = Some("https://exec.example.com".into());
        assert_eq!(b.execute_base(), "https://exec.example.com");
    }
}
