//! Configuration loader (defaults + file + env merge).

use std::path::Path;

use apihub_types::DiagnosticError;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use thiserror::Error;

use crate::schema::HubConfig;

/// Prefix of environment overrides, e.g. `APIHUB_BACKEND__AGENT_API_KEY`.
pub const ENV_PREFIX: &str = "APIHUB_";

/// Errors from configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The named config file does not exist.
    #[error("config file not found: {path}")]
    FileNotFound { path: String },
    /// Failed to load or merge configuration.
    #[error("configuration error: {0}")]
    Load(String),
    /// A value parsed but violates a constraint.
    #[error("invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl DiagnosticError for ConfigError {
    fn hint(&self) -> Option<String> {
        match self {
            Self::FileNotFound { .. } => {
                Some("The --config path does not point at an existing file.".into())
            }
            Self::Load(_) => Some(
                "A config file or APIHUB_* variable has an unknown key or a value of the wrong type."
                    .into(),
            ),
            Self::Invalid { .. } => None,
        }
    }

    fn fix(&self) -> Option<String> {
        match self {
            Self::FileNotFound { .. } => Some("Omit --config to run on defaults and env vars.".into()),
            Self::Load(_) => Some(
                "Nested env keys use a double underscore: APIHUB_BACKEND__BASE_URL=https://...".into(),
            ),
            Self::Invalid { field, .. } => Some(format!("Correct '{field}' in the config file.")),
        }
    }
}

/// Loads configuration by merging layers:
/// 1. Default values
/// 2. Config file (if given)
/// 3. Environment variables (`APIHUB_` prefix, `__` between sections)
///
/// The result is validated before it is returned.
pub fn load_config(config_path: Option<&str>) -> Result<HubConfig, ConfigError> {
    let mut figment = Figment::from(Serialized::defaults(HubConfig::default()));

    if let Some(path) = config_path {
        if !Path::new(path).is_file() {
            return Err(ConfigError::FileNotFound {
                path: path.to_string(),
            });
        }
        figment = figment.merge(Toml::file(path));
    }

    figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

    let config: HubConfig = figment
        .extract()
        .map_err(|e| ConfigError::Load(e.to_string()))?;
    config.validate()?;
    Ok(config)
}
