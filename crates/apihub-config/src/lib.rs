//! # apihub-config
//!
//! Configuration management for the API hub adapter.
//! Supports layered config: defaults -> TOML file -> `APIHUB_` env vars.

pub mod loader;
pub mod schema;

pub use loader::{load_config, ConfigError, ENV_PREFIX};
pub use schema::{BackendConfig, HubConfig, LogFormat, LoggingConfig, ServerConfig, TransportKind};
