//! Layered loading tests. Each test runs inside a figment `Jail` so that
//! env vars and the working directory are isolated.

use apihub_config::{load_config, ConfigError, TransportKind};
use apihub_types::DiagnosticError;
use figment::Jail;

#[test]
fn defaults_without_file_or_env() {
    Jail::expect_with(|_jail| {
        let config = load_config(None).map_err(|e| e.to_string())?;
        assert_eq!(config.server.transport, TransportKind::Stdio);
        assert!(config.backend.agent_api_key.is_none());
        Ok(())
    });
}

#[test]
fn toml_file_overrides_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "apihub.toml",
            r#"
            [backend]
            base_url = "https://hub.example.com/api/v1"
            feedback_url = "https://hub.example.com/feedback"
            request_timeout_secs = 20

            [server]
            transport = "http"
            port = 9001
            "#,
        )?;
        let config = load_config(Some("apihub.toml")).map_err(|e| e.to_string())?;
        assert_eq!(config.backend.base_url, "https://hub.example.com/api/v1");
        assert_eq!(config.backend.request_timeout_secs, Some(20));
        assert_eq!(config.server.transport, TransportKind::Http);
        assert_eq!(config.server.port, 9001);
        Ok(())
    });
}

#[test]
fn env_overrides_file() {
    Jail::expect_with(|jail| {
        jail.create_file("apihub.toml", "[server]\nport = 9001\n")?;
        jail.set_env("APIHUB_SERVER__PORT", "9002");
        jail.set_env("APIHUB_BACKEND__AGENT_API_KEY", "ak_test");
        let config = load_config(Some("apihub.toml")).map_err(|e| e.to_string())?;
        assert_eq!(config.server.port, 9002);
        assert_eq!(config.backend.agent_api_key.as_deref(), Some("ak_test"));
        Ok(())
    });
}

#[test]
fn missing_file_is_reported() {
    Jail::expect_with(|_jail| {
        let err = load_config(Some("nope.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound { .. }));
        assert!(err.hint().is_some());
        Ok(())
    });
}

#[test]
fn unknown_key_fails_to_load() {
    Jail::expect_with(|jail| {
        jail.create_file("apihub.toml", "[sandbox]\nfuel = 1\n")?;
        let err = load_config(Some("apihub.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Load(_)));
        assert!(err.fix().expect("fix").contains("APIHUB_"));
        Ok(())
    });
}

#[test]
fn loaded_config_is_validated() {
    Jail::expect_with(|jail| {
        jail.set_env("APIHUB_BACKEND__BASE_URL", "hub.local");
        let err = load_config(None).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "backend.base_url", .. }));
        Ok(())
    });
}
