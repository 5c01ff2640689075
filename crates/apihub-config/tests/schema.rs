//! Integration tests for apihub-config schema types.

use apihub_config::schema::{
    BackendConfig, HubConfig, LogFormat, LoggingConfig, ServerConfig, TransportKind,
};
use std::time::Duration;

#[test]
fn hub_config_default_values() {
    let config = HubConfig::default();
    assert_eq!(config.backend.api_key_header, "X-API-KEY");
    assert_eq!(config.backend.connect_timeout_secs, 10);
    assert!(config.backend.request_timeout_secs.is_none());
    assert!(!config.backend.mock);
    assert_eq!(config.server.transport, TransportKind::Stdio);
    assert_eq!(config.server.port, 8010);
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.format, LogFormat::Plain);
}

#[test]
fn defaults_pass_validation() {
    HubConfig::default().validate().expect("valid");
}

#[test]
fn hub_config_serde_roundtrip() {
    let config = HubConfig::default();
    let json = serde_json::to_string(&config).expect("serialize");
    let back: HubConfig = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back.backend.base_url, config.backend.base_url);
    assert_eq!(back.server.host, config.server.host);
}

#[test]
fn timeouts_convert_to_durations() {
    let backend = BackendConfig {
        connect_timeout_secs: 3,
        request_timeout_secs: Some(45),
        ..BackendConfig::default()
    };
    assert_eq!(backend.connect_timeout(), Duration::from_secs(3));
    assert_eq!(backend.request_timeout(), Some(Duration::from_secs(45)));
}

#[test]
fn invalid_base_url_rejected() {
    let mut config = HubConfig::default();
    config.backend.base_url = "not a url".into();
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("backend.base_url"));
}

#[test]
fn mock_mode_skips_base_url_check() {
    let mut config = HubConfig::default();
    config.backend.base_url = String::new();
    config.backend.mock = true;
    assert!(config.validate().is_ok());
}

#[test]
fn invalid_feedback_url_rejected() {
    let mut config = HubConfig::default();
    config.backend.feedback_url = Some("feedback.example.com".into());
    assert!(config.validate().is_err());
}

#[test]
fn empty_header_rejected() {
    let mut config = HubConfig::default();
    config.backend.api_key_header = "  ".into();
    assert!(config.validate().is_err());
}

#[test]
fn http_port_zero_rejected() {
    let config = HubConfig {
        server: ServerConfig {
            transport: TransportKind::Http,
            port: 0,
            ..ServerConfig::default()
        },
        ..HubConfig::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn logging_default_level() {
    let log = LoggingConfig::default();
    assert_eq!(log.level, "info");
    assert!(log.file.is_none());
}

#[test]
fn deny_unknown_fields_rejects_extra_key() {
    let json = r#"{"backend":{},"server":{},"logging":{},"runtime":{}}"#;
    let result: Result<HubConfig, _> = serde_json::from_str(json);
    assert!(result.is_err());
}

#[test]
fn partial_config_uses_defaults_for_missing() {
    let json = r#"{"server":{"transport":"http","port":9100}}"#;
    let config: HubConfig = serde_json::from_str(json).expect("parse");
    assert_eq!(config.server.transport, TransportKind::Http);
    assert_eq!(config.server.port, 9100);
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.backend.api_key_header, "X-API-KEY");
}
