//! `apihub serve` command.
//!
//! Starts the MCP server over stdio or HTTP. Flags override the loaded
//! configuration for this run only.

use std::sync::Arc;

use clap::Args;
use tracing::info;

use apihub_config::{HubConfig, TransportKind};
use apihub_gateway::Gateway;
use apihub_mcp::McpHandler;
use apihub_transport_http::HttpServer;
use apihub_transport_stdio::{McpServer, StdioTransport};

use crate::output;

/// Start the MCP server (stdio or HTTP).
#[derive(Debug, Default, Args)]
pub struct ServeArgs {
    /// Transport: stdio or http (overrides server.transport).
    #[arg(long)]
    pub transport: Option<TransportKind>,
    /// Bind address for the http transport.
    #[arg(long)]
    pub host: Option<String>,
    /// TCP port for the http transport.
    #[arg(long)]
    pub port: Option<u16>,
    /// Bearer token required on POST /mcp.
    #[arg(long)]
    pub token: Option<String>,
    /// Serve the built-in mock catalogue instead of the remote hub.
    #[arg(long)]
    pub mock: bool,
}

impl ServeArgs {
    /// Applies the flags on top of `config`.
    pub fn apply(&self, config: &mut HubConfig) {
        if let Some(transport) = self.transport {
            config.server.transport = transport;
        }
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if self.token.is_some() {
            config.server.token = self.token.clone();
        }
        if self.mock {
            config.backend.mock = true;
        }
    }
}

/// Executes the serve command.
pub async fn execute(args: &ServeArgs, mut config: HubConfig) -> anyhow::Result<()> {
    args.apply(&mut config);
    if let Err(e) = config.validate() {
        output::print_diagnostic(&e);
        return Err(e.into());
    }

    let gateway = match Gateway::from_config(&config.backend) {
        Ok(gateway) => gateway,
        Err(e) => {
            output::print_diagnostic(&e);
            return Err(e.into());
        }
    };
    let handler = Arc::new(McpHandler::new(gateway));

    match config.server.transport {
        TransportKind::Http => {
            let server = HttpServer::from_config(handler, &config.server)?;
            server.run().await?;
        }
        TransportKind::Stdio => {
            let mut server = McpServer::new(StdioTransport::stdio(), handler);
            tokio::select! {
                result = server.run() => result?,
                _ = tokio::signal::ctrl_c() => info!("shutdown signal received"),
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_leave_config_untouched() {
        let mut config = HubConfig::default();
        ServeArgs::default().apply(&mut config);
        assert_eq!(config.server.transport, TransportKind::Stdio);
        assert_eq!(config.server.port, 8010);
        assert!(!config.backend.mock);
    }

    #[test]
    fn flags_override_config() {
        let mut config = HubConfig::default();
        let args = ServeArgs {
            transport: Some(TransportKind::Http),
            host: Some("0.0.0.0".into()),
            port: Some(9000),
            token: Some("t".into()),
            mock: true,
        };
        args.apply(&mut config);
        assert_eq!(config.server.transport, TransportKind::Http);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.token.as_deref(), Some("t"));
        assert!(config.backend.mock);
    }

    #[tokio::test]
    async fn http_port_zero_is_rejected_before_binding() {
        let args = ServeArgs {
            transport: Some(TransportKind::Http),
            port: Some(0),
            mock: true,
            ..ServeArgs::default()
        };
        assert!(execute(&args, HubConfig::default()).await.is_err());
    }

    #[tokio::test]
    async fn malformed_base_url_is_rejected_before_serving() {
        let mut config = HubConfig::default();
        config.backend.base_url = "http://exa mple.com".into();
        let err = execute(&ServeArgs::default(), config).await.expect_err("invalid");
        assert!(err.to_string().contains("backend.base_url"));
    }
}
