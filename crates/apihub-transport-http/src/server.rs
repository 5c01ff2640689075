//! HTTP server that binds the router to a TCP socket.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use apihub_config::ServerConfig;
use apihub_mcp::McpHandler;

use crate::error::HttpTransportError;
use crate::router::{build_router, AppState};

/// Axum-based HTTP server for the MCP JSON-RPC transport.
pub struct HttpServer {
    pub(crate) addr: SocketAddr,
    pub(crate) state: AppState,
}

impl HttpServer {
    /// Creates a server listening on `addr`.
    pub fn new(handler: Arc<McpHandler>, addr: SocketAddr, token: Option<String>) -> Self {
        Self {
            addr,
            state: AppState { handler, token },
        }
    }

    /// Creates a server from the `server` config section.
    ///
    /// # Errors
    ///
    /// `Address` when `host:port` is not a socket address.
    pub fn from_config(
        handler: Arc<McpHandler>,
        config: &ServerConfig,
    ) -> Result<Self, HttpTransportError> {
        let raw = format!("{}:{}", config.host, config.port);
        let addr = raw
            .parse::<SocketAddr>()
            .map_err(|e| HttpTransportError::Address {
                addr: raw.clone(),
                reason: e.to_string(),
            })?;
        Ok(Self::new(handler, addr, config.token.clone()))
    }

    /// The address the server will bind.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Serves until Ctrl-C.
    ///
    /// # Errors
    ///
    /// Returns an error if the bind fails or the server stops abnormally.
    pub async fn run(self) -> Result<(), HttpTransportError> {
        self.run_until(async {
            if tokio::signal::ctrl_c().await.is_err() {
                // No signal handler available: serve until the process is killed.
                std::future::pending::<()>().await;
            }
        })
        .await
    }

    /// Serves until `shutdown` resolves, then finishes in-flight requests.
    ///
    /// # Errors
    ///
    /// Returns an error if the bind fails or the server stops abnormally.
    pub async fn run_until<F>(self, shutdown: F) -> Result<(), HttpTransportError>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let listener = TcpListener::bind(self.addr)
            .await
            .map_err(|e| HttpTransportError::Bind {
                addr: self.addr.to_string(),
                source: e,
            })?;
        let local = listener.local_addr().unwrap_or(self.addr);
        info!(addr = %local, auth = self.state.token.is_some(), "MCP HTTP server ready");

        axum::serve(listener, build_router(self.state))
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| HttpTransportError::Serve(e.to_string()))?;

        info!("MCP HTTP server stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apihub_gateway::{Gateway, MockBackend};

    fn make_handler() -> Arc<McpHandler> {
        Arc::new(McpHandler::new(Gateway::new(Arc::new(MockBackend::new()))))
    }

    #[test]
    fn from_config_uses_host_and_port() {
        let config = ServerConfig {
            host: "127.0.0.1".into(),
            port: 3000,
            token: Some("s3cret".into()),
            ..ServerConfig::default()
        };
        let server = HttpServer::from_config(make_handler(), &config).expect("server");
        assert_eq!(server.addr().port(), 3000);
        assert_eq!(server.state.token.as_deref(), Some("s3cret"));
    }

    #[test]
    fn from_config_rejects_hostname() {
        let config = ServerConfig {
            host: "not an address".into(),
            ..ServerConfig::default()
        };
        assert!(matches!(
            HttpServer::from_config(make_handler(), &config),
            Err(HttpTransportError::Address { .. })
        ));
    }

    #[tokio::test]
    async fn run_until_stops_on_shutdown() {
        let server = HttpServer::new(make_handler(), SocketAddr::from(([127, 0, 0, 1], 0)), None);
        server.run_until(async {}).await.expect("clean stop");
    }
}
