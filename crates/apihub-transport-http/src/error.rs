//! Error types for the HTTP transport.

use thiserror::Error;

/// Errors raised while starting or running the HTTP server.
#[derive(Debug, Error)]
pub enum HttpTransportError {
    /// `host:port` does not form a socket address.
    #[error("invalid listen address '{addr}': {reason}")]
    Address {
        /// The rejected address.
        addr: String,
        /// Parser message.
        reason: String,
    },
    /// Failed to bind to the TCP address.
    #[error("failed to bind on {addr}: {source}")]
    Bind {
        /// The address string.
        addr: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The server stopped with an I/O error.
    #[error("server error: {0}")]
    Serve(String),
}
