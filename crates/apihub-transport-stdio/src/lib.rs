//! # apihub-transport-stdio
//!
//! Stdio transport adapter for MCP JSON-RPC communication.
//!
//! Provides line-delimited JSON transport over stdin/stdout,
//! and a concurrent server loop that ties it to an `McpHandler`.

pub mod error;
pub mod server;
pub mod transport;

pub use error::TransportError;
pub use apihub_mcp::{JsonRpcOutput, McpHandler};
pub use server::McpServer;
pub use transport::{InboundLine, StdioTransport};
