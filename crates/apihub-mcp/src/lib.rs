//! # apihub-mcp
//!
//! MCP application layer: the four-tool registry, the dispatcher that maps
//! tool calls onto the gateway, and `McpHandler`, which routes JSON-RPC
//! requests to the method implementations. Transport crates feed it
//! messages and write back whatever it returns.

pub mod arguments;
mod dispatch;
pub mod dispatcher;
pub mod handler;
pub mod registry;

pub use dispatcher::{DispatchError, ToolDispatcher};
pub use handler::{JsonRpcOutput, McpHandler};
pub use registry::{input_schema, ToolRegistry};
