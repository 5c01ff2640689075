//! MCP method dispatch functions.
//!
//! One module per method, as free functions, so `McpHandler` stays a thin
//! router.

pub(crate) mod initialize;
pub(crate) mod ping;
pub(crate) mod tools_call;
pub(crate) mod tools_list;
