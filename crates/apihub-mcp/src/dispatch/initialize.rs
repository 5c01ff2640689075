//! Handles the `initialize` MCP method.

use serde_json::Value;
use tracing::info;

use apihub_protocol::mcp::initialize::{
    InitializeParams, InitializeResult, ServerCapabilities, ServerInfo, ToolCapability,
    PROTOCOL_VERSION,
};
use apihub_protocol::RequestId;

use crate::handler::JsonRpcOutput;

/// Server name reported in `serverInfo`.
pub(crate) const SERVER_NAME: &str = "apihub";

/// Answers the handshake. Never fails: unreadable params fall back to
/// defaults and the client's protocol version is echoed back.
pub(crate) fn handle_initialize(id: RequestId, params: Option<&Value>) -> JsonRpcOutput {
    let params = InitializeParams::from_value_lenient(params);
    let protocol_version = params
        .protocol_version
        .unwrap_or_else(|| PROTOCOL_VERSION.to_string());
    info!(
        %protocol_version,
        client = params.client_info.as_ref().map(|c| c.name.as_str()).unwrap_or("unknown"),
        "initialize"
    );

    JsonRpcOutput::from_result(
        id,
        InitializeResult {
            protocol_version,
            capabilities: ServerCapabilities {
                tools: Some(ToolCapability {}),
            },
            server_info: ServerInfo {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        },
    )
}
