//! Handles the `ping` MCP method.

use apihub_protocol::mcp::PingResult;
use apihub_protocol::RequestId;

use crate::handler::JsonRpcOutput;

pub(crate) fn handle_ping(id: RequestId) -> JsonRpcOutput {
    JsonRpcOutput::from_result(id, PingResult::default())
}
