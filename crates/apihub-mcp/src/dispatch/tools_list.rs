//! Handles the `tools/list` MCP method.

use apihub_protocol::mcp::tools::ToolsListResult;
use apihub_protocol::RequestId;

use crate::handler::JsonRpcOutput;
use crate::registry::ToolRegistry;

/// Lists every registered tool on a single page.
pub(crate) fn handle_tools_list(id: RequestId, registry: &ToolRegistry) -> JsonRpcOutput {
    JsonRpcOutput::from_result(
        id,
        ToolsListResult {
            tools: registry.mcp_definitions(),
            next_cursor: None,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn lists_four_tools_with_object_schemas() {
        let out = handle_tools_list(RequestId::Number(1), ToolRegistry::global());
        let JsonRpcOutput::Success(resp) = out else {
            panic!("expected success");
        };
        let tools = resp.result["tools"].as_array().expect("tools");
        assert_eq!(tools.len(), 4);
        for t in tools {
            assert!(!t["name"].as_str().expect("name").is_empty());
            assert!(!t["description"].as_str().expect("description").is_empty());
            assert_eq!(t["inputSchema"]["type"], "object");
            assert!(t["inputSchema"]["properties"].is_object());
            assert!(t["inputSchema"]["required"].is_array());
        }
        assert_eq!(resp.result.get("nextCursor"), None::<&Value>);
    }
}
