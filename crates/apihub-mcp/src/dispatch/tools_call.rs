//! Handles the `tools/call` MCP method.

use serde_json::{Map, Value};
use tracing::debug;

use apihub_protocol::mcp::tools::{ToolsCallParams, ToolsCallResult};
use apihub_protocol::{error_codes, RequestId};

use crate::dispatcher::{DispatchError, ToolDispatcher};
use crate::handler::JsonRpcOutput;

/// Runs one tool and wraps its payload as a single text content item.
pub(crate) async fn handle_tools_call(
    id: RequestId,
    params: Option<&Value>,
    dispatcher: &ToolDispatcher,
) -> JsonRpcOutput {
    // 1. Parse params
    let call_params = match params {
        None => ToolsCallParams::default(),
        Some(p) if p.is_object() => match serde_json::from_value::<ToolsCallParams>(p.clone()) {
            Ok(cp) => cp,
            Err(e) => {
                return JsonRpcOutput::error(
                    id,
                    error_codes::INVALID_PARAMS,
                    format!("Invalid params for tools/call: {e}"),
                )
            }
        },
        Some(_) => {
            return JsonRpcOutput::error(
                id,
                error_codes::INVALID_PARAMS,
                "Invalid params for tools/call: expected an object",
            )
        }
    };

    // 2. Resolve the tool name
    let name = match call_params.name {
        Some(Value::String(name)) if !name.is_empty() => name,
        None | Some(Value::Null) | Some(Value::String(_)) => {
            return JsonRpcOutput::error(
                id,
                error_codes::METHOD_NOT_FOUND,
                "Tool not found: missing 'name'",
            )
        }
        Some(other) => {
            return JsonRpcOutput::error(
                id,
                error_codes::METHOD_NOT_FOUND,
                format!("Tool not found: {other}"),
            )
        }
    };

    let arguments = match call_params.arguments {
        None | Some(Value::Null) => Map::new(),
        Some(Value::Object(map)) => map,
        Some(_) => {
            return JsonRpcOutput::error(
                id,
                error_codes::INVALID_PARAMS,
                "Invalid params for tools/call: 'arguments' must be an object",
            )
        }
    };

    // 3. Dispatch
    debug!(tool = %name, "calling tool");
    let result = match dispatcher.dispatch(&name, &arguments).await {
        Ok(result) => result,
        Err(e @ DispatchError::UnknownTool(_)) => {
            return JsonRpcOutput::error(id, error_codes::METHOD_NOT_FOUND, e.to_string())
        }
    };

    // 4. Wrap the payload
    let is_error = result.is_failure();
    match serde_json::to_string_pretty(&result.to_payload()) {
        Ok(text) => JsonRpcOutput::from_result(id, ToolsCallResult::text(text, is_error)),
        Err(e) => JsonRpcOutput::error(id, error_codes::INTERNAL_ERROR, e.to_string()),
    }
}
