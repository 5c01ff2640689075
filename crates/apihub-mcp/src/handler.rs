//! JSON-RPC request handler.
//!
//! `McpHandler` owns the tool dispatcher and routes each request to the
//! matching function in `dispatch`. It keeps no per-request state, so a
//! single instance can serve any number of concurrent requests.

use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, trace, warn};

use apihub_gateway::Gateway;
use apihub_protocol::{
    error_codes, methods, JsonRpcErrorResponse, JsonRpcNotification, JsonRpcRequest,
    JsonRpcResponse, RequestId, JSONRPC_VERSION,
};

use crate::dispatch;
use crate::dispatcher::ToolDispatcher;
use crate::registry::ToolRegistry;

/// One reply on the wire: either a result or an error object.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum JsonRpcOutput {
    /// Successful response.
    Success(JsonRpcResponse),
    /// Error response.
    Error(JsonRpcErrorResponse),
}

impl JsonRpcOutput {
    /// Builds an error reply.
    pub fn error(id: RequestId, code: i32, message: impl Into<String>) -> Self {
        Self::Error(JsonRpcErrorResponse::error(id, code, message))
    }

    /// Reply for input that is not valid JSON.
    pub fn parse_error(detail: impl std::fmt::Display) -> Self {
        Self::error(
            RequestId::Null,
            error_codes::PARSE_ERROR,
            format!("Parse error: {detail}"),
        )
    }

    /// Serializes a value as a success reply, falling back to `-32603`.
    pub(crate) fn from_result<T: Serialize>(id: RequestId, result: T) -> Self {
        match serde_json::to_value(result) {
            Ok(v) => Self::Success(JsonRpcResponse::success(id, v)),
            Err(e) => Self::error(id, error_codes::INTERNAL_ERROR, e.to_string()),
        }
    }

    /// Serializes the reply as one line of JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Routes JSON-RPC messages to the MCP method implementations.
#[derive(Debug, Clone)]
pub struct McpHandler {
    dispatcher: ToolDispatcher,
    registry: &'static ToolRegistry,
}

impl McpHandler {
    /// Creates a handler whose tools run against `gateway`.
    pub fn new(gateway: Gateway) -> Self {
        Self {
            dispatcher: ToolDispatcher::new(gateway),
            registry: ToolRegistry::global(),
        }
    }

    /// The tool catalogue served by `tools/list`.
    pub fn registry(&self) -> &ToolRegistry {
        self.registry
    }

    /// Handles one raw text message.
    ///
    /// Returns `None` when no reply is due (notifications and blank input).
    pub async fn handle_text(&self, text: &str) -> Option<JsonRpcOutput> {
        if text.trim().is_empty() {
            return None;
        }
        match serde_json::from_str::<Value>(text) {
            Ok(message) => self.handle_message(message).await,
            Err(e) => {
                warn!(error = %e, "failed to parse JSON-RPC message");
                Some(JsonRpcOutput::parse_error(e))
            }
        }
    }

    /// Handles one decoded message.
    ///
    /// A message without an `id` (or with `id: null`) is a notification
    /// and never gets a reply.
    pub async fn handle_message(&self, message: Value) -> Option<JsonRpcOutput> {
        let Value::Object(obj) = message else {
            return Some(JsonRpcOutput::error(
                RequestId::Null,
                error_codes::INVALID_REQUEST,
                "Invalid Request: expected a JSON object",
            ));
        };

        let method = obj.get("method").and_then(Value::as_str);
        let params = obj.get("params").filter(|p| !p.is_null()).cloned();

        let id = match obj.get("id") {
            None | Some(Value::Null) => {
                return match method {
                    Some(method) => {
                        self.handle_notification(&JsonRpcNotification::new(method, params));
                        None
                    }
                    None => Some(JsonRpcOutput::error(
                        RequestId::Null,
                        error_codes::INVALID_REQUEST,
                        "Invalid Request: missing 'method'",
                    )),
                };
            }
            Some(id) => RequestId::from(id.clone()),
        };

        if obj.get("jsonrpc").and_then(Value::as_str) != Some(JSONRPC_VERSION) {
            return Some(JsonRpcOutput::error(
                id,
                error_codes::INVALID_REQUEST,
                "Invalid Request: 'jsonrpc' must be \"2.0\"",
            ));
        }
        let Some(method) = method else {
            return Some(JsonRpcOutput::error(
                id,
                error_codes::INVALID_REQUEST,
                "Invalid Request: missing 'method'",
            ));
        };

        let request = JsonRpcRequest::new(id, method, params);
        Some(self.dispatch(&request).await)
    }

    /// Dispatches a request to its method.
    ///
    /// A panic anywhere below is caught and answered with `-32603`.
    pub async fn dispatch(&self, request: &JsonRpcRequest) -> JsonRpcOutput {
        debug!(method = %request.method, id = ?request.id, "received request");
        match AssertUnwindSafe(self.route(request)).catch_unwind().await {
            Ok(output) => output,
            Err(panic) => {
                let message = panic_message(panic.as_ref());
                error!(method = %request.method, %message, "handler panicked");
                JsonRpcOutput::error(
                    request.id.clone(),
                    error_codes::INTERNAL_ERROR,
                    format!("Internal error: {message}"),
                )
            }
        }
    }

    async fn route(&self, request: &JsonRpcRequest) -> JsonRpcOutput {
        let id = request.id.clone();
        match request.method.as_str() {
            methods::INITIALIZE => dispatch::initialize::handle_initialize(id, request.params.as_ref()),
            methods::TOOLS_LIST => dispatch::tools_list::handle_tools_list(id, self.registry),
            methods::TOOLS_CALL => {
                dispatch::tools_call::handle_tools_call(id, request.params.as_ref(), &self.dispatcher)
                    .await
            }
            methods::PING => dispatch::ping::handle_ping(id),
            m if m.starts_with(methods::NOTIFICATION_PREFIX) => {
                // Sent with an id, so it must be answered.
                JsonRpcOutput::from_result(id, serde_json::json!({}))
            }
            other => JsonRpcOutput::error(
                id,
                error_codes::METHOD_NOT_FOUND,
                format!("Method not found: {other}"),
            ),
        }
    }

    /// Handles a notification. Never produces a reply.
    pub fn handle_notification(&self, notification: &JsonRpcNotification) {
        match notification.method.as_str() {
            methods::NOTIFICATIONS_INITIALIZED => debug!("client initialized"),
            other => trace!(method = %other, "ignoring notification"),
        }
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "handler panicked".to_string()
    }
}
