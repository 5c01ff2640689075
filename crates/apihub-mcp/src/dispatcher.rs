//! Tool dispatcher: name -> gateway operation -> `ToolCallResult`.

use serde_json::{json, Map, Value};
use thiserror::Error;
use tracing::{debug, warn};

use apihub_gateway::{ExecuteResponse, Gateway, GatewayError, LoadRequest};
use apihub_types::{ExecutionKind, ExecutionTarget, ToolCallResult, ToolName};

use crate::arguments::{ExecuteArgs, FeedbackArgs, LoadArgs, SearchArgs};

/// Protocol-level dispatch failures.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// No tool with this name.
    #[error("Tool not found: {0}")]
    UnknownTool(String),
}

/// Routes tool calls onto the gateway. Holds no per-request state.
#[derive(Debug, Clone)]
pub struct ToolDispatcher {
    gateway: Gateway,
}

impl ToolDispatcher {
    /// Creates a dispatcher over `gateway`.
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    /// Invokes one tool.
    ///
    /// Only an unknown name is an `Err`; every other failure is a
    /// payload-level `ToolCallResult::Failure`.
    pub async fn dispatch(
        &self,
        tool_name: &str,
        arguments: &Map<String, Value>,
    ) -> Result<ToolCallResult, DispatchError> {
        let tool: ToolName = tool_name
            .parse()
            .map_err(|_| DispatchError::UnknownTool(tool_name.to_string()))?;
        debug!(%tool, "dispatching tool call");

        let result = match tool {
            ToolName::SearchApis => self.search(arguments).await,
            ToolName::LoadExecutionInfo => self.load(arguments).await,
            ToolName::Execute => self.execute(arguments).await,
            ToolName::SubmitFeedback => self.submit_feedback(arguments).await,
        };
        if let ToolCallResult::Failure { message, .. } = &result {
            warn!(%tool, %message, "tool call failed");
        }
        Ok(result)
    }

    async fn search(&self, arguments: &Map<String, Value>) -> ToolCallResult {
        let SearchArgs(query) = match SearchArgs::decode(arguments) {
            Ok(args) => args,
            Err(message) => return ToolCallResult::recoverable(message),
        };
        match self.gateway.search(query).await {
            Ok(outcome) => match serde_json::to_value(outcome) {
                Ok(payload) => ToolCallResult::success(payload),
                Err(e) => ToolCallResult::recoverable(format!("Error encoding search results: {e}")),
            },
            Err(e) => ToolCallResult::recoverable(format!("Error searching APIs: {e}")),
        }
    }

    async fn load(&self, arguments: &Map<String, Value>) -> ToolCallResult {
        let LoadArgs(request) = match LoadArgs::decode(arguments) {
            Ok(args) => args,
            Err(message) => return ToolCallResult::recoverable(message),
        };
        match self.gateway.load(&request).await {
            Ok(config) => ToolCallResult::success(config),
            Err(e) => load_failure(&request, &e),
        }
    }

    async fn execute(&self, arguments: &Map<String, Value>) -> ToolCallResult {
        let ExecuteArgs { target, inputs } = match ExecuteArgs::decode(arguments) {
            Ok(args) => args,
            Err(message) => return ToolCallResult::recoverable(message),
        };
        match self.gateway.execute(&target, &inputs).await {
            Ok(response) => execution_result(&target, response),
            Err(e) => ToolCallResult::recoverable(format!("Error during execution: {e}")),
        }
    }

    async fn submit_feedback(&self, arguments: &Map<String, Value>) -> ToolCallResult {
        let FeedbackArgs { feedback_data } = match FeedbackArgs::decode(arguments) {
            Ok(args) => args,
            Err(message) => return ToolCallResult::failure(message),
        };
        let outcome = self.gateway.submit_feedback(feedback_data).await;
        if outcome.success {
            ToolCallResult::success(json!({"success": true, "message": outcome.message}))
        } else {
            ToolCallResult::failure(outcome.message)
        }
    }
}

fn load_failure(request: &LoadRequest, e: &GatewayError) -> ToolCallResult {
    let message = match e {
        GatewayError::InvalidSelection(detail) => format!("Invalid selection: {detail}"),
        other => format!("Error loading execution info: {other}"),
    };
    ToolCallResult::recoverable(message)
        .with_detail("operation_uuids", json!(request.operation_uuids))
        .with_detail("workflow_uuids", json!(request.workflow_uuids))
        .with_detail("config", json!({}))
}

fn execution_result(target: &ExecutionTarget, response: ExecuteResponse) -> ToolCallResult {
    if response.success {
        let output = match target.kind() {
            ExecutionKind::Operation => response.output.unwrap_or(Value::Null),
            ExecutionKind::Workflow => serde_json::to_value(&response).unwrap_or(Value::Null),
        };
        return ToolCallResult::success(json!({"success": true, "output": output}));
    }

    let message = response.error.clone().unwrap_or_else(|| match target.kind() {
        ExecutionKind::Operation => "Operation execution failed.".to_string(),
        ExecutionKind::Workflow => "Workflow execution failed.".to_string(),
    });
    let detail = serde_json::to_value(&response).unwrap_or(Value::Null);
    ToolCallResult::recoverable(message).with_detail("output", detail)
}
