//! Outcome of a single tool invocation.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::tool::ToolName;

/// Advisory next step attached to a failed tool call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecoveryAction {
    /// Tool the agent may call next.
    pub tool_name: ToolName,
    /// Guidance for the agent.
    pub description: String,
}

impl RecoveryAction {
    /// The feedback suggestion attached to every recoverable failure.
    pub fn submit_feedback() -> Self {
        Self {
            tool_name: ToolName::SubmitFeedback,
            description: "Report this failure to the API hub with submit_feedback. \
                Remove credentials and personal data from feedback_data before sending it."
                .to_string(),
        }
    }
}

/// Result of dispatching a tool call.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolCallResult {
    /// The tool produced a payload.
    Success {
        /// Tool-specific JSON payload.
        payload: Value,
    },
    /// The tool failed at the payload level.
    Failure {
        /// Human-readable failure message.
        message: String,
        /// Suggested follow-up actions; may be empty.
        recovery_hints: Vec<RecoveryAction>,
        /// Extra members merged into the failure payload.
        details: Map<String, Value>,
    },
}

impl ToolCallResult {
    /// Wraps a successful payload.
    pub fn success(payload: Value) -> Self {
        Self::Success { payload }
    }

    /// A failure without recovery hints (validation or feedback errors).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure {
            message: message.into(),
            recovery_hints: Vec::new(),
            details: Map::new(),
        }
    }

    /// A failure pointing the agent at `submit_feedback`.
    pub fn recoverable(message: impl Into<String>) -> Self {
        Self::Failure {
            message: message.into(),
            recovery_hints: vec![RecoveryAction::submit_feedback()],
            details: Map::new(),
        }
    }

    /// Adds a detail member to a failure. No effect on success.
    pub fn with_detail(mut self, key: impl Into<String>, value: Value) -> Self {
        if let Self::Failure { details, .. } = &mut self {
            details.insert(key.into(), value);
        }
        self
    }

    /// True for `Failure`.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure { .. })
    }

    /// Renders the JSON payload returned inside `tools/call` content.
    ///
    /// Failures render as `{success:false, message, ..details}` plus
    /// `suggested_next_actions` when hints are present.
    pub fn to_payload(&self) -> Value {
        match self {
            Self::Success { payload } => payload.clone(),
            Self::Failure {
                message,
                recovery_hints,
                details,
            } => {
                let mut obj = Map::new();
                obj.insert("success".into(), Value::Bool(false));
                obj.insert("message".into(), Value::String(message.clone()));
                for (k, v) in details {
                    if k != "success" && k != "message" {
                        obj.insert(k.clone(), v.clone());
                    }
                }
                if !recovery_hints.is_empty() {
                    obj.insert("suggested_next_actions".into(), json!(recovery_hints));
                }
                Value::Object(obj)
            }
        }
    }
}
