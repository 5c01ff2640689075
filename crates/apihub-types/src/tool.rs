//! Tool identity and definition types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::HubError;
use crate::schema::SchemaNode;

/// The fixed set of tools exposed to MCP clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolName {
    /// Capability search.
    SearchApis,
    /// Schema/config lookup for selected candidates.
    LoadExecutionInfo,
    /// Run an operation or workflow.
    Execute,
    /// Report a failure back to the hub.
    SubmitFeedback,
}

impl ToolName {
    /// All tools in registry order.
    pub const ALL: [ToolName; 4] = [
        ToolName::SearchApis,
        ToolName::LoadExecutionInfo,
        ToolName::Execute,
        ToolName::SubmitFeedback,
    ];

    /// Returns the wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SearchApis => "search_apis",
            Self::LoadExecutionInfo => "load_execution_info",
            Self::Execute => "execute",
            Self::SubmitFeedback => "submit_feedback",
        }
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolName {
    type Err = HubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| HubError::not_found(format!("Tool not found: {s}")))
    }
}

/// Immutable description of an invocable tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Tool identity.
    pub name: ToolName,
    /// Description surfaced to agents.
    pub description: String,
    /// Declarative parameter contract (an object node).
    pub parameter_schema: SchemaNode,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_roundtrip_through_from_str() {
        for tool in ToolName::ALL {
            let parsed: ToolName = tool.as_str().parse().expect("parse");
            assert_eq!(parsed, tool);
        }
    }

    #[test]
    fn unknown_name_rejected() {
        let err = "delete_everything".parse::<ToolName>().unwrap_err();
        assert!(err.message.contains("delete_everything"));
    }

    #[test]
    fn names_are_case_sensitive() {
        assert!("Execute".parse::<ToolName>().is_err());
    }

    #[test]
    fn serde_uses_wire_names() {
        let json = serde_json::to_string(&ToolName::LoadExecutionInfo).expect("ser");
        assert_eq!(json, "\"load_execution_info\"");
    }
}
