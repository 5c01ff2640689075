//! Execution identity: which remote action to run.
//!
//! Two wire encodings exist. The legacy pair `execution_type` + `uuid`, and
//! a single `id` whose prefix implies the kind (`op_…` / `wf_…`). Both are
//! decoded here into one `ExecutionTarget`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::HubError;

/// Prefix marking an operation id.
pub const OPERATION_PREFIX: &str = "op_";
/// Prefix marking a workflow id.
pub const WORKFLOW_PREFIX: &str = "wf_";

/// Kind of remote action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionKind {
    /// A single API operation.
    Operation,
    /// A multi-step workflow.
    Workflow,
}

impl ExecutionKind {
    /// Returns the wire name (`operation` / `workflow`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Operation => "operation",
            Self::Workflow => "workflow",
        }
    }
}

impl fmt::Display for ExecutionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExecutionKind {
    type Err = HubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "operation" => Ok(Self::Operation),
            "workflow" => Ok(Self::Workflow),
            other => Err(HubError::invalid_input(format!(
                "Invalid execution_type '{other}'. Must be 'operation' or 'workflow'."
            ))),
        }
    }
}

/// Normalized execution identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "execution_type", content = "uuid", rename_all = "lowercase")]
pub enum ExecutionTarget {
    /// Run the operation with this id.
    Operation(String),
    /// Run the workflow with this id.
    Workflow(String),
}

impl ExecutionTarget {
    /// Builds a target of the given kind.
    pub fn new(kind: ExecutionKind, id: impl Into<String>) -> Self {
        match kind {
            ExecutionKind::Operation => Self::Operation(id.into()),
            ExecutionKind::Workflow => Self::Workflow(id.into()),
        }
    }

    /// Returns the kind of the target.
    pub fn kind(&self) -> ExecutionKind {
        match self {
            Self::Operation(_) => ExecutionKind::Operation,
            Self::Workflow(_) => ExecutionKind::Workflow,
        }
    }

    /// Returns the identifier as supplied by the caller.
    pub fn id(&self) -> &str {
        match self {
            Self::Operation(id) | Self::Workflow(id) => id,
        }
    }

    /// Decodes a prefixed id (`op_…` / `wf_…`).
    pub fn from_prefixed(id: &str) -> Result<Self, HubError> {
        let id = id.trim();
        if id.len() > OPERATION_PREFIX.len() && id.starts_with(OPERATION_PREFIX) {
            Ok(Self::Operation(id.to_string()))
        } else if id.len() > WORKFLOW_PREFIX.len() && id.starts_with(WORKFLOW_PREFIX) {
            Ok(Self::Workflow(id.to_string()))
        } else {
            Err(HubError::invalid_input(format!(
                "Invalid id '{id}'. Expected a prefix of '{OPERATION_PREFIX}' or '{WORKFLOW_PREFIX}'."
            )))
        }
    }

    /// Decodes the legacy typed pair.
    pub fn from_typed(execution_type: &str, uuid: &str) -> Result<Self, HubError> {
        let kind: ExecutionKind = execution_type.parse()?;
        let uuid = uuid.trim();
        if uuid.is_empty() {
            return Err(HubError::invalid_input("Missing 'uuid' parameter."));
        }
        Ok(Self::new(kind, uuid))
    }

    /// Single decode step accepting either wire form.
    ///
    /// `id` wins when present; a supplied `execution_type` must then agree
    /// with the prefix. Both forms absent is rejected.
    pub fn decode(
        id: Option<&str>,
        execution_type: Option<&str>,
        uuid: Option<&str>,
    ) -> Result<Self, HubError> {
        let id = id.map(str::trim).filter(|s| !s.is_empty());
        let uuid = uuid.map(str::trim).filter(|s| !s.is_empty());
        let execution_type = execution_type.map(str::trim).filter(|s| !s.is_empty());

        if let Some(id) = id {
            let target = Self::from_prefixed(id)?;
            if let Some(declared) = execution_type {
                let declared: ExecutionKind = declared.parse()?;
                if declared != target.kind() {
                    return Err(HubError::invalid_input(format!(
                        "execution_type '{declared}' conflicts with id '{id}'."
                    )));
                }
            }
            return Ok(target);
        }

        match (execution_type, uuid) {
            (Some(kind), Some(uuid)) => Self::from_typed(kind, uuid),
            (None, Some(uuid)) => Self::from_prefixed(uuid).map_err(|_| {
                HubError::invalid_input("Missing 'execution_type' parameter for legacy 'uuid'.")
            }),
            (Some(_), None) => Err(HubError::invalid_input("Missing 'uuid' parameter.")),
            (None, None) => Err(HubError::invalid_input(
                "Missing execution identity. Provide 'id' or 'execution_type' with 'uuid'.",
            )),
        }
    }
}

impl fmt::Display for ExecutionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind(), self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixed_operation() {
        let t = ExecutionTarget::from_prefixed("op_123").expect("decode");
        assert_eq!(t, ExecutionTarget::Operation("op_123".into()));
        assert_eq!(t.kind(), ExecutionKind::Operation);
    }

    #[test]
    fn prefixed_workflow() {
        let t = ExecutionTarget::from_prefixed("wf_abc").expect("decode");
        assert_eq!(t.kind(), ExecutionKind::Workflow);
        assert_eq!(t.id(), "wf_abc");
    }

    #[test]
    fn bare_prefix_rejected() {
        assert!(ExecutionTarget::from_prefixed("op_").is_err());
        assert!(ExecutionTarget::from_prefixed("xyz").is_err());
    }

    #[test]
    fn legacy_pair_decodes() {
        let t = ExecutionTarget::decode(None, Some("workflow"), Some("1234")).expect("decode");
        assert_eq!(t, ExecutionTarget::Workflow("1234".into()));
    }

    #[test]
    fn id_wins_over_legacy_uuid() {
        let t = ExecutionTarget::decode(Some("op_9"), None, Some("ignored")).expect("decode");
        assert_eq!(t, ExecutionTarget::Operation("op_9".into()));
    }

    #[test]
    fn conflicting_type_rejected() {
        let err = ExecutionTarget::decode(Some("op_9"), Some("workflow"), None).unwrap_err();
        assert!(err.message.contains("conflicts"));
    }

    #[test]
    fn agreeing_type_accepted() {
        assert!(ExecutionTarget::decode(Some("wf_9"), Some("workflow"), None).is_ok());
    }

    #[test]
    fn both_absent_rejected() {
        let err = ExecutionTarget::decode(None, None, None).unwrap_err();
        assert!(err.message.contains("Missing execution identity"));
    }

    #[test]
    fn blank_values_count_as_absent() {
        assert!(ExecutionTarget::decode(Some("  "), Some(""), Some("")).is_err());
    }

    #[test]
    fn uuid_without_type_uses_prefix() {
        let t = ExecutionTarget::decode(None, None, Some("wf_7")).expect("decode");
        assert_eq!(t.kind(), ExecutionKind::Workflow);
        assert!(ExecutionTarget::decode(None, None, Some("1234")).is_err());
    }

    #[test]
    fn invalid_kind_rejected() {
        let err = ExecutionTarget::decode(None, Some("job"), Some("1")).unwrap_err();
        assert!(err.message.contains("job"));
    }

    #[test]
    fn serializes_as_typed_pair() {
        let v = serde_json::to_value(ExecutionTarget::Operation("u1".into())).expect("ser");
        assert_eq!(v, serde_json::json!({"execution_type": "operation", "uuid": "u1"}));
    }
}
