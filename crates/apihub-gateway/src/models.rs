//! Request and response records exchanged with the remote hub.
//!
//! Remote search hits arrive loosely shaped and are normalized into
//! [`WorkflowMatch`] / [`OperationMatch`]. Loaded configs and execution
//! outputs stay opaque JSON because their shape belongs to the hub.

use apihub_types::ExecutionTarget;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Default number of matches requested per search.
pub const DEFAULT_SEARCH_LIMIT: u32 = 5;

/// Capability search parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Natural-language description of the capability.
    pub query: String,
    /// Extra keywords narrowing the search.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    /// Maximum matches per kind.
    pub limit: u32,
    /// Restrict matches to these API names.
    #[serde(default, rename = "apis", skip_serializing_if = "Option::is_none")]
    pub api_filter: Option<Vec<String>>,
}

impl SearchQuery {
    /// A query with default limit and no filters.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            keywords: Vec::new(),
            limit: DEFAULT_SEARCH_LIMIT,
            api_filter: None,
        }
    }
}

/// A search hit as returned by the hub.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawSearchHit {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub api_name: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub distance: Option<f64>,
}

/// Search response body as returned by the hub.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawSearchResponse {
    #[serde(default)]
    pub workflows: Vec<RawSearchHit>,
    #[serde(default)]
    pub operations: Vec<RawSearchHit>,
}

/// A matching workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowMatch {
    pub workflow_id: String,
    pub summary: String,
    pub description: String,
    pub api_name: String,
    pub match_score: f64,
}

impl From<RawSearchHit> for WorkflowMatch {
    fn from(hit: RawSearchHit) -> Self {
        // Workflows carry a name rather than a summary.
        let summary = hit.name.or(hit.summary).unwrap_or_else(|| hit.id.clone());
        Self {
            workflow_id: hit.id,
            summary,
            description: hit.description.unwrap_or_default(),
            api_name: hit.api_name.unwrap_or_default(),
            match_score: hit.distance.unwrap_or(0.0),
        }
    }
}

/// A matching operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationMatch {
    pub operation_uuid: String,
    pub summary: String,
    pub description: String,
    pub path: String,
    pub method: String,
    pub api_name: String,
    pub match_score: f64,
}

impl From<RawSearchHit> for OperationMatch {
    fn from(hit: RawSearchHit) -> Self {
        Self {
            operation_uuid: hit.id,
            summary: hit.summary.unwrap_or_default(),
            description: hit.description.unwrap_or_default(),
            path: hit.path.unwrap_or_default(),
            method: hit.method.unwrap_or_default(),
            api_name: hit.api_name.unwrap_or_default(),
            match_score: hit.distance.unwrap_or(0.0),
        }
    }
}

/// Normalized matches grouped by kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchMatches {
    pub workflows: Vec<WorkflowMatch>,
    pub operations: Vec<OperationMatch>,
}

impl SearchMatches {
    /// Number of matches across both kinds.
    pub fn len(&self) -> usize {
        self.workflows.len() + self.operations.len()
    }

    /// True when nothing matched.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<RawSearchResponse> for SearchMatches {
    fn from(raw: RawSearchResponse) -> Self {
        Self {
            workflows: raw.workflows.into_iter().map(WorkflowMatch::from).collect(),
            operations: raw.operations.into_iter().map(OperationMatch::from).collect(),
        }
    }
}

/// Payload of a successful `search_apis` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchOutcome {
    pub matches: SearchMatches,
    pub query: String,
    pub total_matches: usize,
}

/// Selection for `load_execution_info`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadRequest {
    #[serde(default)]
    pub workflow_uuids: Vec<String>,
    #[serde(default)]
    pub operation_uuids: Vec<String>,
}

impl LoadRequest {
    /// True when nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.workflow_uuids.is_empty() && self.operation_uuids.is_empty()
    }
}

/// Body of a remote execution call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecuteRequest {
    pub execution_type: String,
    pub uuid: String,
    #[serde(default)]
    pub inputs: Map<String, Value>,
}

impl ExecuteRequest {
    /// Builds the wire body for `target`.
    pub fn new(target: &ExecutionTarget, inputs: Map<String, Value>) -> Self {
        Self {
            execution_type: target.kind().as_str().to_string(),
            uuid: target.id().to_string(),
            inputs,
        }
    }
}

/// Remote execution result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecuteResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_results: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inputs: Option<Value>,
}

/// Result of a feedback submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackOutcome {
    pub success: bool,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn workflow_hit_uses_name_as_summary() {
        let hit: RawSearchHit = serde_json::from_value(json!({
            "id": "wf_1", "name": "Post to channel", "description": "d",
            "api_name": "discord.com", "distance": 0.25
        }))
        .expect("de");
        let m = WorkflowMatch::from(hit);
        assert_eq!(m.workflow_id, "wf_1");
        assert_eq!(m.summary, "Post to channel");
        assert_eq!(m.match_score, 0.25);
    }

    #[test]
    fn workflow_hit_without_name_falls_back_to_id() {
        let m = WorkflowMatch::from(RawSearchHit {
            id: "wf_2".into(),
            ..RawSearchHit::default()
        });
        assert_eq!(m.summary, "wf_2");
        assert_eq!(m.description, "");
    }

    #[test]
    fn operation_hit_keeps_path_and_method() {
        let hit: RawSearchHit = serde_json::from_value(json!({
            "id": "op_1", "summary": "Search tracks", "path": "/v1/search", "method": "GET"
        }))
        .expect("de");
        let m = OperationMatch::from(hit);
        assert_eq!(m.operation_uuid, "op_1");
        assert_eq!(m.path, "/v1/search");
        assert_eq!(m.method, "GET");
        assert_eq!(m.match_score, 0.0);
    }

    #[test]
    fn missing_lists_default_to_empty() {
        let raw: RawSearchResponse = serde_json::from_value(json!({})).expect("de");
        let matches = SearchMatches::from(raw);
        assert!(matches.is_empty());
    }

    #[test]
    fn search_query_wire_shape() {
        let mut q = SearchQuery::new("send email");
        q.api_filter = Some(vec!["gmail.com".into()]);
        let v = serde_json::to_value(&q).expect("ser");
        assert_eq!(v, json!({"query": "send email", "limit": 5, "apis": ["gmail.com"]}));
    }

    #[test]
    fn execute_request_from_target() {
        let target = ExecutionTarget::Workflow("wf_9".into());
        let req = ExecuteRequest::new(&target, Map::new());
        assert_eq!(req.execution_type, "workflow");
        assert_eq!(req.uuid, "wf_9");
    }
}
