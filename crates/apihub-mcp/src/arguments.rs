//! Typed argument records, decoded from the `arguments` map of `tools/call`.
//!
//! Decoding failures are validation errors: they surface as a payload-level
//! `{success:false, message}`, never as a JSON-RPC error, and they are
//! reported before any remote call is made.

use serde_json::{Map, Value};

use apihub_gateway::{LoadRequest, SearchQuery, DEFAULT_SEARCH_LIMIT, MISSING_FEEDBACK_MESSAGE};
use apihub_types::{ExecutionKind, ExecutionTarget};

/// Message for a non-object `inputs`.
pub const INVALID_INPUTS_MESSAGE: &str = "Invalid inputs type. Must be a dictionary.";

/// Arguments of `search_apis`.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchArgs(pub SearchQuery);

impl SearchArgs {
    pub fn decode(args: &Map<String, Value>) -> Result<Self, String> {
        let query = match args.get("capability_description") {
            Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
            _ => {
                return Err(
                    "Missing or invalid 'capability_description' parameter. It must be a non-empty string."
                        .to_string(),
                )
            }
        };
        let keywords = optional_string_list(args, "keywords")?.unwrap_or_default();
        let limit = match args.get("max_results") {
            None | Some(Value::Null) => DEFAULT_SEARCH_LIMIT,
            Some(v) => v
                .as_u64()
                .filter(|n| *n >= 1)
                .and_then(|n| u32::try_from(n).ok())
                .ok_or_else(|| {
                    "Invalid 'max_results' parameter. It must be a positive integer.".to_string()
                })?,
        };
        let api_filter = optional_string_list(args, "apis")?;
        Ok(Self(SearchQuery {
            query,
            keywords,
            limit,
            api_filter,
        }))
    }
}

/// Arguments of `load_execution_info`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadArgs(pub LoadRequest);

impl LoadArgs {
    /// Merges the legacy uuid lists with prefixed `ids`, keeping first
    /// occurrence order and dropping duplicates.
    pub fn decode(args: &Map<String, Value>) -> Result<Self, String> {
        let mut request = LoadRequest {
            workflow_uuids: optional_string_list(args, "workflow_uuids")?.unwrap_or_default(),
            operation_uuids: optional_string_list(args, "operation_uuids")?.unwrap_or_default(),
        };
        for id in optional_string_list(args, "ids")?.unwrap_or_default() {
            let target = ExecutionTarget::from_prefixed(&id).map_err(|e| e.message)?;
            let list = match target.kind() {
                ExecutionKind::Workflow => &mut request.workflow_uuids,
                ExecutionKind::Operation => &mut request.operation_uuids,
            };
            list.push(target.id().to_string());
        }
        dedup(&mut request.workflow_uuids);
        dedup(&mut request.operation_uuids);
        Ok(Self(request))
    }
}

fn dedup(list: &mut Vec<String>) {
    let mut seen = std::collections::HashSet::new();
    list.retain(|id| seen.insert(id.clone()));
}

/// Arguments of `execute`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecuteArgs {
    pub target: ExecutionTarget,
    pub inputs: Map<String, Value>,
}

impl ExecuteArgs {
    pub fn decode(args: &Map<String, Value>) -> Result<Self, String> {
        let id = optional_str(args, "id")?;
        let execution_type = optional_str(args, "execution_type")?;
        let uuid = optional_str(args, "uuid")?;
        let target = ExecutionTarget::decode(id, execution_type, uuid).map_err(|e| e.message)?;

        let inputs = match args.get("inputs") {
            None => Map::new(),
            Some(Value::Object(map)) => map.clone(),
            Some(_) => return Err(INVALID_INPUTS_MESSAGE.to_string()),
        };
        Ok(Self { target, inputs })
    }
}

/// Arguments of `submit_feedback`.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackArgs {
    pub feedback_data: Map<String, Value>,
}

impl FeedbackArgs {
    pub fn decode(args: &Map<String, Value>) -> Result<Self, String> {
        match args.get("feedback_data") {
            Some(Value::Object(map)) if !map.is_empty() => Ok(Self {
                feedback_data: map.clone(),
            }),
            _ => Err(MISSING_FEEDBACK_MESSAGE.to_string()),
        }
    }
}

fn optional_str<'a>(args: &'a Map<String, Value>, key: &str) -> Result<Option<&'a str>, String> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(format!("Invalid '{key}' parameter. It must be a string.")),
    }
}

fn optional_string_list(
    args: &Map<String, Value>,
    key: &str,
) -> Result<Option<Vec<String>>, String> {
    let invalid = || format!("Invalid '{key}' parameter. It must be a list of strings.");
    match args.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Array(items)) => items
            .iter()
            .map(|v| v.as_str().map(str::to_string).ok_or_else(invalid))
            .collect::<Result<Vec<_>, _>>()
            .map(Some),
        Some(_) => Err(invalid()),
    }
}
