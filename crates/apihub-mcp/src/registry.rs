//! Static catalogue of the four tools.
//!
//! Built once on first use and shared read-only afterwards.

use std::sync::OnceLock;

use serde_json::{json, Value};

use apihub_protocol::mcp::tools::McpToolDefinition;
use apihub_types::{SchemaNode, ToolDefinition, ToolName};

/// Ordered, immutable tool catalogue.
#[derive(Debug)]
pub struct ToolRegistry {
    tools: Vec<ToolDefinition>,
}

impl ToolRegistry {
    /// The process-wide registry.
    pub fn global() -> &'static ToolRegistry {
        static REGISTRY: OnceLock<ToolRegistry> = OnceLock::new();
        REGISTRY.get_or_init(Self::build)
    }

    fn build() -> Self {
        let tools = ToolName::ALL
            .into_iter()
            .map(|name| ToolDefinition {
                name,
                description: description(name).to_string(),
                parameter_schema: parameter_schema(name),
            })
            .collect();
        Self { tools }
    }

    /// All tools in registry order.
    pub fn list_tools(&self) -> &[ToolDefinition] {
        &self.tools
    }

    /// Looks up one tool.
    pub fn get(&self, name: ToolName) -> Option<&ToolDefinition> {
        self.tools.iter().find(|t| t.name == name)
    }

    /// Number of tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// True when no tools are registered.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// The catalogue as MCP tool definitions, in registry order.
    pub fn mcp_definitions(&self) -> Vec<McpToolDefinition> {
        self.tools
            .iter()
            .map(|t| McpToolDefinition {
                name: t.name.to_string(),
                description: Some(t.description.clone()),
                input_schema: input_schema(t),
            })
            .collect()
    }
}

/// Renders a tool's parameter schema as an MCP `inputSchema`.
///
/// The result always carries `type`, `properties` and `required`.
pub fn input_schema(tool: &ToolDefinition) -> Value {
    let mut schema = serde_json::to_value(&tool.parameter_schema).unwrap_or_else(|_| json!({}));
    if let Some(obj) = schema.as_object_mut() {
        obj.insert("type".into(), json!("object"));
        obj.entry("properties").or_insert_with(|| json!({}));
        obj.entry("required").or_insert_with(|| json!([]));
    }
    schema
}

fn description(name: ToolName) -> &'static str {
    match name {
        ToolName::SearchApis => {
            "Search for available actions or information based on what the user wants to do \
             (e.g. 'find Discord servers', 'send a message'). Use this first to understand \
             what is possible. Returns matching workflows and operations with their ids."
        }
        ToolName::LoadExecutionInfo => {
            "Get more details about specific actions (such as which inputs they need) before \
             running them. Pass the workflow and operation ids returned by search_apis."
        }
        ToolName::Execute => {
            "Perform the chosen action using the provided inputs. Identify the action either \
             by 'id' (prefixed 'op_' or 'wf_') or by 'execution_type' together with 'uuid'."
        }
        ToolName::SubmitFeedback => {
            "Report a failed or unexpected result of an action back to the API hub so it can \
             be fixed. Remove credentials and personal data from feedback_data first."
        }
    }
}

fn string_list(description: &str) -> SchemaNode {
    SchemaNode::array(SchemaNode::string()).describe(description)
}

fn parameter_schema(name: ToolName) -> SchemaNode {
    match name {
        ToolName::SearchApis => SchemaNode::object()
            .required_property(
                "capability_description",
                SchemaNode::string().describe(
                    "Natural language description of the action needed \
                     (e.g. 'send emails', 'weather forecasting')",
                ),
            )
            .property(
                "keywords",
                string_list("Optional list of specific keywords to help narrow down the search"),
            )
            .property(
                "max_results",
                SchemaNode::integer()
                    .describe("Maximum number of actions to return")
                    .with_default(json!(5)),
            )
            .property("apis", string_list("Only return actions from these API names")),
        ToolName::LoadExecutionInfo => SchemaNode::object()
            .property(
                "workflow_uuids",
                string_list("The ids of the workflows to load."),
            )
            .property(
                "operation_uuids",
                string_list("The ids of the operations to load."),
            )
            .property(
                "ids",
                string_list("Prefixed ids ('op_' or 'wf_') to load; merged with the lists above."),
            ),
        ToolName::Execute => SchemaNode::object()
            .property(
                "execution_type",
                SchemaNode::string()
                    .one_of(&["operation", "workflow"])
                    .describe("Whether 'uuid' names an operation or a workflow."),
            )
            .property(
                "uuid",
                SchemaNode::string().describe("The id of the operation or workflow to execute."),
            )
            .property(
                "id",
                SchemaNode::string()
                    .describe("Prefixed id of the operation ('op_') or workflow ('wf_')."),
            )
            .required_property(
                "inputs",
                SchemaNode::object()
                    .open()
                    .describe("The input parameters required by the operation or workflow.")
                    .with_default(json!({})),
            ),
        ToolName::SubmitFeedback => SchemaNode::object().required_property(
            "feedback_data",
            SchemaNode::object().open().describe(
                "Structured details of the failure, e.g. the id that was run, the inputs \
                 used and the error returned.",
            ),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_lists_four_tools_in_order() {
        let names: Vec<&str> = ToolRegistry::global()
            .list_tools()
            .iter()
            .map(|t| t.name.as_str())
            .collect();
        assert_eq!(
            names,
            ["search_apis", "load_execution_info", "execute", "submit_feedback"]
        );
    }

    #[test]
    fn every_tool_has_a_description() {
        for tool in ToolRegistry::global().list_tools() {
            assert!(!tool.description.trim().is_empty(), "{}", tool.name);
        }
    }

    #[test]
    fn input_schema_always_has_required() {
        let registry = ToolRegistry::global();
        let load = registry.get(ToolName::LoadExecutionInfo).expect("load");
        let schema = input_schema(load);
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["required"], json!([]));
        assert!(schema["properties"]["ids"].is_object());
    }

    #[test]
    fn search_requires_capability_description() {
        let search = ToolRegistry::global()
            .get(ToolName::SearchApis)
            .expect("search");
        let schema = input_schema(search);
        assert_eq!(schema["required"], json!(["capability_description"]));
        assert_eq!(schema["properties"]["max_results"]["default"], 5);
    }

    #[test]
    fn execute_schema_lists_both_identity_forms() {
        let exec = ToolRegistry::global().get(ToolName::Execute).expect("exec");
        let schema = input_schema(exec);
        assert_eq!(
            schema["properties"]["execution_type"]["enum"],
            json!(["operation", "workflow"])
        );
        assert!(schema["properties"]["id"].is_object());
        assert_eq!(schema["properties"]["inputs"]["additionalProperties"], true);
    }

    #[test]
    fn global_is_shared() {
        assert!(std::ptr::eq(ToolRegistry::global(), ToolRegistry::global()));
    }
}
