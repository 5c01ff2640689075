//! `apihub tools` command: prints the tool catalogue.

use clap::Args;
use serde_json::Value;

use apihub_mcp::ToolRegistry;
use apihub_protocol::mcp::tools::ToolsListResult;
use apihub_transport_http::openapi_document;

use crate::output;

/// Print the tools/list payload (or the OpenAPI document).
#[derive(Debug, Default, Args)]
pub struct ToolsArgs {
    /// Print the OpenAPI document served at /openapi.json instead.
    #[arg(long)]
    pub openapi: bool,
}

/// Builds the document the command prints.
pub fn render(args: &ToolsArgs) -> anyhow::Result<Value> {
    let registry = ToolRegistry::global();
    if args.openapi {
        return Ok(openapi_document(registry));
    }
    Ok(serde_json::to_value(ToolsListResult {
        tools: registry.mcp_definitions(),
        next_cursor: None,
    })?)
}

/// Executes the tools command.
pub fn execute(args: &ToolsArgs) -> anyhow::Result<()> {
    output::print_json(&render(args)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_four_tools() {
        let v = render(&ToolsArgs::default()).expect("render");
        let names: Vec<&str> = v["tools"]
            .as_array()
            .expect("tools")
            .iter()
            .map(|t| t["name"].as_str().expect("name"))
            .collect();
        assert_eq!(
            names,
            ["search_apis", "load_execution_info", "execute", "submit_feedback"]
        );
    }

    #[test]
    fn openapi_flag_switches_document() {
        let v = render(&ToolsArgs { openapi: true }).expect("render");
        assert!(v.get("openapi").is_some());
    }
}
