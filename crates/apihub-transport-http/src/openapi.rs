//! OpenAPI 3.0 description of the HTTP surface.
//!
//! The tool argument schemas are taken from the registry, so the document
//! always matches what `tools/list` reports.

use serde_json::{json, Map, Value};

use apihub_mcp::{input_schema, ToolRegistry};

/// OpenAPI version emitted.
pub const OPENAPI_VERSION: &str = "3.0.3";

/// Builds the document for `registry`.
pub fn openapi_document(registry: &ToolRegistry) -> Value {
    let mut schemas = Map::new();
    for tool in registry.list_tools() {
        let mut schema = input_schema(tool);
        if let Some(obj) = schema.as_object_mut() {
            obj.insert("description".into(), json!(tool.description));
        }
        schemas.insert(format!("{}_arguments", tool.name), schema);
    }
    let tool_names: Vec<&str> = registry.list_tools().iter().map(|t| t.name.as_str()).collect();

    json!({
        "openapi": OPENAPI_VERSION,
        "info": {
            "title": "apihub MCP adapter",
            "version": env!("CARGO_PKG_VERSION"),
            "description": "JSON-RPC 2.0 endpoint exposing the API hub as MCP tools.",
        },
        "paths": {
            "/mcp": {
                "post": {
                    "summary": "Send one JSON-RPC 2.0 message",
                    "requestBody": {
                        "required": true,
                        "content": {"application/json": {"schema": {"$ref": "#/components/schemas/JsonRpcRequest"}}},
                    },
                    "responses": {
                        "200": {
                            "description": "JSON-RPC response (result or error)",
                            "content": {"application/json": {"schema": {"$ref": "#/components/schemas/JsonRpcResponse"}}},
                        },
                        "204": {"description": "Notification accepted, no response body"},
                        "401": {"description": "Missing or invalid bearer token"},
                    },
                    "security": [{"bearerAuth": []}, {}],
                }
            },
            "/health": {
                "get": {"summary": "Liveness probe", "responses": {"200": {"description": "Service is up"}}}
            },
            "/health/ready": {
                "get": {"summary": "Readiness probe", "responses": {"200": {"description": "Accepting requests"}}}
            },
            "/openapi.json": {
                "get": {"summary": "This document", "responses": {"200": {"description": "OpenAPI document"}}}
            },
        },
        "components": {
            "securitySchemes": {"bearerAuth": {"type": "http", "scheme": "bearer"}},
            "schemas": schemas_with_envelope(schemas, &tool_names),
        },
    })
}

fn schemas_with_envelope(mut schemas: Map<String, Value>, tool_names: &[&str]) -> Value {
    schemas.insert(
        "JsonRpcRequest".into(),
        json!({
            "type": "object",
            "required": ["jsonrpc", "method"],
            "properties": {
                "jsonrpc": {"type": "string", "enum": ["2.0"]},
                "id": {"oneOf": [{"type": "string"}, {"type": "integer"}], "nullable": true},
                "method": {"type": "string", "enum": ["initialize", "notifications/initialized", "tools/list", "tools/call", "ping"]},
                "params": {"type": "object"},
            },
        }),
    );
    schemas.insert(
        "JsonRpcResponse".into(),
        json!({
            "type": "object",
            "required": ["jsonrpc", "id"],
            "properties": {
                "jsonrpc": {"type": "string"},
                "id": {"oneOf": [{"type": "string"}, {"type": "integer"}], "nullable": true},
                "result": {"type": "object"},
                "error": {
                    "type": "object",
                    "properties": {"code": {"type": "integer"}, "message": {"type": "string"}},
                },
            },
        }),
    );
    schemas.insert(
        "ToolCallParams".into(),
        json!({
            "type": "object",
            "required": ["name"],
            "properties": {
                "name": {"type": "string", "enum": tool_names},
                "arguments": {"type": "object"},
            },
        }),
    );
    Value::Object(schemas)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_tool_schema() {
        let doc = openapi_document(ToolRegistry::global());
        assert_eq!(doc["openapi"], OPENAPI_VERSION);
        let schemas = doc["components"]["schemas"].as_object().expect("schemas");
        for tool in ToolRegistry::global().list_tools() {
            let key = format!("{}_arguments", tool.name);
            assert_eq!(schemas[&key]["type"], "object", "{key}");
        }
        assert_eq!(
            doc["components"]["schemas"]["ToolCallParams"]["properties"]["name"]["enum"]
                .as_array()
                .expect("enum")
                .len(),
            4
        );
        assert!(doc["paths"]["/mcp"]["post"].is_object());
    }
}
