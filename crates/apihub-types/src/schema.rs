//! Declarative parameter schemas for tool definitions.
//!
//! A `SchemaNode` mirrors the subset of JSON Schema that MCP clients read
//! from `tools/list`. It documents the parameter contract; it is never used
//! to validate arguments at runtime.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JSON Schema primitive type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    String,
    Integer,
    Number,
    Boolean,
    Array,
    Object,
}

/// Recursive description of a JSON-compatible parameter shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaNode {
    /// JSON type of the value.
    #[serde(rename = "type")]
    pub kind: SchemaType,
    /// Human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Allowed literal values.
    #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<String>,
    /// Element schema for arrays.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaNode>>,
    /// Member schemas for objects.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, SchemaNode>,
    /// Required member names for objects.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    /// Default value applied by the server when the member is absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Whether an object accepts members beyond `properties`.
    #[serde(
        rename = "additionalProperties",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub additional_properties: Option<bool>,
}

impl SchemaNode {
    fn of(kind: SchemaType) -> Self {
        Self {
            kind,
            description: None,
            enum_values: Vec::new(),
            items: None,
            properties: BTreeMap::new(),
            required: Vec::new(),
            default: None,
            additional_properties: None,
        }
    }

    /// A string node.
    pub fn string() -> Self {
        Self::of(SchemaType::String)
    }

    /// An integer node.
    pub fn integer() -> Self {
        Self::of(SchemaType::Integer)
    }

    /// An empty object node.
    pub fn object() -> Self {
        Self::of(SchemaType::Object)
    }

    /// An array node with the given element schema.
    pub fn array(items: SchemaNode) -> Self {
        let mut node = Self::of(SchemaType::Array);
        node.items = Some(Box::new(items));
        node
    }

    /// Sets the description.
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Restricts the node to the given literal values.
    pub fn one_of(mut self, values: &[&str]) -> Self {
        self.enum_values = values.iter().map(|v| (*v).to_string()).collect();
        self
    }

    /// Sets the default value.
    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    /// Adds an optional member to an object node.
    pub fn property(mut self, name: impl Into<String>, node: SchemaNode) -> Self {
        self.properties.insert(name.into(), node);
        self
    }

    /// Adds a required member to an object node.
    pub fn required_property(mut self, name: impl Into<String>, node: SchemaNode) -> Self {
        let name = name.into();
        self.required.push(name.clone());
        self.properties.insert(name, node);
        self
    }

    /// Allows members beyond the declared properties.
    pub fn open(mut self) -> Self {
        self.additional_properties = Some(true);
        self
    }
}
