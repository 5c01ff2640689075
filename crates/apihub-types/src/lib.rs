//! # apihub-types
//!
//! Domain types for the API hub MCP adapter.
//! Pure value types shared by the gateway, the dispatcher and the
//! transports; no I/O lives here.

pub mod error;
pub mod execution;
pub mod result;
pub mod schema;
pub mod tool;

// Re-exports for convenience.
pub use error::{DiagnosticError, ErrorKind, HubError};
pub use execution::{ExecutionKind, ExecutionTarget};
pub use result::{RecoveryAction, ToolCallResult};
pub use schema::{SchemaNode, SchemaType};
pub use tool::{ToolDefinition, ToolName};
