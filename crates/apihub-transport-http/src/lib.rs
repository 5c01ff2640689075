//! HTTP/JSON-RPC transport adapter for the API hub MCP server.
//! Exposes MCP over `POST /mcp` with optional Bearer token authentication,
//! plus health probes and an OpenAPI document.

pub mod auth;
mod error;
pub mod openapi;
pub mod router;
pub mod server;

pub use error::HttpTransportError;
pub use openapi::openapi_document;
pub use router::{build_router, AppState};
pub use server::HttpServer;
