//! Axum router for the MCP HTTP/JSON-RPC transport.
//! Routes: `POST /mcp` (one JSON-RPC message per request), `GET /health`,
//! `GET /health/ready` and `GET /openapi.json`.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tracing::{error, warn};

use apihub_mcp::{JsonRpcOutput, McpHandler};

use crate::auth;
use crate::openapi::openapi_document;

/// Service name reported by the health endpoints.
const SERVICE: &str = "apihub";

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState {
    /// The MCP request handler.
    pub handler: Arc<McpHandler>,
    /// Bearer token required on `POST /mcp` (`None` = open).
    pub token: Option<String>,
}

/// Builds the axum `Router` with all routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/mcp", post(handle_mcp))
        .route("/health", get(handle_health))
        .route("/health/ready", get(handle_ready))
        .route("/openapi.json", get(handle_openapi))
        .with_state(state)
}

async fn handle_health() -> impl IntoResponse {
    Json(json!({"status": "ok", "service": SERVICE}))
}

async fn handle_ready(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "ready",
        "service": SERVICE,
        "tools": state.handler.registry().len(),
    }))
}

async fn handle_openapi(State(state): State<AppState>) -> impl IntoResponse {
    Json(openapi_document(state.handler.registry()))
}

async fn handle_mcp(State(state): State<AppState>, headers: HeaderMap, body: Bytes) -> Response {
    if let Some(token) = &state.token {
        if let Err(status) = auth::validate_bearer(&headers, token) {
            warn!("rejected /mcp request without a valid bearer token");
            return (status, Json(json!({"error": "unauthorized"}))).into_response();
        }
    }

    let text = match std::str::from_utf8(&body) {
        Ok(text) => text,
        Err(e) => {
            warn!(error = %e, "request body is not valid UTF-8");
            return json_rpc_response(&JsonRpcOutput::parse_error(format!("invalid UTF-8: {e}")));
        }
    };
    match state.handler.handle_text(text).await {
        None => StatusCode::NO_CONTENT.into_response(),
        Some(output) => json_rpc_response(&output),
    }
}

fn json_rpc_response(output: &JsonRpcOutput) -> Response {
    match output.to_json() {
        Ok(json_str) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            json_str,
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "failed to serialize response");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
