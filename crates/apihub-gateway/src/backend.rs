//! Port to the remote hub.

use async_trait::async_trait;
use serde_json::{Map, Value};

use apihub_types::ExecutionTarget;

use crate::error::GatewayError;
use crate::models::{ExecuteResponse, LoadRequest, SearchMatches, SearchQuery};

/// One remote call per method. Implementations must allow concurrent
/// in-flight calls and must not retry.
#[async_trait]
pub trait HubBackend: Send + Sync {
    /// Capability search.
    async fn search(&self, query: &SearchQuery) -> Result<SearchMatches, GatewayError>;

    /// Loads execution info for the selection.
    async fn load(&self, request: &LoadRequest) -> Result<Value, GatewayError>;

    /// Runs an operation or workflow.
    async fn execute(
        &self,
        target: &ExecutionTarget,
        inputs: &Map<String, Value>,
    ) -> Result<ExecuteResponse, GatewayError>;

    /// Posts feedback exactly as given.
    async fn submit_feedback(&self, feedback: &Map<String, Value>) -> Result<(), GatewayError>;
}
