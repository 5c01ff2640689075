//! The gateway: one logical operation per tool, one remote call each.

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use apihub_config::BackendConfig;
use apihub_types::ExecutionTarget;

use crate::backend::HubBackend;
use crate::error::GatewayError;
use crate::http::HttpBackend;
use crate::mock::MockBackend;
use crate::models::{ExecuteResponse, FeedbackOutcome, LoadRequest, SearchOutcome, SearchQuery};

/// Message returned when feedback data is absent or empty.
pub const MISSING_FEEDBACK_MESSAGE: &str =
    "Missing or invalid 'feedback_data' parameter. It must be a non-empty object.";

/// Key under which the configured caller identity is attached to feedback.
pub const FEEDBACK_USER_KEY: &str = "user_id";

/// Adapts tool operations onto a [`HubBackend`].
///
/// Holds no mutable state; clones share the backend.
#[derive(Clone)]
pub struct Gateway {
    backend: Arc<dyn HubBackend>,
    user_id: Option<String>,
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway")
            .field("user_id", &self.user_id)
            .finish_non_exhaustive()
    }
}

impl Gateway {
    /// Wraps an existing backend.
    pub fn new(backend: Arc<dyn HubBackend>) -> Self {
        Self {
            backend,
            user_id: None,
        }
    }

    /// Sets the identity attached to feedback.
    pub fn with_user_id(mut self, user_id: Option<String>) -> Self {
        self.user_id = user_id;
        self
    }

    /// Builds the HTTP or mock backend selected by `config`.
    pub fn from_config(config: &BackendConfig) -> Result<Self, GatewayError> {
        let backend: Arc<dyn HubBackend> = if config.mock {
            info!("using built-in mock catalogue");
            Arc::new(MockBackend::new())
        } else {
            info!(base_url = %config.base_url, "using remote API hub");
            Arc::new(HttpBackend::new(config)?)
        };
        Ok(Self::new(backend).with_user_id(config.user_id.clone()))
    }

    /// Capability search. Remote failures propagate.
    pub async fn search(&self, query: SearchQuery) -> Result<SearchOutcome, GatewayError> {
        debug!(query = %query.query, limit = query.limit, "search");
        let matches = self.backend.search(&query).await?;
        let total_matches = matches.len();
        Ok(SearchOutcome {
            matches,
            query: query.query,
            total_matches,
        })
    }

    /// Loads execution info for the selection.
    pub async fn load(&self, request: &LoadRequest) -> Result<Value, GatewayError> {
        debug!(
            workflows = request.workflow_uuids.len(),
            operations = request.operation_uuids.len(),
            "load execution info"
        );
        self.backend.load(request).await
    }

    /// Runs the target once.
    pub async fn execute(
        &self,
        target: &ExecutionTarget,
        inputs: &Map<String, Value>,
    ) -> Result<ExecuteResponse, GatewayError> {
        info!(%target, "execute");
        let response = self.backend.execute(target, inputs).await;
        if let Err(e) = &response {
            warn!(%target, error = %e, "execution failed");
        }
        response
    }

    /// Submits feedback once and reports the outcome as a message.
    ///
    /// The configured identity is added under [`FEEDBACK_USER_KEY`] unless
    /// the caller already supplied that key.
    pub async fn submit_feedback(&self, mut feedback: Map<String, Value>) -> FeedbackOutcome {
        if feedback.is_empty() {
            return FeedbackOutcome {
                success: false,
                message: MISSING_FEEDBACK_MESSAGE.to_string(),
            };
        }
        if let Some(user_id) = &self.user_id {
            feedback
                .entry(FEEDBACK_USER_KEY)
                .or_insert_with(|| Value::String(user_id.clone()));
        }

        match self.backend.submit_feedback(&feedback).await {
            Ok(()) => {
                info!("feedback submitted");
                FeedbackOutcome {
                    success: true,
                    message: "Feedback submitted successfully.".to_string(),
                }
            }
            Err(e) => {
                warn!(error = %e, "feedback submission failed");
                FeedbackOutcome {
                    success: false,
                    message: feedback_failure_message(&e),
                }
            }
        }
    }
}

fn feedback_failure_message(e: &GatewayError) -> String {
    match e {
        GatewayError::Request(detail) => {
            format!("Failed to submit feedback due to network/request issue: {detail}")
        }
        GatewayError::Status { status, body } => {
            format!("Failed to submit feedback, server returned error: {status} - {body}")
        }
        other => format!("An unexpected error occurred while submitting feedback: {other}"),
    }
}
