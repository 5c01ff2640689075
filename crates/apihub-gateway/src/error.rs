//! Gateway-specific error types.

use apihub_types::DiagnosticError;
use thiserror::Error;

/// Errors from calls to the remote hub.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The request could not be sent or no response arrived.
    #[error("request failed: {0}")]
    Request(String),
    /// The hub answered with a non-success status.
    #[error("hub returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    /// The response body could not be decoded.
    #[error("invalid response from hub: {0}")]
    Decode(String),
    /// The hub does not know the selected ids.
    #[error("invalid selection: {0}")]
    InvalidSelection(String),
    /// Required configuration is missing.
    #[error("gateway misconfigured: {0}")]
    Config(String),
    /// Anything else.
    #[error("{0}")]
    Unexpected(String),
}

impl From<reqwest::Error> for GatewayError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::Decode(e.to_string())
        } else if e.is_builder() {
            Self::Unexpected(e.to_string())
        } else {
            Self::Request(e.to_string())
        }
    }
}

impl DiagnosticError for GatewayError {
    fn hint(&self) -> Option<String> {
        match self {
            Self::Request(_) => Some("The API hub could not be reached.".into()),
            Self::Status { status: 401 | 403, .. } => {
                Some("The hub rejected the agent API key.".into())
            }
            Self::InvalidSelection(_) => {
                Some("One of the selected ids is unknown to the hub.".into())
            }
            Self::Config(_) => Some("A backend setting is missing or malformed.".into()),
            _ => None,
        }
    }

    fn fix(&self) -> Option<String> {
        match self {
            Self::Request(_) => Some("Check backend.base_url and network connectivity.".into()),
            Self::Status { status: 401 | 403, .. } => {
                Some("Set APIHUB_BACKEND__AGENT_API_KEY to a valid key.".into())
            }
            Self::InvalidSelection(_) => {
                Some("Run search_apis again and use ids from its matches.".into())
            }
            Self::Config(_) => Some(
                "Fix the backend URLs in the config file or the APIHUB_BACKEND__* variables."
                    .into(),
            ),
            _ => None,
        }
    }
}
