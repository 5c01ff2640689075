//! # apihub-gateway
//!
//! Backend gateway to the remote API hub. Exposes the `HubBackend` port,
//! its reqwest adapter, a catalogue-backed mock and the `Gateway` that the
//! tool dispatcher calls.

pub mod backend;
pub mod error;
pub mod gateway;
pub mod http;
pub mod mock;
pub mod models;

pub use backend::HubBackend;
pub use error::GatewayError;
pub use gateway::{Gateway, MISSING_FEEDBACK_MESSAGE};
pub use http::HttpBackend;
pub use mock::MockBackend;
pub use models::{
    ExecuteRequest, ExecuteResponse, FeedbackOutcome, LoadRequest, OperationMatch,
    RawSearchHit, RawSearchResponse, SearchMatches, SearchOutcome, SearchQuery, WorkflowMatch,
    DEFAULT_SEARCH_LIMIT,
};
