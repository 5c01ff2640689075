//! HTTP adapter for [`HubBackend`].
//!
//! Endpoints, relative to the configured bases:
//! - `POST {base_url}/search`
//! - `POST {base_url}/load`
//! - `POST {execute_base}/execute`
//! - `POST {feedback_url}`
//!
//! Every request carries the agent API key (when configured) in the
//! configured header.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};
use url::Url;

use apihub_config::BackendConfig;
use apihub_types::ExecutionTarget;

use crate::backend::HubBackend;
use crate::error::GatewayError;
use crate::models::{
    ExecuteRequest, ExecuteResponse, LoadRequest, RawSearchResponse, SearchMatches, SearchQuery,
};

/// reqwest-backed hub client.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    search_url: Url,
    load_url: Url,
    execute_url: Url,
    feedback_url: Option<Url>,
    api_key_header: String,
    api_key: Option<String>,
}

impl HttpBackend {
    /// Builds the client from backend settings.
    pub fn new(config: &BackendConfig) -> Result<Self, GatewayError> {
        let mut builder = Client::builder()
            .user_agent(config.user_agent.clone())
            .connect_timeout(config.connect_timeout());
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| GatewayError::Unexpected(format!("http client: {e}")))?;

        Ok(Self {
            client,
            search_url: endpoint(&config.base_url, "search")?,
            load_url: endpoint(&config.base_url, "load")?,
            execute_url: endpoint(config.execute_base(), "execute")?,
            feedback_url: config.feedback_url.as_deref().map(parse_url).transpose()?,
            api_key_header: config.api_key_header.clone(),
            api_key: config.agent_api_key.clone(),
        })
    }

    async fn post<B: Serialize + ?Sized>(&self, url: &Url, body: &B) -> Result<Response, GatewayError> {
        let mut request = self.client.post(url.clone()).json(body);
        if let Some(key) = &self.api_key {
            request = request.header(self.api_key_header.as_str(), key.as_str());
        }
        debug!(%url, "hub request");
        Ok(request.send().await?)
    }
}

fn parse_url(value: &str) -> Result<Url, GatewayError> {
    Url::parse(value).map_err(|e| GatewayError::Config(format!("invalid hub URL '{value}': {e}")))
}

/// Appends `segment` below `base`, keeping every path segment of `base`.
fn endpoint(base: &str, segment: &str) -> Result<Url, GatewayError> {
    let mut url = parse_url(base)?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url.join(segment)
        .map_err(|e| GatewayError::Config(format!("invalid hub URL '{base}': {e}")))
}

/// Passes 2xx responses through and turns the rest into `Status`.
async fn ensure_success(response: Response) -> Result<Response, GatewayError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    warn!(status = status.as_u16(), "hub returned error status");
    Err(GatewayError::Status {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl HubBackend for HttpBackend {
    async fn search(&self, query: &SearchQuery) -> Result<SearchMatches, GatewayError> {
        let response = ensure_success(self.post(&self.search_url, query).await?).await?;
        let raw: RawSearchResponse = response.json().await?;
        Ok(raw.into())
    }

    async fn load(&self, request: &LoadRequest) -> Result<Value, GatewayError> {
        let response = self.post(&self.load_url, request).await?;
        match ensure_success(response).await {
            Ok(response) => Ok(response.json().await?),
            Err(GatewayError::Status {
                status: 400 | 404,
                body,
            }) => Err(GatewayError::InvalidSelection(body)),
            Err(e) => Err(e),
        }
    }

    async fn execute(
        &self,
        target: &ExecutionTarget,
        inputs: &Map<String, Value>,
    ) -> Result<ExecuteResponse, GatewayError> {
        let body = ExecuteRequest::new(target, inputs.clone());
        let response = ensure_success(self.post(&self.execute_url, &body).await?).await?;
        Ok(response.json().await?)
    }

    async fn submit_feedback(&self, feedback: &Map<String, Value>) -> Result<(), GatewayError> {
        let url = self
            .feedback_url
            .as_ref()
            .ok_or_else(|| GatewayError::Config("feedback_url is not set".into()))?;
        ensure_success(self.post(url, feedback).await?).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_keeps_base_path() {
        let url = endpoint("https://hub/api/v1/", "search").expect("url");
        assert_eq!(url.as_str(), "https://hub/api/v1/search");
        let url = endpoint("https://hub/api/v1", "load").expect("url");
        assert_eq!(url.as_str(), "https://hub/api/v1/load");
        let url = endpoint("https://hub", "load").expect("url");
        assert_eq!(url.as_str(), "https://hub/load");
    }

    #[test]
    fn malformed_base_url_is_a_config_error() {
        let config = BackendConfig {
            base_url: "http://exa mple.com".into(),
            ..BackendConfig::default()
        };
        let err = HttpBackend::new(&config).expect_err("invalid");
        assert!(matches!(err, GatewayError::Config(_)));
    }

    #[test]
    fn execute_url_uses_override() {
        let config = BackendConfig {
            base_url: "https://dir.example.com/api/v1".into(),
            execute_url: Some("https://run.example.com/api/v1/".into()),
            ..BackendConfig::default()
        };
        let backend = HttpBackend::new(&config).expect("build");
        assert_eq!(backend.search_url.as_str(), "https://dir.example.com/api/v1/search");
        assert_eq!(backend.execute_url.as_str(), "https://run.example.com/api/v1/execute");
    }
}
