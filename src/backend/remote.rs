//! Backend client for the hosted chat API.

use std::time::Duration;

use reqwest::{Client as ReqwestClient, header};

use crate::backend::{Backend, drain_fragments};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::observability::{CLIENT_REQUEST_ERRORS, CLIENT_REQUESTS};
use crate::render::Renderer;
use crate::sse::process_sse;
use crate::types::ChatRequest;

/// Bound on one remote exchange, connection through last chunk.
const REMOTE_TIMEOUT: Duration = Duration::from_secs(60);

/// Client for the hosted chat-completions API.
#[derive(Debug, Clone)]
pub struct RemoteBackend {
    client: ReqwestClient,
    endpoint: String,
    model: String,
    api_key: String,
    temperature: f32,
}

impl RemoteBackend {
    /// Creates a remote backend from the process configuration.
    ///
    /// Fails when no credential is configured; the dispatcher only routes
    /// here when one is.
    pub fn new(config: &Config) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| Error::authentication("no API key configured"))?;
        let client = ReqwestClient::builder()
            .timeout(REMOTE_TIMEOUT)
            .build()
            .map_err(|e| {
                Error::http_client(format!("failed to build HTTP client: {e}"), Some(Box::new(e)))
            })?;

        Ok(Self {
            client,
            endpoint: config.remote_url.clone(),
            model: config.remote_model.clone(),
            api_key,
            temperature: config.temperature,
        })
    }
}

#[async_trait::async_trait]
impl Backend for RemoteBackend {
    fn name(&self) -> &'static str {
        "remote"
    }

    async fn send(&self, prompt: &str, renderer: &mut dyn Renderer) -> Result<String> {
        CLIENT_REQUESTS.click();
        let request = ChatRequest::streaming(&self.model, prompt).with_temperature(self.temperature);

        let response = self
            .client
            .post(&self.endpoint)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header(header::ACCEPT, "text/event-stream")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                CLIENT_REQUEST_ERRORS.click();
                if e.is_timeout() {
                    Error::timeout(
                        format!("request timed out: {e}"),
                        Some(REMOTE_TIMEOUT.as_secs_f64()),
                    )
                } else if e.is_connect() {
                    Error::connection(format!("connection error: {e}"), Some(Box::new(e)))
                } else {
                    Error::http_client(format!("request failed: {e}"), Some(Box::new(e)))
                }
            })?;

        if !response.status().is_success() {
            CLIENT_REQUEST_ERRORS.click();
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::api(status, body));
        }

        drain_fragments(process_sse(response.bytes_stream()), renderer).await
    }
}
