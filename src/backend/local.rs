//! Backend client for the local model daemon.

use std::time::Duration;

use reqwest::Client as ReqwestClient;

use crate::backend::{Backend, drain_fragments};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::ndjson::process_ndjson;
use crate::observability::{CLIENT_REQUEST_ERRORS, CLIENT_REQUESTS};
use crate::render::Renderer;
use crate::types::ChatRequest;

/// Bound on one local exchange, connection through last chunk.
const LOCAL_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the local model daemon.
///
/// Speaks the daemon's newline-delimited JSON chat protocol; no credential
/// and no temperature are sent.
#[derive(Debug, Clone)]
pub struct LocalBackend {
    client: ReqwestClient,
    endpoint: String,
    model: String,
}

impl LocalBackend {
    /// Creates a local backend from the process configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let client = ReqwestClient::builder()
            .timeout(LOCAL_TIMEOUT)
            .build()
            .map_err(|e| {
                Error::http_client(format!("failed to build HTTP client: {e}"), Some(Box::new(e)))
            })?;

        Ok(Self {
            client,
            endpoint: config.local_url.clone(),
            model: config.local_model.clone(),
        })
    }
}

#[async_trait::async_trait]
impl Backend for LocalBackend {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn send(&self, prompt: &str, renderer: &mut dyn Renderer) -> Result<String> {
        CLIENT_REQUESTS.click();
        let request = ChatRequest::streaming(&self.model, prompt);

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                CLIENT_REQUEST_ERRORS.click();
                if e.is_timeout() {
                    Error::timeout(
                        format!("request timed out: {e}"),
                        Some(LOCAL_TIMEOUT.as_secs_f64()),
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

        drain_fragments(process_ndjson(response.bytes_stream()), renderer).await
    }
}
