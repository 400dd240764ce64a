//! Process-wide configuration.
//!
//! Configuration is read from the environment once at startup and passed by
//! reference into the dispatcher and backend clients; nothing mutates it
//! afterwards.

use std::env;

/// Default endpoint for the hosted chat-completions API.
pub const DEFAULT_REMOTE_URL: &str = "https://api.siliconflow.cn/v1/chat/completions";

/// Default model served by the hosted API.
pub const DEFAULT_REMOTE_MODEL: &str = "THUDM/GLM-4-9B-0414";

/// Default endpoint for the local model daemon.
pub const DEFAULT_LOCAL_URL: &str = "http://localhost:11434/api/chat";

/// Default model served by the local daemon.
pub const DEFAULT_LOCAL_MODEL: &str = "qwen2.5:7b";

/// Default sampling temperature for remote requests.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Immutable configuration for one process.
#[derive(Debug, Clone)]
pub struct Config {
    /// Credential for the hosted API. `None` means not configured.
    pub api_key: Option<String>,
    /// Endpoint URL of the hosted chat API.
    pub remote_url: String,
    /// Model identifier sent to the hosted API.
    pub remote_model: String,
    /// Endpoint URL of the local model daemon.
    pub local_url: String,
    /// Model identifier sent to the local daemon.
    pub local_model: String,
    /// Sampling temperature for remote requests.
    pub temperature: f32,
}

impl Config {
    /// Creates a configuration with default endpoints and no credential.
    pub fn new() -> Self {
        Self {
            api_key: None,
            remote_url: DEFAULT_REMOTE_URL.to_string(),
            remote_model: DEFAULT_REMOTE_MODEL.to_string(),
            local_url: DEFAULT_LOCAL_URL.to_string(),
            local_model: DEFAULT_LOCAL_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    /// Reads the configuration from the environment.
    ///
    /// An unset or empty `COURIER_API_KEY` means no credential is
    /// configured; the dispatcher routes to the local backend in that case.
    pub fn from_env() -> Self {
        let api_key = env::var("COURIER_API_KEY")
            .ok()
            .filter(|key| !key.is_empty());
        Self {
            api_key,
            remote_url: env::var("COURIER_REMOTE_URL")
                .unwrap_or_else(|_| DEFAULT_REMOTE_URL.to_string()),
            remote_model: env::var("COURIER_REMOTE_MODEL")
                .unwrap_or_else(|_| DEFAULT_REMOTE_MODEL.to_string()),
            local_url: env::var("COURIER_LOCAL_URL")
                .unwrap_or_else(|_| DEFAULT_LOCAL_URL.to_string()),
            local_model: env::var("COURIER_LOCAL_MODEL")
                .unwrap_or_else(|_| DEFAULT_LOCAL_MODEL.to_string()),
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    /// Returns true when a credential is configured.
    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    /// Sets the hosted API credential.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Sets the hosted API endpoint.
    pub fn with_remote_url(mut self, url: impl Into<String>) -> Self {
        self.remote_url = url.into();
        self
    }

    /// Sets the hosted API model.
    pub fn with_remote_model(mut self, model: impl Into<String>) -> Self {
        self.remote_model = model.into();
        self
    }

    /// Sets the local daemon endpoint.
    pub fn with_local_url(mut self, url: impl Into<String>) -> Self {
        self.local_url = url.into();
        self
    }

    /// Sets the local daemon model.
    pub fn with_local_model(mut self, model: impl Into<String>) -> Self {
        self.local_model = model.into();
        self
    }

    /// Sets the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::new();
        assert!(config.api_key.is_none());
        assert!(!config.has_credential());
        assert_eq!(config.remote_url, DEFAULT_REMOTE_URL);
        assert_eq!(config.remote_model, DEFAULT_REMOTE_MODEL);
        assert_eq!(config.local_url, DEFAULT_LOCAL_URL);
        assert_eq!(config.local_model, DEFAULT_LOCAL_MODEL);
        assert_eq!(config.temperature, DEFAULT_TEMPERATURE);
    }

    #[test]
    fn builder_pattern() {
        let config = Config::new()
            .with_api_key("sk-test")
            .with_remote_url("http://127.0.0.1:9999/v1/chat/completions")
            .with_remote_model("test/model")
            .with_local_url("http://127.0.0.1:11434/api/chat")
            .with_local_model("test:latest")
            .with_temperature(0.2);

        assert!(config.has_credential());
        assert_eq!(config.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.remote_model, "test/model");
        assert_eq!(config.local_model, "test:latest");
        assert_eq!(config.temperature, 0.2);
    }
}
