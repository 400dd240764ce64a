use serde::Serialize;

use crate::types::message_param::MessageParam;

/// Parameters for one streaming chat request.
///
/// Constructed fresh per call and serialized as the request body for both
/// backends. The local daemon's body carries no `temperature`; the field is
/// omitted entirely when unset rather than sent as null.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    /// Model identifier understood by the target backend.
    pub model: String,
    /// The conversation; here always a single user-role entry.
    pub messages: Vec<MessageParam>,
    /// Sampling temperature, remote requests only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Always true; both backends are driven in streaming mode.
    pub stream: bool,
}

impl ChatRequest {
    /// Create a streaming request carrying a single user prompt.
    pub fn streaming(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: vec![MessageParam::user(prompt)],
            temperature: None,
            stream: true,
        }
    }

    /// Sets the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, to_value};

    #[test]
    fn remote_body_shape() {
        let request = ChatRequest::streaming("THUDM/GLM-4-9B-0414", "Hello").with_temperature(0.5);
        assert_eq!(
            to_value(&request).unwrap(),
            json!({
                "model": "THUDM/GLM-4-9B-0414",
                "messages": [{"role": "user", "content": "Hello"}],
                "temperature": 0.5,
                "stream": true
            })
        );
    }

    #[test]
    fn local_body_omits_temperature() {
        let request = ChatRequest::streaming("qwen2.5:7b", "Hello");
        let value = to_value(&request).unwrap();
        assert!(value.get("temperature").is_none());
        assert_eq!(value["stream"], json!(true));
    }
}
