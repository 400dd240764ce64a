use serde::Deserialize;

/// The message object within a local streaming chunk.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChunkMessage {
    /// Incremental assistant text, when present.
    pub content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_optional() {
        let message: ChunkMessage = serde_json::from_str(r#"{"role":"assistant"}"#).unwrap();
        assert!(message.content.is_none());

        let message: ChunkMessage = serde_json::from_str(r#"{"content":""}"#).unwrap();
        assert_eq!(message.content.as_deref(), Some(""));
    }
}
