use serde::Deserialize;

use crate::types::chunk_choice::ChunkChoice;
use crate::types::choice_delta::ChoiceDelta;

/// One parsed data line of a remote streaming response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CompletionChunk {
    /// Streaming choices; the first carries the incremental content.
    #[serde(default)]
    pub choices: Vec<ChunkChoice>,
}

impl CompletionChunk {
    /// Returns the first choice's delta, if the chunk has any choices.
    pub fn delta(&self) -> Option<&ChoiceDelta> {
        self.choices.first().map(|choice| &choice.delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_deserialization() {
        let chunk: CompletionChunk =
            serde_json::from_str(r#"{"choices":[{"delta":{"content":"Hi"}}]}"#).unwrap();
        assert_eq!(chunk.delta().unwrap().content.as_deref(), Some("Hi"));
    }

    #[test]
    fn empty_choices() {
        let chunk: CompletionChunk = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert!(chunk.delta().is_none());

        let chunk: CompletionChunk = serde_json::from_str("{}").unwrap();
        assert!(chunk.delta().is_none());
    }

    #[test]
    fn unknown_fields_ignored() {
        let chunk: CompletionChunk = serde_json::from_str(
            r#"{"id":"cmpl-1","object":"chat.completion.chunk","choices":[{"index":0,"delta":{"content":"x"},"finish_reason":null}]}"#,
        )
        .unwrap();
        assert_eq!(chunk.delta().unwrap().content.as_deref(), Some("x"));
    }
}
