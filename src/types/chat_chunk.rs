use serde::Deserialize;

use crate::types::chunk_message::ChunkMessage;

/// One line of a local streaming response.
///
/// The local daemon emits newline-delimited JSON objects with no prefix and
/// no terminator; the stream simply ends with the body.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChatChunk {
    /// The incremental message, when the line carries one.
    pub message: Option<ChunkMessage>,
}

impl ChatChunk {
    /// Consumes the chunk and returns its content, if present.
    pub fn into_content(self) -> Option<String> {
        self.message.and_then(|message| message.content)
    }
}
