use serde::Deserialize;

use crate::types::choice_delta::ChoiceDelta;

/// A single streaming choice within a remote completion chunk.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChunkChoice {
    /// The incremental content for this choice.
    #[serde(default)]
    pub delta: ChoiceDelta,
}
