use serde::Deserialize;

/// Incremental message content carried by one streaming choice.
///
/// Either field may be absent. An absent field is no fragment at all;
/// a present-but-empty string is an empty fragment.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ChoiceDelta {
    /// The primary content channel; accumulated into the reply.
    pub content: Option<String>,
    /// The reasoning channel; displayed but never accumulated.
    pub reasoning_content: Option<String>,
}
