use serde::{Deserialize, Serialize};

/// The role of a chat message author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// The end user.
    User,
    /// The model.
    Assistant,
    /// System-level instructions.
    System,
}
