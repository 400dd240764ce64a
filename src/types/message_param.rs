use serde::{Deserialize, Serialize};

use crate::types::message_role::MessageRole;

/// A single message in a chat request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageParam {
    /// Who authored the message.
    pub role: MessageRole,
    /// The message text.
    pub content: String,
}

impl MessageParam {
    /// Create a user-role message with the given content.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}
