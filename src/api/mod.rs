use serde::{Deserialize, Serialize};

/// One role/content pair of the outbound context.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Deserialize)]
pub struct ChatReply {
    pub reply: String,
}

/// Body the backend may attach to a non-success response.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<String>,
}
