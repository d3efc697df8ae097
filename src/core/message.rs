use chrono::{DateTime, Utc};

use crate::api::ChatMessage;
use crate::core::ids::make_id;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Only ever used when building outbound context; never stored in a transcript.
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// A transcript entry. Fields are private so a message cannot change once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    id: String,
    role: Role,
    content: String,
    created_at: DateTime<Utc>,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: make_id(),
            role,
            content: content.into(),
            created_at: Utc::now(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn is_assistant(&self) -> bool {
        self.role == Role::Assistant
    }

    /// Strip the message down to what the backend sees.
    pub fn to_chat_message(&self) -> ChatMessage {
        ChatMessage::new(self.role.as_str(), self.content.clone())
    }
}
