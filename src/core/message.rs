//! # Messages
//!
//! The unit of the conversation log. Messages are created only by the
//! [`Conversation`](super::conversation::Conversation) state machine and are
//! immutable afterwards, except for the delivery `status` of user messages.

use std::fmt;

/// Opaque unique message identifier (UUID v4).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MessageId(String);

impl MessageId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Label shown under a message in the stream.
    pub fn label(&self) -> &'static str {
        match self {
            Role::User => "You",
            Role::Assistant => "AI Assistant",
        }
    }
}

/// Delivery state of a user message.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum MessageStatus {
    Sending,
    Sent,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub id: MessageId,
    pub role: Role,
    pub content: String,
    pub status: Option<MessageStatus>,
}

impl Message {
    pub(crate) fn user(content: String) -> Self {
        Self {
            id: MessageId::new(),
            role: Role::User,
            content,
            status: Some(MessageStatus::Sending),
        }
    }

    pub(crate) fn assistant(content: String) -> Self {
        Self {
            id: MessageId::new(),
            role: Role::Assistant,
            content,
            status: None,
        }
    }

    pub fn is_failed(&self) -> bool {
        self.status == Some(MessageStatus::Error)
    }
}
