#![allow(dead_code)]

//! Conversation Context — ordered, append-only message history plus the
//! single-shot request/response exchange against a `ChatBackend`.

use serde::{Deserialize, Serialize};

use super::schema::ResponseSchema;
use super::{ChatBackend, LlmError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
    Function,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::Function => "function",
        };
        f.write_str(label)
    }
}

/// One turn of the conversation. Immutable once appended.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// An identifier plus an ordered message sequence.
///
/// The history grows monotonically for the lifetime of the conversation:
/// existing entries are never mutated, reordered, or removed. Ordering is
/// conversation order and forms the prompt history sent to the backend.
#[derive(Debug)]
pub struct Conversation {
    id: u32,
    messages: Vec<Message>,
}

impl Conversation {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            messages: Vec::new(),
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn push_system(&mut self, content: impl Into<String>) {
        self.append(Message::new(Role::System, content));
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.append(Message::new(Role::User, content));
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.append(Message::new(Role::Assistant, content));
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Renders the full history, one `role: content` line per turn.
    /// Used for debug logging of the prompt that is about to be sent.
    pub fn transcript(&self) -> String {
        let mut out = String::new();
        for message in &self.messages {
            out.push_str(&format!("{}: {}\n", message.role, message.content));
        }
        out
    }

    /// Sends the full history plus the schema constraint to the backend.
    ///
    /// On success the assistant's reply is appended to the history and the
    /// raw content payload is returned. On any failure the error is returned
    /// and the history is left untouched, so the caller may retry or abandon
    /// the conversation.
    pub async fn generate(
        &mut self,
        backend: &dyn ChatBackend,
        schema: &ResponseSchema,
    ) -> Result<String, LlmError> {
        let content = backend.complete(&self.messages, schema).await?;
        self.push_assistant(content.clone());
        Ok(content)
    }
}
