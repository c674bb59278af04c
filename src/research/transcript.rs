//! Append-only conversation transcript

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::providers::GroundingMetadata;

/// Author of a transcript entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The person asking
    User,
    /// The research assistant
    Assistant,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Assistant => write!(f, "assistant"),
        }
    }
}

/// One immutable transcript entry
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    role: Role,
    text: String,
    grounding: Option<GroundingMetadata>,
    timestamp: DateTime<Local>,
}

impl ChatMessage {
    /// A user entry stamped with the current time
    pub fn user(text: impl Into<String>) -> Self {
        Self::at(Role::User, text, None, Local::now())
    }

    /// An assistant entry stamped with the current time
    pub fn assistant(text: impl Into<String>, grounding: Option<GroundingMetadata>) -> Self {
        Self::at(Role::Assistant, text, grounding, Local::now())
    }

    /// An entry with an explicit timestamp
    pub fn at(
        role: Role,
        text: impl Into<String>,
        grounding: Option<GroundingMetadata>,
        timestamp: DateTime<Local>,
    ) -> Self {
        Self {
            role,
            text: text.into(),
            grounding,
            timestamp,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn grounding(&self) -> Option<&GroundingMetadata> {
        self.grounding.as_ref()
    }

    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }

    /// Two-digit hour and minute, e.g. `09:05`
    pub fn time_label(&self) -> String {
        self.timestamp.format("%H:%M").to_string()
    }
}

/// Ordered log of conversation entries
///
/// Entries can only be appended; display order is insertion order.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry and return its index
    pub fn append(&mut self, message: ChatMessage) -> usize {
        self.messages.push(message);
        self.messages.len() - 1
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ChatMessage> {
        self.messages.get(index)
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChatMessage> {
        self.messages.iter()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }
}
