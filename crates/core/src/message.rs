//! Chat message domain types.
//!
//! These are the core value objects that flow through the system:
//! user submits a question → Session Orchestrator appends it → Completion
//! Gateway produces a reply → the reply is appended alongside it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::language::Language;

/// Unique identifier for a message within a session.
///
/// Derived from the creation time in Unix milliseconds and monotonically
/// increasing. Uniqueness under rapid successive creation is the message
/// log's responsibility: its allocator bumps past the last issued id when
/// two messages land on the same millisecond.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct MessageId(pub u64);

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Who produced a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// The end user
    User,
    /// The assistant
    Bot,
}

impl std::fmt::Display for Sender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sender::User => write!(f, "user"),
            Sender::Bot => write!(f, "bot"),
        }
    }
}

/// A single message in the conversation log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Unique, time-derived id (see [`MessageId`])
    pub id: MessageId,

    /// The text content. May be empty for degenerate bot replies,
    /// never for user messages (enforced before creation).
    pub text: String,

    /// Who sent this message
    pub sender: Sender,

    /// Creation time, used for display and for sort order
    pub timestamp: DateTime<Utc>,

    /// The response language active when this message was created
    pub language: Language,
}

impl Message {
    /// Create a new user message.
    pub fn user(id: MessageId, text: impl Into<String>, language: Language) -> Self {
        Self {
            id,
            text: text.into(),
            sender: Sender::User,
            timestamp: Utc::now(),
            language,
        }
    }

    /// Create a new bot message.
    pub fn bot(id: MessageId, text: impl Into<String>, language: Language) -> Self {
        Self {
            id,
            text: text.into(),
            sender: Sender::Bot,
            timestamp: Utc::now(),
            language,
        }
    }

    /// The `sender: text` transcript line used for context windows.
    pub fn transcript_line(&self) -> String {
        format!("{}: {}", self.sender, self.text)
    }
}
