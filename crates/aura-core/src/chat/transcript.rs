//! Append-only transcript of a chat session.

use aura_types::chat::{ChatMessage, Sender};

/// Ordered in-memory sequence of messages for one session.
///
/// Insertion order is chronological order. There is no API to
/// remove or edit a message once it has been pushed.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message to the end of the transcript.
    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    /// Number of messages from `sender`.
    pub fn count_from(&self, sender: Sender) -> usize {
        self.messages.iter().filter(|m| m.sender == sender).count()
    }
}
