//! Conversations: one user plus their message history.

use serde::Serialize;

use crate::message::Message;
use crate::user::User;

/// A user with their ordered message history and summary fields.
///
/// Seeded history is sorted by timestamp, with insertion order breaking ties.
/// Later messages are appended in arrival order and become `last_message`.
/// Both fields are only reachable through accessors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: String,
    pub user: User,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_message: Option<Message>,
    pub unread_count: u32,
    messages: Vec<Message>,
    pub is_active: bool,
}

impl Conversation {
    /// Create an inactive conversation with no unread messages.
    ///
    /// `messages` may arrive in any order; they are sorted by timestamp.
    pub fn new(id: impl Into<String>, user: User, mut messages: Vec<Message>) -> Self {
        // Stable sort keeps insertion order for equal timestamps.
        messages.sort_by_key(|message| message.timestamp);
        Self {
            id: id.into(),
            user,
            last_message: messages.last().cloned(),
            unread_count: 0,
            messages,
            is_active: false,
        }
    }

    /// Set the initial unread count.
    pub fn with_unread_count(mut self, unread_count: u32) -> Self {
        self.unread_count = unread_count;
        self
    }

    /// Messages in sequence order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Consume the conversation, returning its messages.
    pub fn into_messages(self) -> Vec<Message> {
        self.messages
    }

    /// The most recently added message, if any.
    pub fn last_message(&self) -> Option<&Message> {
        self.last_message.as_ref()
    }

    /// Whether the conversation has no messages.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Append a message and make it the last message.
    pub fn push_message(&mut self, message: Message) {
        self.last_message = Some(message.clone());
        self.messages.push(message);
    }

    /// Whether a message with this id exists.
    pub fn contains_message(&self, message_id: &str) -> bool {
        self.messages.iter().any(|message| message.id == message_id)
    }

    /// Mark as the active conversation and clear its unread count.
    pub fn activate(&mut self) {
        self.is_active = true;
        self.unread_count = 0;
    }

    /// Mark as not active. The unread count is untouched.
    pub fn deactivate(&mut self) {
        self.is_active = false;
    }
}
