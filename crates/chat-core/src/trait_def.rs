//! The Directory trait definition.

use async_trait::async_trait;

use crate::conversation::Conversation;
use crate::error::Result;
use crate::message::Message;

/// A store of conversations that front-ends query and mutate.
///
/// Read operations return owned copies; callers never hold references into
/// the store. Queries report a missing target as `None` or an empty list,
/// while [`Directory::send_message`] fails with
/// [`DirectoryError::NotFound`](crate::DirectoryError::NotFound) so callers
/// can tell "sent" from "target vanished".
///
/// This trait is object-safe and can be used with `Box<dyn Directory>`.
#[async_trait]
pub trait Directory: Send + Sync {
    /// All conversations, in stable store order.
    async fn list_conversations(&self) -> Result<Vec<Conversation>>;

    /// Find a conversation by exact, case-sensitive user name.
    async fn conversation_by_user_name(&self, name: &str) -> Result<Option<Conversation>>;

    /// Messages of the conversation with the given user name.
    ///
    /// Returns an empty list when no conversation matches.
    async fn messages_for_user(&self, name: &str) -> Result<Vec<Message>> {
        Ok(self
            .conversation_by_user_name(name)
            .await?
            .map(Conversation::into_messages)
            .unwrap_or_default())
    }

    /// Make one conversation active and clear its unread count.
    ///
    /// Every other conversation becomes inactive. An unknown id is not an
    /// error and leaves no conversation active.
    async fn set_active(&self, conversation_id: &str) -> Result<()>;

    /// Append a text message from the local user and return it.
    async fn send_message(&self, conversation_id: &str, text: &str) -> Result<Message>;

    /// Conversations whose user name contains `query`, ignoring case.
    ///
    /// A blank query matches everything.
    async fn search_conversations(&self, query: &str) -> Result<Vec<Conversation>> {
        let conversations = self.list_conversations().await?;
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(conversations);
        }

        Ok(conversations
            .into_iter()
            .filter(|conversation| conversation.user.name.to_lowercase().contains(&needle))
            .collect())
    }

    /// Get a human-readable name for this directory implementation.
    fn name(&self) -> &str;
}
