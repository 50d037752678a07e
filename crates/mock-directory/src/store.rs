//! In-memory conversation store.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chat_core::{Clock, Conversation, Directory, DirectoryError, Message, Result, SystemClock};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::config::ReaderConfig;
use crate::generator::{seed_users, ConversationGenerator, GeneratorConfig};

/// A directory that keeps every conversation in memory.
///
/// The store answers immediately; wrap it in
/// [`DelayedDirectory`](crate::DelayedDirectory) to simulate network latency.
/// Mutations take the write lock, so they are applied one at a time.
///
/// # Example
///
/// ```rust
/// use mock_directory::{Directory, GeneratorConfig, MockDirectory};
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() -> Result<(), chat_core::DirectoryError> {
///     let directory = MockDirectory::generated(GeneratorConfig::seeded(1));
///
///     let conversations = directory.list_conversations().await?;
///     directory.set_active(&conversations[0].id).await?;
///     let sent = directory.send_message(&conversations[0].id, "On my way").await?;
///     assert!(sent.from_me);
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct MockDirectory {
    conversations: RwLock<Vec<Conversation>>,
    clock: Arc<dyn Clock>,
    /// Disambiguates ids of messages sent within the same millisecond.
    sequence: AtomicU64,
    database_path: RwLock<Option<PathBuf>>,
}

impl MockDirectory {
    /// Create a store holding `conversations`, using the system clock.
    pub fn new(conversations: Vec<Conversation>) -> Self {
        Self::with_clock(conversations, Arc::new(SystemClock))
    }

    /// Create a store holding `conversations` with an explicit clock.
    pub fn with_clock(conversations: Vec<Conversation>, clock: Arc<dyn Clock>) -> Self {
        info!(conversations = conversations.len(), "MockDirectory created");
        Self {
            conversations: RwLock::new(conversations),
            clock,
            sequence: AtomicU64::new(0),
            database_path: RwLock::new(None),
        }
    }

    /// Create a store seeded with generated conversations for the default users.
    pub fn generated(config: GeneratorConfig) -> Self {
        Self::generated_with_clock(config, Arc::new(SystemClock))
    }

    /// Like [`MockDirectory::generated`], with message times relative to `clock`.
    pub fn generated_with_clock(config: GeneratorConfig, clock: Arc<dyn Clock>) -> Self {
        let conversations = ConversationGenerator::new(config).generate(&seed_users(), clock.now());
        Self::with_clock(conversations, clock)
    }

    /// Create a generated store from reader configuration.
    pub fn from_config(config: &ReaderConfig) -> Result<Self> {
        if let Some(path) = &config.database_path {
            validate_database_path(path)?;
        }

        let mut directory = Self::generated(config.generator_config());
        *directory.database_path.get_mut() = config.database_path.clone();
        Ok(directory)
    }

    /// Record the path of a message database.
    ///
    /// The path is only stored; no file is opened or parsed.
    pub async fn set_database_path(&self, path: impl Into<PathBuf>) -> Result<()> {
        let path = path.into();
        validate_database_path(&path)?;
        info!(path = %path.display(), "Database path set");
        *self.database_path.write().await = Some(path);
        Ok(())
    }

    /// The recorded database path, if any.
    pub async fn database_path(&self) -> Option<PathBuf> {
        self.database_path.read().await.clone()
    }

    /// Whether a database path has been recorded.
    pub async fn is_database_path_set(&self) -> bool {
        self.database_path.read().await.is_some()
    }

    /// Number of conversations in the store.
    pub async fn conversation_count(&self) -> usize {
        self.conversations.read().await.len()
    }

    fn next_message_id(&self, conversation_id: &str, millis: i64) -> String {
        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed);
        format!("msg-{}-{}-{}", conversation_id, millis, sequence)
    }
}

fn validate_database_path(path: &std::path::Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(DirectoryError::Configuration(
            "database path must not be empty".to_string(),
        ));
    }
    Ok(())
}

#[async_trait]
impl Directory for MockDirectory {
    async fn list_conversations(&self) -> Result<Vec<Conversation>> {
        let conversations = self.conversations.read().await;
        debug!(count = conversations.len(), "Listing conversations");
        Ok(conversations.clone())
    }

    async fn conversation_by_user_name(&self, name: &str) -> Result<Option<Conversation>> {
        let conversations = self.conversations.read().await;
        let found = conversations
            .iter()
            .find(|conversation| conversation.user.name == name)
            .cloned();
        debug!(name, found = found.is_some(), "Looked up conversation");
        Ok(found)
    }

    async fn messages_for_user(&self, name: &str) -> Result<Vec<Message>> {
        let conversations = self.conversations.read().await;
        Ok(conversations
            .iter()
            .find(|conversation| conversation.user.name == name)
            .map(|conversation| conversation.messages().to_vec())
            .unwrap_or_default())
    }

    async fn set_active(&self, conversation_id: &str) -> Result<()> {
        let mut conversations = self.conversations.write().await;
        let mut matched = false;

        for conversation in conversations.iter_mut() {
            if conversation.id == conversation_id {
                conversation.activate();
                matched = true;
            } else {
                conversation.deactivate();
            }
        }

        if matched {
            debug!(conversation_id, "Conversation activated");
        } else {
            debug!(conversation_id, "No conversation to activate");
        }
        Ok(())
    }

    async fn send_message(&self, conversation_id: &str, text: &str) -> Result<Message> {
        if text.trim().is_empty() {
            warn!(conversation_id, "Rejected empty message");
            return Err(DirectoryError::EmptyMessage);
        }

        let mut conversations = self.conversations.write().await;
        let conversation = conversations
            .iter_mut()
            .find(|conversation| conversation.id == conversation_id)
            .ok_or_else(|| {
                warn!(conversation_id, "Send to unknown conversation");
                DirectoryError::conversation_not_found(conversation_id)
            })?;

        let now = self.clock.now();
        let message = Message::outgoing_text(
            self.next_message_id(conversation_id, now.timestamp_millis()),
            conversation.user.phone_number.clone(),
            text,
            now,
        );
        conversation.push_message(message.clone());

        info!(conversation_id, message_id = %message.id, "Message sent");
        Ok(message)
    }

    fn name(&self) -> &str {
        "MockDirectory"
    }
}
