//! Delayed directory implementation - wraps another directory with artificial latency.

use std::time::Duration;

use async_trait::async_trait;
use chat_core::{Conversation, Directory, Message, Result};
use tokio::time::sleep;

/// Per-operation delays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencyProfile {
    /// Delay before listing conversations.
    pub list: Duration,
    /// Delay before a lookup by user name.
    pub lookup: Duration,
    /// Delay before a send completes.
    pub send: Duration,
    /// Delay before activation.
    pub set_active: Duration,
}

impl LatencyProfile {
    /// No delay anywhere.
    pub const fn zero() -> Self {
        Self {
            list: Duration::ZERO,
            lookup: Duration::ZERO,
            send: Duration::ZERO,
            set_active: Duration::ZERO,
        }
    }

    /// The same delay for every operation.
    pub const fn uniform(delay: Duration) -> Self {
        Self {
            list: delay,
            lookup: delay,
            send: delay,
            set_active: delay,
        }
    }
}

impl Default for LatencyProfile {
    /// Roughly what a remote message API would feel like.
    fn default() -> Self {
        Self {
            list: Duration::from_millis(500),
            lookup: Duration::from_millis(300),
            send: Duration::from_millis(200),
            set_active: Duration::ZERO,
        }
    }
}

/// A directory that wraps another directory and adds artificial delay.
///
/// Useful for exercising loading states in front-ends.
pub struct DelayedDirectory<D: Directory> {
    inner: D,
    profile: LatencyProfile,
}

impl<D: Directory> DelayedDirectory<D> {
    /// Create a new DelayedDirectory wrapping the given directory with the specified delays.
    pub fn new(inner: D, profile: LatencyProfile) -> Self {
        Self { inner, profile }
    }

    /// The configured delays.
    pub fn profile(&self) -> LatencyProfile {
        self.profile
    }

    /// Access the wrapped directory.
    pub fn inner(&self) -> &D {
        &self.inner
    }
}

async fn pause(delay: Duration) {
    if !delay.is_zero() {
        sleep(delay).await;
    }
}

#[async_trait]
impl<D: Directory> Directory for DelayedDirectory<D> {
    async fn list_conversations(&self) -> Result<Vec<Conversation>> {
        pause(self.profile.list).await;
        self.inner.list_conversations().await
    }

    async fn conversation_by_user_name(&self, name: &str) -> Result<Option<Conversation>> {
        pause(self.profile.lookup).await;
        self.inner.conversation_by_user_name(name).await
    }

    async fn messages_for_user(&self, name: &str) -> Result<Vec<Message>> {
        pause(self.profile.lookup).await;
        self.inner.messages_for_user(name).await
    }

    async fn set_active(&self, conversation_id: &str) -> Result<()> {
        pause(self.profile.set_active).await;
        self.inner.set_active(conversation_id).await
    }

    async fn send_message(&self, conversation_id: &str, text: &str) -> Result<Message> {
        pause(self.profile.send).await;
        self.inner.send_message(conversation_id, text).await
    }

    fn name(&self) -> &str {
        "DelayedDirectory"
    }
}
