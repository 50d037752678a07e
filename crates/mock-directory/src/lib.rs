//! Mock conversation directory for the message reader.
//!
//! This crate provides in-memory implementations of the `Directory` trait:
//! - `MockDirectory` - Holds generated conversations in memory
//! - `DelayedDirectory` - Wraps another directory with artificial latency
//!
//! # Example
//!
//! ```rust
//! use mock_directory::{Directory, GeneratorConfig, MockDirectory};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), mock_directory::DirectoryError> {
//!     let directory = MockDirectory::generated(GeneratorConfig::seeded(7));
//!
//!     for conversation in directory.search_conversations("chen").await? {
//!         println!("{} ({} unread)", conversation.user.name, conversation.unread_count);
//!     }
//!     Ok(())
//! }
//! ```

mod config;
mod delayed;
mod generator;
mod store;

// Re-export chat-core types for convenience
pub use chat_core::{async_trait, Conversation, Directory, DirectoryError, Message, Result};

pub use config::ReaderConfig;
pub use delayed::{DelayedDirectory, LatencyProfile};
pub use generator::{seed_users, ConversationGenerator, GeneratorConfig};
pub use store::MockDirectory;

use tracing::info;

/// Build the directory described by `config`.
///
/// Returns the bare store, or the store behind a [`DelayedDirectory`] when
/// latency simulation is enabled.
pub fn build_directory(config: &ReaderConfig) -> Result<Box<dyn Directory>> {
    let store = MockDirectory::from_config(config)?;

    if config.simulate_latency {
        info!(latency = ?config.latency, "Simulating directory latency");
        Ok(Box::new(DelayedDirectory::new(store, config.latency)))
    } else {
        Ok(Box::new(store))
    }
}
