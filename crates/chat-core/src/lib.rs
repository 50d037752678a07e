//! Core types and the directory trait for the message reader.
//!
//! This crate provides the shared interface between conversation stores and
//! the front-ends that display them. It defines:
//!
//! - [`User`], [`Message`], [`Conversation`] - The conversation data model
//! - [`MessageKind`] - Tagged union over the supported message kinds
//! - [`Directory`] - The trait every conversation store implements
//! - [`group_by_date`] - Buckets a message thread under "Today"/"Yesterday"/date labels
//! - [`Clock`] - Injectable time source
//! - [`DirectoryError`] - Error types for directory operations
//!
//! # Example
//!
//! ```rust
//! use chat_core::{Conversation, Message, User};
//! use chrono::{TimeZone, Utc};
//!
//! let user = User::new("1", "Sarah Johnson", "+11234567890");
//! let sent = Utc.with_ymd_and_hms(2023, 6, 15, 10, 0, 0).unwrap();
//!
//! let mut conversation = Conversation::new("1", user, Vec::new());
//! conversation.push_message(Message::outgoing_text("msg-1-0", "+11234567890", "Hi!", sent));
//!
//! assert_eq!(conversation.messages().len(), 1);
//! assert_eq!(conversation.last_message().map(|m| m.id.as_str()), Some("msg-1-0"));
//! ```

mod clock;
mod conversation;
mod error;
mod grouping;
mod message;
mod trait_def;
mod user;

pub mod timestamp;

pub use clock::{Clock, FixedClock, SystemClock};
pub use conversation::Conversation;
pub use error::{DirectoryError, Result};
pub use grouping::{date_label, flatten, group_by_date, DateGroup, TODAY, YESTERDAY};
pub use message::{Message, MessageKind, MessageType, SELF_NAME};
pub use timestamp::parse_timestamp;
pub use trait_def::Directory;
pub use user::User;

// Re-export async_trait for implementors
pub use async_trait::async_trait;
