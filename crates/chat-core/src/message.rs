//! Message types.
//!
//! A [`Message`] carries the fields common to every chat event plus a
//! [`MessageKind`] that holds the payload specific to its kind. On the wire
//! the kind is flattened into the message object and selected by the
//! `messageType` field.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DirectoryError;
use crate::user::User;

/// Display attribution used for messages sent by the local user.
pub const SELF_NAME: &str = "You";

/// The discriminant of a [`MessageKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    Text,
    Image,
    Audio,
    Video,
    Contact,
    Location,
    Document,
    Gif,
    Sticker,
    Unknown,
}

impl MessageType {
    /// Every message type, in declaration order.
    pub const ALL: [MessageType; 10] = [
        Self::Text,
        Self::Image,
        Self::Audio,
        Self::Video,
        Self::Contact,
        Self::Location,
        Self::Document,
        Self::Gif,
        Self::Sticker,
        Self::Unknown,
    ];

    /// Get the wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::Audio => "audio",
            Self::Video => "video",
            Self::Contact => "contact",
            Self::Location => "location",
            Self::Document => "document",
            Self::Gif => "gif",
            Self::Sticker => "sticker",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageType {
    type Err = DirectoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| DirectoryError::UnknownMessageKind(s.to_string()))
    }
}

/// Kind-specific message payload.
///
/// Only the fields meaningful for a kind exist on its variant. Deserializing
/// a `messageType` outside the supported set fails rather than falling back
/// to [`MessageKind::Unknown`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "messageType",
    rename_all = "lowercase",
    rename_all_fields = "camelCase"
)]
pub enum MessageKind {
    Text,
    Image {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        file_path: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        mime_type: Option<String>,
    },
    Audio {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        file_path: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        mime_type: Option<String>,
        /// Length in seconds.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        media_duration: Option<u32>,
    },
    Video {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        file_path: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        mime_type: Option<String>,
        /// Length in seconds.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        media_duration: Option<u32>,
    },
    Contact,
    Location,
    Document {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        file_path: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        mime_type: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        page_count: Option<u32>,
    },
    Gif {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        file_path: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        mime_type: Option<String>,
    },
    Sticker {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        file_path: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        mime_type: Option<String>,
    },
    Unknown,
}

impl MessageKind {
    /// Get the discriminant.
    pub fn message_type(&self) -> MessageType {
        match self {
            Self::Text => MessageType::Text,
            Self::Image { .. } => MessageType::Image,
            Self::Audio { .. } => MessageType::Audio,
            Self::Video { .. } => MessageType::Video,
            Self::Contact => MessageType::Contact,
            Self::Location => MessageType::Location,
            Self::Document { .. } => MessageType::Document,
            Self::Gif { .. } => MessageType::Gif,
            Self::Sticker { .. } => MessageType::Sticker,
            Self::Unknown => MessageType::Unknown,
        }
    }

    /// Media reference, for kinds that carry one.
    pub fn file_path(&self) -> Option<&str> {
        match self {
            Self::Image { file_path, .. }
            | Self::Audio { file_path, .. }
            | Self::Video { file_path, .. }
            | Self::Document { file_path, .. }
            | Self::Gif { file_path, .. }
            | Self::Sticker { file_path, .. } => file_path.as_deref(),
            Self::Text | Self::Contact | Self::Location | Self::Unknown => None,
        }
    }

    /// MIME type, for kinds that carry one.
    pub fn mime_type(&self) -> Option<&str> {
        match self {
            Self::Image { mime_type, .. }
            | Self::Audio { mime_type, .. }
            | Self::Video { mime_type, .. }
            | Self::Document { mime_type, .. }
            | Self::Gif { mime_type, .. }
            | Self::Sticker { mime_type, .. } => mime_type.as_deref(),
            Self::Text | Self::Contact | Self::Location | Self::Unknown => None,
        }
    }

    /// Duration in seconds for audio and video.
    pub fn media_duration(&self) -> Option<u32> {
        match self {
            Self::Audio { media_duration, .. } | Self::Video { media_duration, .. } => {
                *media_duration
            }
            _ => None,
        }
    }

    /// Page count for documents.
    pub fn page_count(&self) -> Option<u32> {
        match self {
            Self::Document { page_count, .. } => *page_count,
            _ => None,
        }
    }
}

/// A single chat event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Unique within its conversation.
    pub id: String,
    /// True when the local user sent it.
    pub from_me: bool,
    /// Kind discriminant and kind-specific payload.
    #[serde(flatten)]
    pub kind: MessageKind,
    #[serde(with = "crate::timestamp::lenient")]
    pub timestamp: DateTime<Utc>,
    /// Message body, or caption for media.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_data: Option<String>,
    #[serde(default)]
    pub starred: bool,
    /// Phone number of the conversation this message belongs to.
    pub chat_number: String,
    pub sender: String,
    pub username: String,
    /// Emoji reaction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reaction: Option<String>,
    /// How many times the message has been forwarded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forward_score: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_index: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mention_msg_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
}

impl Message {
    /// Create a bare message with the given attribution and no optional fields.
    pub fn new(
        id: impl Into<String>,
        kind: MessageKind,
        timestamp: DateTime<Utc>,
        chat_number: impl Into<String>,
        from_me: bool,
        sender: impl Into<String>,
        username: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            from_me,
            kind,
            timestamp,
            text_data: None,
            starred: false,
            chat_number: chat_number.into(),
            sender: sender.into(),
            username: username.into(),
            reaction: None,
            forward_score: None,
            link_index: None,
            mention_msg_id: None,
            subject: None,
        }
    }

    /// Create a text message sent by the local user.
    pub fn outgoing_text(
        id: impl Into<String>,
        chat_number: impl Into<String>,
        text: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self::new(
            id,
            MessageKind::Text,
            timestamp,
            chat_number,
            true,
            SELF_NAME,
            SELF_NAME,
        )
        .with_text(text)
    }

    /// Create a message received from `user`.
    pub fn incoming(
        id: impl Into<String>,
        user: &User,
        kind: MessageKind,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self::new(
            id,
            kind,
            timestamp,
            user.phone_number.clone(),
            false,
            user.phone_number.clone(),
            user.name.clone(),
        )
    }

    /// Set the body or caption.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text_data = Some(text.into());
        self
    }

    /// Set the emoji reaction.
    pub fn with_reaction(mut self, reaction: impl Into<String>) -> Self {
        self.reaction = Some(reaction.into());
        self
    }

    /// Mark the message as starred.
    pub fn starred(mut self) -> Self {
        self.starred = true;
        self
    }

    /// Get the kind discriminant.
    pub fn message_type(&self) -> MessageType {
        self.kind.message_type()
    }

    /// Body or caption, if non-empty.
    pub fn text(&self) -> Option<&str> {
        self.text_data.as_deref().filter(|text| !text.is_empty())
    }
}
