//! The user on the other side of a conversation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A chat participant, identified by a stable id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Stable unique id.
    pub id: String,
    /// Display name
    pub name: String,
    /// Phone number (e.g., "+11234567890")
    pub phone_number: String,
    /// Avatar image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// When the user was last seen online.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "crate::timestamp::lenient_option"
    )]
    pub last_seen: Option<DateTime<Utc>>,
    /// Presence flag, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_online: Option<bool>,
}

impl User {
    /// Create a user with no presence information.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        phone_number: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            phone_number: phone_number.into(),
            avatar: None,
            last_seen: None,
            is_online: None,
        }
    }

    /// Set the avatar URL.
    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }

    /// Set presence information.
    pub fn with_presence(mut self, last_seen: DateTime<Utc>, is_online: bool) -> Self {
        self.last_seen = Some(last_seen);
        self.is_online = Some(is_online);
        self
    }

    /// Whether the user is known to be online. Unknown presence counts as offline.
    pub fn is_online(&self) -> bool {
        self.is_online.unwrap_or(false)
    }
}
