//! Synthetic users and message histories.

use chat_core::{Conversation, Message, MessageKind, MessageType, User};
use chrono::{DateTime, Duration, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::debug;

const TEXT_OPTIONS: &[&str] = &[
    "Hi there! How are you doing today?",
    "Just checking in. What's new?",
    "Can we meet tomorrow for coffee?",
    "Did you see that new movie we talked about?",
    "I'll send you the documents later.",
    "Thanks for your help yesterday!",
    "Let me know when you're free to talk.",
    "Have you finished the project?",
    "Happy birthday! Hope you have a great day.",
    "I'm running a bit late, be there in 10.",
];

const REACTIONS: &[&str] = &["❤️", "👍", "😂", "😮", "😢", "🙏"];

/// Knobs for conversation generation.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Minimum messages per conversation (inclusive).
    pub min_messages: usize,
    /// Maximum messages per conversation (exclusive).
    pub max_messages: usize,
    /// How far back message timestamps may go.
    pub history_window: Duration,
    /// Upper bound on the initial unread count (exclusive).
    pub max_unread: u32,
    /// RNG seed. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            min_messages: 15,
            max_messages: 30,
            history_window: Duration::days(3),
            max_unread: 5,
            seed: None,
        }
    }
}

impl GeneratorConfig {
    /// Default settings with a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }
}

/// Builds conversations with random but plausible histories.
pub struct ConversationGenerator {
    config: GeneratorConfig,
    rng: StdRng,
}

impl ConversationGenerator {
    /// Create a generator. The same seed yields the same data for the same `now`.
    pub fn new(config: GeneratorConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { config, rng }
    }

    /// One conversation per user, in user order. Conversation ids are user ids.
    pub fn generate(&mut self, users: &[User], now: DateTime<Utc>) -> Vec<Conversation> {
        users
            .iter()
            .map(|user| {
                let messages = self.generate_messages(user, now);
                let unread = if self.config.max_unread > 0 {
                    self.rng.gen_range(0..self.config.max_unread)
                } else {
                    0
                };
                debug!(
                    user = %user.name,
                    messages = messages.len(),
                    unread,
                    "Generated conversation"
                );
                Conversation::new(user.id.clone(), user.clone(), messages).with_unread_count(unread)
            })
            .collect()
    }

    /// A random message history for `user`, sorted by timestamp.
    pub fn generate_messages(&mut self, user: &User, now: DateTime<Utc>) -> Vec<Message> {
        let count = if self.config.max_messages > self.config.min_messages {
            self.rng
                .gen_range(self.config.min_messages..self.config.max_messages)
        } else {
            self.config.min_messages
        };
        let window_ms = self.config.history_window.num_milliseconds();

        let mut messages: Vec<Message> = (0..count)
            .map(|i| {
                let offset = if window_ms > 0 {
                    self.rng.gen_range(0..window_ms)
                } else {
                    0
                };
                let timestamp = now - Duration::milliseconds(offset);
                self.generate_message(user, format!("msg-{}-{}", user.id, i), timestamp)
            })
            .collect();

        messages.sort_by_key(|message| message.timestamp);
        messages
    }

    fn generate_message(&mut self, user: &User, id: String, timestamp: DateTime<Utc>) -> Message {
        let from_me = self.rng.gen_bool(0.5);
        let message_type = *MessageType::ALL
            .choose(&mut self.rng)
            .unwrap_or(&MessageType::Text);
        let (kind, text) = self.payload_for(message_type);

        let mut message = if from_me {
            Message::new(
                id,
                kind,
                timestamp,
                user.phone_number.clone(),
                true,
                chat_core::SELF_NAME,
                chat_core::SELF_NAME,
            )
        } else {
            Message::incoming(id, user, kind, timestamp)
        };

        message.text_data = text;
        message.starred = self.rng.gen_bool(0.1);
        if self.rng.gen_bool(0.2) {
            message.reaction = REACTIONS.choose(&mut self.rng).map(|r| r.to_string());
        }
        if self.rng.gen_bool(0.1) {
            message.forward_score = Some(self.rng.gen_range(1..=5));
        }
        if self.rng.gen_bool(0.1) {
            message.link_index = Some(self.rng.gen_range(0..3));
        }
        if self.rng.gen_bool(0.1) {
            message.mention_msg_id = Some(format!("mention-{}", self.rng.gen_range(0..100)));
        }
        if self.rng.gen_bool(0.1) {
            message.subject = Some("Important Message".to_string());
        }
        message
    }

    fn payload_for(&mut self, message_type: MessageType) -> (MessageKind, Option<String>) {
        match message_type {
            MessageType::Text => {
                let text = TEXT_OPTIONS.choose(&mut self.rng).map(|t| t.to_string());
                (MessageKind::Text, text)
            }
            MessageType::Image => {
                let caption = self
                    .rng
                    .gen_bool(0.3)
                    .then(|| "Check out this photo!".to_string());
                let kind = MessageKind::Image {
                    file_path: Some(format!(
                        "https://picsum.photos/id/{}/500/300",
                        self.rng.gen_range(0..100)
                    )),
                    mime_type: Some("image/jpeg".to_string()),
                };
                (kind, caption)
            }
            MessageType::Audio => {
                let kind = MessageKind::Audio {
                    file_path: Some("audio-file-path".to_string()),
                    mime_type: Some("audio/mp3".to_string()),
                    media_duration: Some(self.rng.gen_range(10..130)),
                };
                (kind, None)
            }
            MessageType::Video => {
                let kind = MessageKind::Video {
                    file_path: Some("video-file-path".to_string()),
                    mime_type: Some("video/mp4".to_string()),
                    media_duration: Some(self.rng.gen_range(30..330)),
                };
                (kind, None)
            }
            MessageType::Document => {
                let kind = MessageKind::Document {
                    file_path: Some("document-file-path".to_string()),
                    mime_type: Some("application/pdf".to_string()),
                    page_count: Some(self.rng.gen_range(1..=10)),
                };
                (kind, Some("Important documents".to_string()))
            }
            MessageType::Gif => (
                MessageKind::Gif {
                    file_path: None,
                    mime_type: None,
                },
                None,
            ),
            MessageType::Sticker => (
                MessageKind::Sticker {
                    file_path: None,
                    mime_type: None,
                },
                None,
            ),
            MessageType::Contact => (MessageKind::Contact, None),
            MessageType::Location => (MessageKind::Location, None),
            MessageType::Unknown => (MessageKind::Unknown, None),
        }
    }
}

/// The fixed set of users the mock directory is seeded with.
pub fn seed_users() -> Vec<User> {
    vec![
        seed_user(
            "1",
            "Sarah Johnson",
            "+11234567890",
            "photo-1494790108377-be9c29b29330",
            (14, 30),
            true,
        ),
        seed_user(
            "2",
            "David Chen",
            "+10987654321",
            "photo-1599566150163-29194dcaad36",
            (12, 45),
            false,
        ),
        seed_user(
            "3",
            "Emma Wilson",
            "+12233445566",
            "photo-1535713875002-d1d0cf377fde",
            (13, 15),
            true,
        ),
        seed_user(
            "4",
            "Carlos Rodriguez",
            "+13344556677",
            "photo-1472099645785-5658abf4ff4e",
            (10, 30),
            false,
        ),
        seed_user(
            "5",
            "Lisa Taylor",
            "+14455667788",
            "photo-1544005313-94ddf0286df2",
            (15, 20),
            true,
        ),
    ]
}

fn seed_user(
    id: &str,
    name: &str,
    phone_number: &str,
    photo: &str,
    (hour, minute): (u32, u32),
    is_online: bool,
) -> User {
    let mut user = User::new(id, name, phone_number).with_avatar(format!(
        "https://images.unsplash.com/{}?ixlib=rb-1.2.1&auto=format&fit=crop&w=256&q=80",
        photo
    ));
    user.last_seen = Utc
        .with_ymd_and_hms(2023, 6, 15, hour, minute, 0)
        .single();
    user.is_online = Some(is_online);
    user
}
