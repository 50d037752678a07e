//! Command implementations.
//!
//! Each command talks to the directory only through the `Directory` trait and
//! writes to the given output, so tests can drive it with an in-memory store.

use std::io::Write;

use chat_core::{group_by_date, Directory};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::display;
use crate::error::{ReaderError, Result};

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Text,
    Json,
}

fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

/// Print the conversation list, optionally filtered by name.
pub async fn list<W: Write>(
    directory: &dyn Directory,
    search: Option<&str>,
    now: DateTime<Utc>,
    format: Format,
    out: &mut W,
) -> Result<()> {
    let conversations = match search {
        Some(query) => directory.search_conversations(query).await?,
        None => directory.list_conversations().await?,
    };
    debug!(count = conversations.len(), "Listing conversations");

    match format {
        Format::Json => write_json(out, &conversations)?,
        Format::Text if conversations.is_empty() => writeln!(out, "No conversations found")?,
        Format::Text => {
            for conversation in &conversations {
                writeln!(out, "{}", display::conversation_line(conversation, now))?;
            }
        }
    }
    Ok(())
}

/// Open a conversation: mark it active and print its thread grouped by date.
pub async fn show<W: Write>(
    directory: &dyn Directory,
    name: &str,
    now: DateTime<Utc>,
    format: Format,
    out: &mut W,
) -> Result<()> {
    let conversation = directory
        .conversation_by_user_name(name)
        .await?
        .ok_or_else(|| ReaderError::UnknownUser(name.to_string()))?;

    directory.set_active(&conversation.id).await?;
    let messages = directory.messages_for_user(name).await?;
    let groups = group_by_date(&messages, now);

    match format {
        Format::Json => write_json(out, &groups)?,
        Format::Text => {
            writeln!(out, "{} ({})", conversation.user.name, conversation.user.phone_number)?;
            if groups.is_empty() {
                writeln!(out, "No messages yet")?;
            }
            for line in display::render_thread(&groups) {
                writeln!(out, "{}", line)?;
            }
        }
    }
    Ok(())
}

/// Send a message to the conversation with `name` and print it.
pub async fn send<W: Write>(
    directory: &dyn Directory,
    name: &str,
    text: &str,
    format: Format,
    out: &mut W,
) -> Result<()> {
    let conversation = directory
        .conversation_by_user_name(name)
        .await?
        .ok_or_else(|| ReaderError::UnknownUser(name.to_string()))?;

    let message = directory.send_message(&conversation.id, text).await?;

    match format {
        Format::Json => write_json(out, &message)?,
        Format::Text => writeln!(out, "{}", display::message_line(&message))?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use chat_core::{Conversation, FixedClock, Message, User};
    use chrono::TimeZone;
    use mock_directory::{GeneratorConfig, MockDirectory};
    use pretty_assertions::assert_eq;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 6, 16, 12, 0, 0).unwrap()
    }

    fn small_directory() -> MockDirectory {
        let sarah = User::new("1", "Sarah Johnson", "+11234567890");
        let david = User::new("2", "David Chen", "+10987654321");
        let yesterday = Utc.with_ymd_and_hms(2023, 6, 15, 18, 0, 0).unwrap();
        MockDirectory::with_clock(
            vec![
                Conversation::new(
                    "1",
                    sarah.clone(),
                    vec![Message::incoming("m1", &sarah, chat_core::MessageKind::Text, yesterday)
                        .with_text("Can we meet tomorrow for coffee?")],
                )
                .with_unread_count(1),
                Conversation::new("2", david, Vec::new()),
            ],
            Arc::new(FixedClock::new(now())),
        )
    }

    fn run_output(bytes: Vec<u8>) -> String {
        String::from_utf8(bytes).unwrap()
    }

    #[tokio::test]
    async fn test_list_text() {
        let directory = small_directory();
        let mut out = Vec::new();
        list(&directory, None, now(), Format::Text, &mut out).await.unwrap();

        assert_eq!(
            run_output(out),
            concat!(
                "   Sarah Johnson (1)  [Jun 15] Can we meet tomorrow for coffee?\n",
                "   David Chen  (no messages)\n",
            )
        );
    }

    #[tokio::test]
    async fn test_list_search_without_hits() {
        let directory = small_directory();
        let mut out = Vec::new();
        list(&directory, Some("zz"), now(), Format::Text, &mut out).await.unwrap();
        assert_eq!(run_output(out), "No conversations found\n");
    }

    #[tokio::test]
    async fn test_list_json() {
        let directory = MockDirectory::generated(GeneratorConfig::seeded(1));
        let mut out = Vec::new();
        list(&directory, Some("emma"), now(), Format::Json, &mut out).await.unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        let conversations = value.as_array().unwrap();
        assert_eq!(conversations.len(), 1);
        assert_eq!(conversations[0]["user"]["name"], "Emma Wilson");
    }

    #[tokio::test]
    async fn test_show_activates_and_groups() {
        let directory = small_directory();
        let mut out = Vec::new();
        show(&directory, "Sarah Johnson", now(), Format::Text, &mut out)
            .await
            .unwrap();

        assert_eq!(
            run_output(out),
            concat!(
                "Sarah Johnson (+11234567890)\n",
                "── Yesterday ──\n",
                "   6:00 PM  Sarah Johnson: Can we meet tomorrow for coffee?\n",
            )
        );

        let conversations = directory.list_conversations().await.unwrap();
        assert!(conversations[0].is_active);
        assert_eq!(conversations[0].unread_count, 0);
    }

    #[tokio::test]
    async fn test_show_empty_conversation() {
        let directory = small_directory();
        let mut out = Vec::new();
        show(&directory, "David Chen", now(), Format::Text, &mut out)
            .await
            .unwrap();
        assert_eq!(run_output(out), "David Chen (+10987654321)\nNo messages yet\n");
    }

    #[tokio::test]
    async fn test_show_unknown_user() {
        let directory = small_directory();
        let mut out = Vec::new();
        let err = show(&directory, "Nobody", now(), Format::Text, &mut out)
            .await
            .unwrap_err();
        assert!(matches!(err, ReaderError::UnknownUser(name) if name == "Nobody"));
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_send_prints_message() {
        let directory = small_directory();
        let mut out = Vec::new();
        send(&directory, "David Chen", "Hello David", Format::Text, &mut out)
            .await
            .unwrap();
        assert_eq!(run_output(out), "  12:00 PM  You: Hello David\n");

        let messages = directory.messages_for_user("David Chen").await.unwrap();
        assert_eq!(messages.len(), 1);
    }

    #[tokio::test]
    async fn test_send_json() {
        let directory = small_directory();
        let mut out = Vec::new();
        send(&directory, "Sarah Johnson", "ok", Format::Json, &mut out)
            .await
            .unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["fromMe"], true);
        assert_eq!(value["messageType"], "text");
        assert_eq!(value["textData"], "ok");
        assert_eq!(value["timestamp"], "2023-06-16T12:00:00.000Z");
    }

    #[tokio::test]
    async fn test_send_blank_is_rejected() {
        let directory = small_directory();
        let mut out = Vec::new();
        let err = send(&directory, "Sarah Johnson", " ", Format::Text, &mut out)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ReaderError::Directory(chat_core::DirectoryError::EmptyMessage)
        ));
    }
}
