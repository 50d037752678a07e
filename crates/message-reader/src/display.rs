//! Plain-text rendering of conversations and messages.

use chat_core::{Conversation, DateGroup, Message, MessageKind};
use chrono::{DateTime, Utc};

/// Format seconds as `MM:SS`. Missing or zero durations render as `00:00`.
pub fn format_duration(seconds: Option<u32>) -> String {
    let seconds = seconds.unwrap_or(0);
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Time of day for today's messages, short date otherwise.
pub fn format_list_time(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    if timestamp.date_naive() == now.date_naive() {
        format_clock_time(timestamp)
    } else {
        timestamp.format("%b %-d").to_string()
    }
}

/// 12-hour clock time, e.g. `2:30 PM`.
pub fn format_clock_time(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%-I:%M %p").to_string()
}

/// One-line description of a message body.
pub fn message_summary(message: &Message) -> String {
    let caption = message.text();
    match &message.kind {
        MessageKind::Text => caption.unwrap_or_default().to_string(),
        MessageKind::Image { .. } => with_caption("[Image]", caption),
        MessageKind::Video { media_duration, .. } => {
            with_caption(&format!("[Video {}]", format_duration(*media_duration)), caption)
        }
        MessageKind::Audio { media_duration, .. } => {
            format!("[Audio {}]", format_duration(*media_duration))
        }
        MessageKind::Document {
            mime_type,
            page_count,
            ..
        } => {
            let subtype = mime_type
                .as_deref()
                .and_then(|mime| mime.split('/').nth(1))
                .map(str::to_uppercase)
                .unwrap_or_else(|| "PDF".to_string());
            let pages = page_count
                .map(|count| format!(" · {} pages", count))
                .unwrap_or_default();
            format!("{} ({}{})", caption.unwrap_or("Document"), subtype, pages)
        }
        MessageKind::Contact
        | MessageKind::Location
        | MessageKind::Gif { .. }
        | MessageKind::Sticker { .. }
        | MessageKind::Unknown => caption
            .map(str::to_string)
            .unwrap_or_else(|| format!("[{} message]", message.message_type())),
    }
}

fn with_caption(label: &str, caption: Option<&str>) -> String {
    match caption {
        Some(caption) => format!("{} {}", label, caption),
        None => label.to_string(),
    }
}

/// One line of the conversation list.
pub fn conversation_line(conversation: &Conversation, now: DateTime<Utc>) -> String {
    let presence = if conversation.user.is_online() { "●" } else { " " };
    let unread = if conversation.unread_count > 0 {
        format!(" ({})", conversation.unread_count)
    } else {
        String::new()
    };
    let active = if conversation.is_active { ">" } else { " " };

    match conversation.last_message() {
        Some(last) => format!(
            "{}{} {}{}  [{}] {}",
            active,
            presence,
            conversation.user.name,
            unread,
            format_list_time(last.timestamp, now),
            preview(last),
        ),
        None => format!(
            "{}{} {}{}  (no messages)",
            active, presence, conversation.user.name, unread
        ),
    }
}

fn preview(message: &Message) -> String {
    let summary = message_summary(message);
    if message.from_me {
        format!("You: {}", summary)
    } else {
        summary
    }
}

/// One line of a message thread.
pub fn message_line(message: &Message) -> String {
    let mut line = format!(
        "  {:>8}  {}: {}",
        format_clock_time(message.timestamp),
        message.username,
        message_summary(message)
    );
    if message.starred {
        line.push_str(" ★");
    }
    if let Some(reaction) = &message.reaction {
        line.push(' ');
        line.push_str(reaction);
    }
    line
}

/// Render grouped messages under their date headings.
pub fn render_thread(groups: &[DateGroup]) -> Vec<String> {
    let mut lines = Vec::new();
    for group in groups {
        lines.push(format!("── {} ──", group.label));
        lines.extend(group.messages.iter().map(message_line));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use chat_core::{parse_timestamp, User};
    use pretty_assertions::assert_eq;

    fn ts(raw: &str) -> DateTime<Utc> {
        parse_timestamp(raw).unwrap()
    }

    fn user() -> User {
        User::new("1", "Sarah Johnson", "+11234567890")
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(None), "00:00");
        assert_eq!(format_duration(Some(0)), "00:00");
        assert_eq!(format_duration(Some(75)), "01:15");
        assert_eq!(format_duration(Some(329)), "05:29");
    }

    #[test]
    fn test_format_list_time() {
        let now = ts("2023-06-15T23:00:00Z");
        assert_eq!(format_list_time(ts("2023-06-15T14:30:00Z"), now), "2:30 PM");
        assert_eq!(format_list_time(ts("2023-06-15T09:05:00Z"), now), "9:05 AM");
        assert_eq!(format_list_time(ts("2023-06-14T14:30:00Z"), now), "Jun 14");
    }

    #[test]
    fn test_document_summary() {
        let message = Message::incoming(
            "m",
            &user(),
            MessageKind::Document {
                file_path: None,
                mime_type: Some("application/pdf".into()),
                page_count: Some(3),
            },
            ts("2023-06-15T10:00:00Z"),
        );
        assert_eq!(message_summary(&message), "Document (PDF · 3 pages)");

        let message = message.with_text("Important documents");
        assert_eq!(message_summary(&message), "Important documents (PDF · 3 pages)");
    }

    #[test]
    fn test_media_summaries() {
        let at = ts("2023-06-15T10:00:00Z");
        let video = Message::incoming(
            "v",
            &user(),
            MessageKind::Video {
                file_path: None,
                mime_type: None,
                media_duration: Some(90),
            },
            at,
        );
        assert_eq!(message_summary(&video), "[Video 01:30]");

        let image = Message::incoming(
            "i",
            &user(),
            MessageKind::Image {
                file_path: None,
                mime_type: None,
            },
            at,
        )
        .with_text("Check out this photo!");
        assert_eq!(message_summary(&image), "[Image] Check out this photo!");

        let location = Message::incoming("l", &user(), MessageKind::Location, at);
        assert_eq!(message_summary(&location), "[location message]");
    }

    #[test]
    fn test_conversation_line() {
        let now = ts("2023-06-15T23:00:00Z");
        let mut conversation = Conversation::new(
            "1",
            user(),
            vec![Message::outgoing_text(
                "m",
                "+11234567890",
                "On my way",
                ts("2023-06-15T14:30:00Z"),
            )],
        )
        .with_unread_count(2);

        assert_eq!(
            conversation_line(&conversation, now),
            "   Sarah Johnson (2)  [2:30 PM] You: On my way"
        );

        conversation.activate();
        assert_eq!(
            conversation_line(&conversation, now),
            ">  Sarah Johnson  [2:30 PM] You: On my way"
        );
    }

    #[test]
    fn test_empty_conversation_line() {
        let conversation = Conversation::new("1", user(), Vec::new());
        assert_eq!(
            conversation_line(&conversation, ts("2023-06-15T23:00:00Z")),
            "   Sarah Johnson  (no messages)"
        );
    }

    #[test]
    fn test_message_line_marks() {
        let message = Message::incoming(
            "m",
            &user(),
            MessageKind::Text,
            ts("2023-06-15T14:30:00Z"),
        )
        .with_text("Hi")
        .starred()
        .with_reaction("👍");
        assert_eq!(message_line(&message), "   2:30 PM  Sarah Johnson: Hi ★ 👍");
    }
}
