//! Grouping a message thread under date headings.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;

use crate::message::Message;

/// Label for messages sent on the current day.
pub const TODAY: &str = "Today";

/// Label for messages sent on the previous day.
pub const YESTERDAY: &str = "Yesterday";

/// Messages that share a date label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateGroup {
    /// "Today", "Yesterday" or a long date such as "June 15, 2023".
    pub label: String,
    /// Messages in their original relative order.
    pub messages: Vec<Message>,
}

/// Label a timestamp relative to `now`. Calendar days are compared in UTC.
pub fn date_label(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let day = timestamp.date_naive();
    let today = now.date_naive();

    if day == today {
        TODAY.to_string()
    } else if today.pred_opt() == Some(day) {
        YESTERDAY.to_string()
    } else {
        day.format("%B %-d, %Y").to_string()
    }
}

/// Group messages by date label.
///
/// Groups appear in the order their label is first seen while walking
/// `messages`. A message whose label already has a group joins that group,
/// even if other labels were seen in between.
pub fn group_by_date(messages: &[Message], now: DateTime<Utc>) -> Vec<DateGroup> {
    let mut groups: IndexMap<String, Vec<Message>> = IndexMap::new();

    for message in messages {
        groups
            .entry(date_label(message.timestamp, now))
            .or_default()
            .push(message.clone());
    }

    groups
        .into_iter()
        .map(|(label, messages)| DateGroup { label, messages })
        .collect()
}

/// Concatenate groups back into a single sequence.
pub fn flatten(groups: &[DateGroup]) -> Vec<Message> {
    groups
        .iter()
        .flat_map(|group| group.messages.iter().cloned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timestamp::parse_timestamp;

    fn ts(raw: &str) -> DateTime<Utc> {
        parse_timestamp(raw).unwrap()
    }

    fn msg(id: &str, raw: &str) -> Message {
        Message::outgoing_text(id, "+11234567890", id, ts(raw))
    }

    fn labels(groups: &[DateGroup]) -> Vec<&str> {
        groups.iter().map(|g| g.label.as_str()).collect()
    }

    #[test]
    fn test_today_label() {
        let label = date_label(ts("2023-06-15T10:00:00Z"), ts("2023-06-15T23:00:00Z"));
        assert_eq!(label, TODAY);
    }

    #[test]
    fn test_yesterday_label() {
        let label = date_label(ts("2023-06-15T10:00:00Z"), ts("2023-06-16T01:00:00Z"));
        assert_eq!(label, YESTERDAY);
    }

    #[test]
    fn test_long_date_label() {
        let label = date_label(ts("2023-06-13T10:00:00Z"), ts("2023-06-16T01:00:00Z"));
        assert_eq!(label, "June 13, 2023");

        let label = date_label(ts("2023-01-05T10:00:00Z"), ts("2023-06-16T01:00:00Z"));
        assert_eq!(label, "January 5, 2023");
    }

    #[test]
    fn test_yesterday_across_year_boundary() {
        let label = date_label(ts("2022-12-31T23:30:00Z"), ts("2023-01-01T00:10:00Z"));
        assert_eq!(label, YESTERDAY);
    }

    #[test]
    fn test_future_message_gets_date_label() {
        let label = date_label(ts("2023-06-17T10:00:00Z"), ts("2023-06-16T01:00:00Z"));
        assert_eq!(label, "June 17, 2023");
    }

    #[test]
    fn test_zoneless_timestamp_is_utc() {
        // 23:30 with no zone must not drift into the next day.
        let label = date_label(ts("2023-06-15 23:30:00"), ts("2023-06-15T23:45:00Z"));
        assert_eq!(label, TODAY);
    }

    #[test]
    fn test_group_preserves_first_seen_order() {
        let now = ts("2023-06-16T12:00:00Z");
        let messages = vec![
            msg("a", "2023-06-14T09:00:00Z"),
            msg("b", "2023-06-15T09:00:00Z"),
            msg("c", "2023-06-15T18:00:00Z"),
            msg("d", "2023-06-16T08:00:00Z"),
        ];

        let groups = group_by_date(&messages, now);
        assert_eq!(labels(&groups), vec!["June 14, 2023", YESTERDAY, TODAY]);
        assert_eq!(groups[1].messages.len(), 2);
        assert_eq!(groups[1].messages[0].id, "b");
        assert_eq!(groups[1].messages[1].id, "c");
    }

    #[test]
    fn test_out_of_order_message_joins_existing_group() {
        let now = ts("2023-06-16T12:00:00Z");
        let messages = vec![
            msg("a", "2023-06-15T09:00:00Z"),
            msg("b", "2023-06-16T09:00:00Z"),
            msg("c", "2023-06-15T10:00:00Z"),
        ];

        let groups = group_by_date(&messages, now);
        assert_eq!(labels(&groups), vec![YESTERDAY, TODAY]);
        let ids: Vec<&str> = groups[0].messages.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(group_by_date(&[], ts("2023-06-16T12:00:00Z")).is_empty());
    }

    #[test]
    fn test_regrouping_flattened_groups_is_stable() {
        let now = ts("2023-06-16T12:00:00Z");
        let messages = vec![
            msg("a", "2023-06-15T09:00:00Z"),
            msg("b", "2023-06-16T09:00:00Z"),
            msg("c", "2023-06-15T10:00:00Z"),
            msg("d", "2023-06-10T10:00:00Z"),
            msg("e", "2023-06-16T11:00:00Z"),
        ];

        let grouped = group_by_date(&messages, now);
        let regrouped = group_by_date(&flatten(&grouped), now);
        assert_eq!(grouped, regrouped);
        assert_eq!(flatten(&grouped).len(), messages.len());
    }
}
