//! Topic filter over fetched messages.

use crate::ChannelMessage;

/// Keeps messages whose text contains `topic`, compared case-insensitively. Order is preserved.
/// An absent or empty topic returns every message.
pub fn filter_by_topic(messages: &[ChannelMessage], topic: Option<&str>) -> Vec<ChannelMessage> {
    let needle = match topic {
        Some(t) if !t.is_empty() => t.to_lowercase(),
        _ => return messages.to_vec(),
    };
    messages
        .iter()
        .filter(|m| m.text.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn msg(id: i64, text: &str) -> ChannelMessage {
        ChannelMessage {
            id,
            date: Utc::now(),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_filter_is_case_insensitive_and_keeps_order() {
        let messages = vec![
            msg(5, "New RUST release"),
            msg(4, "Weather today"),
            msg(3, "rustaceans meetup"),
            msg(2, "Trust the process"),
        ];
        let out = filter_by_topic(&messages, Some("Rust"));
        let ids: Vec<i64> = out.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![5, 3, 2]);
    }

    #[test]
    fn test_filter_without_topic_returns_input() {
        let messages = vec![msg(2, "b"), msg(1, "a")];
        assert_eq!(filter_by_topic(&messages, None), messages);
        assert_eq!(filter_by_topic(&messages, Some("")), messages);
    }

    #[test]
    fn test_filter_no_match_is_empty() {
        let messages = vec![msg(1, "alpha")];
        assert!(filter_by_topic(&messages, Some("beta")).is_empty());
    }

    #[test]
    fn test_filter_non_ascii_topic() {
        let messages = vec![msg(1, "Обновление ПРОЕКТА"), msg(2, "other")];
        let out = filter_by_topic(&messages, Some("проекта"));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, 1);
    }
}
