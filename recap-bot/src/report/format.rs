//! Renders fetched messages as a numbered plain-text report.

use channel_history::ChannelMessage;

/// Sentinel for an empty message list.
pub const NO_MESSAGES_FOUND: &str = "No messages found.";

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";
const ELLIPSIS: &str = "...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    /// At most this many messages are listed.
    pub max_items: usize,
    /// Message text longer than this many characters is cut and suffixed with `...`.
    pub max_text_len: usize,
    pub include_dates: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            max_items: 20,
            max_text_len: 100,
            include_dates: true,
        }
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}{}", &text[..cut], ELLIPSIS),
        None => text.to_string(),
    }
}

/// One line per message: `N. [YYYY-MM-DD HH:MM] text`, then a line with the omitted count if
/// the list was capped. Never returns an empty string.
pub fn format_messages(messages: &[ChannelMessage], options: &ReportOptions) -> String {
    if messages.is_empty() {
        return NO_MESSAGES_FOUND.to_string();
    }

    let mut lines: Vec<String> = messages
        .iter()
        .take(options.max_items)
        .enumerate()
        .map(|(i, m)| {
            let text = truncate_chars(&m.text, options.max_text_len);
            if options.include_dates {
                format!("{}. [{}] {}", i + 1, m.date.format(DATE_FORMAT), text)
            } else {
                format!("{}. {}", i + 1, text)
            }
        })
        .collect();

    let omitted = messages.len().saturating_sub(options.max_items);
    if omitted > 0 {
        lines.push(format!("... and {} more message(s) not shown.", omitted));
    }
    lines.join("\n")
}
