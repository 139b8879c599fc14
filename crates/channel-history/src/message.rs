//! Channel message types and fetch requests.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Largest `limit` accepted for count-mode requests (also the upstream page ceiling).
pub const MAX_COUNT_LIMIT: usize = 100;

/// One retrieved channel message. Only text-bearing messages are represented.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelMessage {
    /// Platform id; monotonic per channel and used as the pagination cursor.
    pub id: i64,
    pub date: DateTime<Utc>,
    pub text: String,
}

/// One item as returned by the upstream history call. `text` may be absent (media, service messages).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryItem {
    pub id: i64,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub text: Option<String>,
}

impl HistoryItem {
    /// Converts into a [`ChannelMessage`]; `None` when the text is absent or empty.
    pub fn into_message(self) -> Option<ChannelMessage> {
        match self.text {
            Some(text) if !text.is_empty() => Some(ChannelMessage {
                id: self.id,
                date: self.date,
                text,
            }),
            _ => None,
        }
    }
}

/// Resolved channel, as returned by `resolve_entity`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelHandle {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub title: Option<String>,
}

/// Parameters of one `get_history` page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryQuery {
    /// Max items in the page.
    pub limit: usize,
    /// Return only items with id lower than this; 0 means "start from the newest".
    pub offset_id: i64,
    /// Return only items dated strictly before this instant.
    pub before_date: Option<DateTime<Utc>>,
}

/// Inclusive UTC window derived from calendar dates: `from` 00:00:00 through `to` 23:59:59.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateWindow {
    /// `None` when the day after `to` cannot be represented.
    pub fn from_dates(from: NaiveDate, to: NaiveDate) -> Option<Self> {
        let start = Utc.from_utc_datetime(&from.and_time(NaiveTime::default()));
        let end = Utc
            .from_utc_datetime(&to.and_time(NaiveTime::default()))
            .checked_add_signed(Duration::days(1))?
            .checked_sub_signed(Duration::seconds(1))?;
        Some(Self { start, end })
    }

    pub fn contains(&self, date: &DateTime<Utc>) -> bool {
        *date >= self.start && *date <= self.end
    }

    /// Exclusive upper bound for the upstream `before_date` filter.
    pub fn upper_bound(&self) -> Option<DateTime<Utc>> {
        self.end.checked_add_signed(Duration::seconds(1))
    }
}

/// What to fetch from a channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchRequest {
    /// The newest `limit` text-bearing messages.
    Count { channel: String, limit: usize },
    /// Text-bearing messages dated within `[from, to]` (whole days, UTC).
    DateRange {
        channel: String,
        from: NaiveDate,
        to: NaiveDate,
    },
}

impl FetchRequest {
    pub fn count(channel: impl Into<String>, limit: usize) -> Self {
        FetchRequest::Count {
            channel: channel.into(),
            limit,
        }
    }

    pub fn date_range(channel: impl Into<String>, from: NaiveDate, to: NaiveDate) -> Self {
        FetchRequest::DateRange {
            channel: channel.into(),
            from,
            to,
        }
    }

    pub fn channel(&self) -> &str {
        match self {
            FetchRequest::Count { channel, .. } | FetchRequest::DateRange { channel, .. } => {
                channel
            }
        }
    }

    /// Short label for logs: `count` or `date`.
    pub fn mode(&self) -> &'static str {
        match self {
            FetchRequest::Count { .. } => "count",
            FetchRequest::DateRange { .. } => "date",
        }
    }
}

/// Strips surrounding whitespace and a leading `@` from a channel username.
pub fn normalize_channel(channel: &str) -> &str {
    let trimmed = channel.trim();
    trimmed.strip_prefix('@').unwrap_or(trimmed)
}
