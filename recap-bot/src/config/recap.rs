//! Report, delivery and daily-recap settings. Loaded from env.

use anyhow::{Context, Result};
use channel_history::MAX_COUNT_LIMIT;
use chrono::NaiveTime;
use std::env;
use std::str::FromStr;

use crate::recap::RecapSettings;
use crate::report::{ReportOptions, DEFAULT_MAX_CHUNK_LEN};

/// Telegram rejects longer messages.
const TELEGRAM_MESSAGE_LIMIT: usize = 4096;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecapConfig {
    /// REPORT_MAX_ITEMS
    pub report_max_items: usize,
    /// REPORT_MAX_TEXT_LEN
    pub report_max_text_len: usize,
    /// CHUNK_MAX_LEN
    pub chunk_max_len: usize,
    /// GET_DEFAULT_LIMIT
    pub get_default_limit: usize,
    /// DAILY_RECAP_TIME (HH:MM, UTC); unset disables the daily job.
    pub daily_recap_time: Option<NaiveTime>,
}

fn env_parse<T: FromStr>(key: &str, default: T) -> Result<T> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid {}: {}", key, raw)),
        Err(_) => Ok(default),
    }
}

impl RecapConfig {
    pub fn from_env() -> Result<Self> {
        let daily_recap_time = match env::var("DAILY_RECAP_TIME") {
            Ok(raw) if !raw.trim().is_empty() => Some(
                NaiveTime::parse_from_str(raw.trim(), "%H:%M")
                    .with_context(|| format!("Invalid DAILY_RECAP_TIME (expected HH:MM): {}", raw))?,
            ),
            _ => None,
        };
        Ok(Self {
            report_max_items: env_parse("REPORT_MAX_ITEMS", 20)?,
            report_max_text_len: env_parse("REPORT_MAX_TEXT_LEN", 100)?,
            chunk_max_len: env_parse("CHUNK_MAX_LEN", DEFAULT_MAX_CHUNK_LEN)?,
            get_default_limit: env_parse("GET_DEFAULT_LIMIT", 10)?,
            daily_recap_time,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.report_max_items == 0 {
            anyhow::bail!("REPORT_MAX_ITEMS must be at least 1");
        }
        if self.chunk_max_len == 0 || self.chunk_max_len > TELEGRAM_MESSAGE_LIMIT {
            anyhow::bail!(
                "CHUNK_MAX_LEN must be between 1 and {}, got {}",
                TELEGRAM_MESSAGE_LIMIT,
                self.chunk_max_len
            );
        }
        if !(1..=MAX_COUNT_LIMIT).contains(&self.get_default_limit) {
            anyhow::bail!(
                "GET_DEFAULT_LIMIT must be between 1 and {}, got {}",
                MAX_COUNT_LIMIT,
                self.get_default_limit
            );
        }
        Ok(())
    }

    pub fn settings(&self) -> RecapSettings {
        RecapSettings {
            report: ReportOptions {
                max_items: self.report_max_items,
                max_text_len: self.report_max_text_len,
                include_dates: true,
            },
            max_chunk_len: self.chunk_max_len,
            get_default_limit: self.get_default_limit,
        }
    }
}
