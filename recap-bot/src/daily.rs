//! Once-a-day recap sent to every user with a stored channel.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info, instrument};

use crate::core::{Bot, Chat};
use crate::delivery::deliver;
use crate::recap::{RecapService, RecapStyle};

pub struct DailyRecapJob {
    bot: Arc<dyn Bot>,
    service: Arc<RecapService>,
    /// Time of day (UTC).
    at: NaiveTime,
}

impl DailyRecapJob {
    pub fn new(bot: Arc<dyn Bot>, service: Arc<RecapService>, at: NaiveTime) -> Self {
        Self { bot, service, at }
    }

    /// First scheduled instant strictly after `now`.
    pub fn next_run_after(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let today = Utc.from_utc_datetime(&now.date_naive().and_time(self.at));
        if today > now {
            today
        } else {
            today + Duration::days(1)
        }
    }

    /// Sends the recap for `date` to each user with a channel. Returns how many users were reached.
    #[instrument(skip(self))]
    pub async fn run_once(&self, date: NaiveDate) -> usize {
        let entries = match self.service.preferences().entries().await {
            Ok(entries) => entries,
            Err(e) => {
                error!(error = %e, "Failed to read preferences for daily recap");
                return 0;
            }
        };

        let mut delivered = 0;
        for (user_id, pref) in entries {
            let Some(channel) = pref.channel else {
                continue;
            };
            let text = self
                .service
                .recap_for(&channel, pref.topic.as_deref(), date, RecapStyle::Daily)
                .await;
            let chat = Chat::private(user_id);
            match deliver(
                self.bot.as_ref(),
                &chat,
                &text,
                self.service.settings().max_chunk_len,
            )
            .await
            {
                Ok(_) => delivered += 1,
                Err(e) => error!(user_id, channel = %channel, error = %e, "Failed to send daily recap"),
            }
        }
        info!(delivered, "step: daily recap finished");
        delivered
    }

    /// Sleeps until each scheduled time and runs the recap, forever.
    pub async fn run(self) {
        loop {
            let now = Utc::now();
            let next = self.next_run_after(now);
            info!(next_run = %next, "Daily recap scheduled");
            tokio::time::sleep((next - now).to_std().unwrap_or_default()).await;
            self.run_once(next.date_naive()).await;
        }
    }

    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }
}

