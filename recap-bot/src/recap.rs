//! Command execution: fetch → filter → format, or fetch → generate.
//!
//! [`RecapService`] returns the reply text; delivery is the caller's job (handler or daily job).

use channel_history::{filter_by_topic, FetchRequest, HistoryFetcher};
use chrono::{NaiveDate, Utc};
use rag::RagPipeline;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::commands::Command;
use crate::core::HandlerError;
use crate::preferences::PreferenceStore;
use crate::report::{format_messages, ReportOptions, DEFAULT_MAX_CHUNK_LEN};

pub const START_TEXT: &str = "Hello! I'm a Telegram recap bot. I can summarize messages from public channels.\n\n\
To get started, use /setchannel to tell me which channel to follow.\n\
Example: /setchannel @channelname\n\n\
Then use /settopic to keep only the messages you care about.\n\
Example: /settopic technology\n\n\
Send /help for all commands.";

pub const HELP_TEXT: &str = "Commands:\n\
/setchannel @channel - follow a public channel\n\
/settopic TEXT - only show messages containing TEXT\n\
/get [N] - newest N messages of your channel (default 10)\n\
/recap - today's messages of your channel\n\
/fetch @channel count N - newest N messages of any channel\n\
/fetch @channel date FROM TO - messages between two dates (YYYY-MM-DD)\n\
/rag @channel count N QUESTION - answer a question from the newest N messages\n\
/rag @channel date FROM TO QUESTION - answer a question from messages in a date range";

pub const CHANNEL_REQUIRED: &str = "Please set a channel first using /setchannel @channelname";

/// Wording of a recap: a `/recap` reply, or the scheduled message that must name its channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecapStyle {
    OnDemand,
    Daily,
}

impl RecapStyle {
    fn header(self, channel: &str) -> String {
        match self {
            RecapStyle::OnDemand => format!("Today's recap for {}:", channel),
            RecapStyle::Daily => format!("Daily recap for {}:", channel),
        }
    }

    fn nothing_found(self, channel: &str) -> String {
        match self {
            RecapStyle::OnDemand => "No messages found for today.".to_string(),
            RecapStyle::Daily => format!("No messages found today in {}.", channel),
        }
    }

    fn nothing_on_topic(self, channel: &str, topic: &str) -> String {
        match self {
            RecapStyle::OnDemand => format!("No messages related to '{}' were found today.", topic),
            RecapStyle::Daily => format!(
                "No messages related to '{}' were found today in {}.",
                topic, channel
            ),
        }
    }
}

/// Rendering and delivery limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecapSettings {
    pub report: ReportOptions,
    pub max_chunk_len: usize,
    /// Count used by `/get` without an argument.
    pub get_default_limit: usize,
}

impl Default for RecapSettings {
    fn default() -> Self {
        Self {
            report: ReportOptions::default(),
            max_chunk_len: DEFAULT_MAX_CHUNK_LEN,
            get_default_limit: 10,
        }
    }
}

pub struct RecapService {
    fetcher: HistoryFetcher,
    rag: Arc<RagPipeline>,
    preferences: Arc<dyn PreferenceStore>,
    settings: RecapSettings,
}

fn state_error(e: anyhow::Error) -> HandlerError {
    HandlerError::State(format!("{:#}", e))
}

impl RecapService {
    pub fn new(
        fetcher: HistoryFetcher,
        rag: Arc<RagPipeline>,
        preferences: Arc<dyn PreferenceStore>,
        settings: RecapSettings,
    ) -> Self {
        Self {
            fetcher,
            rag,
            preferences,
            settings,
        }
    }

    pub fn settings(&self) -> &RecapSettings {
        &self.settings
    }

    pub fn preferences(&self) -> &Arc<dyn PreferenceStore> {
        &self.preferences
    }

    /// Runs `command` for `user_id` and returns the reply text.
    #[instrument(skip(self, command))]
    pub async fn execute(&self, user_id: i64, command: Command) -> Result<String, HandlerError> {
        match command {
            Command::Start => Ok(START_TEXT.to_string()),
            Command::Help => Ok(HELP_TEXT.to_string()),
            Command::SetChannel { channel } => self.set_channel(user_id, channel).await,
            Command::SetTopic { topic } => {
                self.preferences
                    .set_topic(user_id, topic.clone())
                    .await
                    .map_err(state_error)?;
                info!(user_id, topic = %topic, "step: topic set");
                Ok(format!("I'll filter messages related to '{}'.", topic))
            }
            Command::Fetch(request) => Ok(self.fetch_report(&request).await),
            Command::Get { limit } => self.get_report(user_id, limit).await,
            Command::Recap => self.recap_report(user_id, Utc::now().date_naive()).await,
            Command::Rag { request, query } => Ok(self.rag_answer(&request, &query).await),
        }
    }

    /// Stores the channel only if it resolves.
    async fn set_channel(&self, user_id: i64, channel: String) -> Result<String, HandlerError> {
        match self.fetcher.resolve(&channel).await {
            Ok(handle) => {
                let channel = format!("@{}", handle.username);
                self.preferences
                    .set_channel(user_id, channel.clone())
                    .await
                    .map_err(state_error)?;
                info!(user_id, channel = %channel, channel_id = handle.id, "step: channel set");
                Ok(format!("I'll now monitor {} for messages.", channel))
            }
            Err(e) => {
                warn!(user_id, channel = %channel, kind = e.kind(), error = %e, "Channel lookup failed");
                Ok(format!(
                    "I couldn't find {}. Please make sure it's a public channel and the username is correct.",
                    channel
                ))
            }
        }
    }

    /// The user's stored channel and topic; `None` until a channel is set.
    async fn stored_selection(
        &self,
        user_id: i64,
    ) -> Result<Option<(String, Option<String>)>, HandlerError> {
        let pref = self.preferences.get(user_id).await.map_err(state_error)?;
        Ok(pref.and_then(|p| p.channel.map(|channel| (channel, p.topic))))
    }

    /// Formatted report for an explicit request, without topic filtering.
    pub async fn fetch_report(&self, request: &FetchRequest) -> String {
        let messages = self.fetcher.fetch(request).await;
        format_messages(&messages, &self.settings.report)
    }

    /// Newest messages of the user's channel, filtered by the user's topic.
    pub async fn get_report(
        &self,
        user_id: i64,
        limit: Option<usize>,
    ) -> Result<String, HandlerError> {
        let Some((channel, topic)) = self.stored_selection(user_id).await? else {
            return Ok(CHANNEL_REQUIRED.to_string());
        };
        let request =
            FetchRequest::count(channel, limit.unwrap_or(self.settings.get_default_limit));
        let messages = self.fetcher.fetch(&request).await;
        let filtered = filter_by_topic(&messages, topic.as_deref());
        Ok(format_messages(&filtered, &self.settings.report))
    }

    /// `/recap` for the user's stored preference on `date`.
    pub async fn recap_report(&self, user_id: i64, date: NaiveDate) -> Result<String, HandlerError> {
        match self.stored_selection(user_id).await? {
            Some((channel, topic)) => Ok(self
                .recap_for(&channel, topic.as_deref(), date, RecapStyle::OnDemand)
                .await),
            None => Ok(CHANNEL_REQUIRED.to_string()),
        }
    }

    /// Messages of `channel` posted on `date`, filtered by `topic`, worded per `style`.
    #[instrument(skip(self))]
    pub async fn recap_for(
        &self,
        channel: &str,
        topic: Option<&str>,
        date: NaiveDate,
        style: RecapStyle,
    ) -> String {
        let messages = self
            .fetcher
            .fetch(&FetchRequest::date_range(channel, date, date))
            .await;
        if messages.is_empty() {
            return style.nothing_found(channel);
        }
        let filtered = filter_by_topic(&messages, topic);
        match topic.filter(|t| !t.is_empty()) {
            Some(topic) if filtered.is_empty() => style.nothing_on_topic(channel, topic),
            _ => format!(
                "{}\n\n{}",
                style.header(channel),
                format_messages(&filtered, &self.settings.report)
            ),
        }
    }

    /// Answers `query` from the texts of the requested messages. Generation failures become the reply.
    #[instrument(skip(self, query))]
    pub async fn rag_answer(&self, request: &FetchRequest, query: &str) -> String {
        let documents = self.fetcher.fetch_documents(request).await;
        info!(documents = documents.len(), "step: rag documents fetched");
        match self.rag.generate(documents, query).await {
            Ok(answer) => answer,
            Err(e) => {
                warn!(error = %e, "Generation failed");
                format!("Failed to generate a summary: {}", e)
            }
        }
    }
}
