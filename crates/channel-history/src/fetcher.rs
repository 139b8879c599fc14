//! Paginated channel-history retrieval for count and date-range requests.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

use crate::{
    normalize_channel, ChannelHandle, ChannelMessage, DateWindow, FetchRequest, HistoryClient,
    HistoryError, HistoryQuery,
};

/// Upstream page-size ceiling.
pub const MAX_PAGE_SIZE: usize = 100;

/// Default upper bound on pages requested by one fetch.
pub const DEFAULT_MAX_PAGES: usize = 50;

/// Decision for one upstream item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Admit {
    Keep,
    Skip,
    /// Nothing at or past this item can qualify; end retrieval.
    Stop,
}

/// Mode-specific inclusion rule and completion target for [`HistoryFetcher::paginate`].
#[derive(Debug, Clone, Copy)]
enum PagePlan {
    Count { limit: usize },
    Window(DateWindow),
}

impl PagePlan {
    /// `None` for a date range with no representable window.
    fn from_request(request: &FetchRequest) -> Option<Self> {
        match request {
            FetchRequest::Count { limit, .. } => Some(PagePlan::Count { limit: *limit }),
            FetchRequest::DateRange { from, to, .. } => {
                DateWindow::from_dates(*from, *to).map(PagePlan::Window)
            }
        }
    }

    fn admit(&self, date: &DateTime<Utc>) -> Admit {
        match self {
            PagePlan::Count { .. } => Admit::Keep,
            PagePlan::Window(window) if *date < window.start => Admit::Stop,
            PagePlan::Window(window) if *date > window.end => Admit::Skip,
            PagePlan::Window(_) => Admit::Keep,
        }
    }

    fn is_satisfied(&self, kept: usize) -> bool {
        match self {
            PagePlan::Count { limit } => kept >= *limit,
            PagePlan::Window(_) => false,
        }
    }

    fn before_date(&self) -> Option<DateTime<Utc>> {
        match self {
            PagePlan::Count { .. } => None,
            PagePlan::Window(window) => window.upper_bound(),
        }
    }

    fn limit(&self) -> Option<usize> {
        match self {
            PagePlan::Count { limit } => Some(*limit),
            PagePlan::Window(_) => None,
        }
    }
}

/// Fetches channel history through an injected [`HistoryClient`].
#[derive(Clone)]
pub struct HistoryFetcher {
    client: Arc<dyn HistoryClient>,
    page_size: usize,
    max_pages: Option<usize>,
}

impl HistoryFetcher {
    /// Fetcher with page size [`MAX_PAGE_SIZE`] and a [`DEFAULT_MAX_PAGES`] ceiling.
    pub fn new(client: Arc<dyn HistoryClient>) -> Self {
        Self {
            client,
            page_size: MAX_PAGE_SIZE,
            max_pages: Some(DEFAULT_MAX_PAGES),
        }
    }

    /// Sets the page size, clamped to `1..=MAX_PAGE_SIZE`.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        self
    }

    /// Sets the per-fetch page ceiling; `None` removes it.
    pub fn with_max_pages(mut self, max_pages: Option<usize>) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Resolves a channel name (with or without `@`), checking authorization first.
    #[instrument(skip(self))]
    pub async fn resolve(&self, channel: &str) -> Result<ChannelHandle, HistoryError> {
        if !self.client.is_authorized().await? {
            return Err(HistoryError::Unauthorized(
                "history session is not logged in".to_string(),
            ));
        }
        let username = normalize_channel(channel);
        if username.is_empty() {
            return Err(HistoryError::NotFound(channel.to_string()));
        }
        self.client.resolve_entity(username).await
    }

    /// Fetches messages for `request`. Failures are logged and yield an empty result;
    /// use [`Self::try_fetch`] to observe the cause.
    pub async fn fetch(&self, request: &FetchRequest) -> Vec<ChannelMessage> {
        match self.try_fetch(request).await {
            Ok(messages) => messages,
            Err(e) => {
                error!(
                    channel = %request.channel(),
                    mode = request.mode(),
                    kind = e.kind(),
                    error = %e,
                    "Failed to fetch channel history"
                );
                Vec::new()
            }
        }
    }

    /// Like [`Self::fetch`] but returns only the message texts, newest first (RAG documents).
    pub async fn fetch_documents(&self, request: &FetchRequest) -> Vec<String> {
        self.fetch(request)
            .await
            .into_iter()
            .map(|m| m.text)
            .collect()
    }

    /// Fetches messages for `request`, returning the client error if any call fails.
    #[instrument(skip(self), fields(channel = %request.channel(), mode = request.mode()))]
    pub async fn try_fetch(
        &self,
        request: &FetchRequest,
    ) -> Result<Vec<ChannelMessage>, HistoryError> {
        let Some(plan) = PagePlan::from_request(request) else {
            warn!("Date range ends past the representable calendar, nothing to fetch");
            return Ok(Vec::new());
        };
        if plan.limit() == Some(0) {
            return Ok(Vec::new());
        }
        let handle = self.resolve(request.channel()).await?;
        let messages = self.paginate(&handle, plan).await?;
        info!(
            channel_id = handle.id,
            count = messages.len(),
            "step: channel history fetched"
        );
        Ok(messages)
    }

    /// Walks history newest → oldest. The cursor moves to the last id of each page and must
    /// strictly decrease, so the loop ends at the oldest message, a short page, the plan's stop
    /// condition, or the page ceiling.
    async fn paginate(
        &self,
        handle: &ChannelHandle,
        plan: PagePlan,
    ) -> Result<Vec<ChannelMessage>, HistoryError> {
        let mut collected: Vec<ChannelMessage> = Vec::new();
        let mut offset_id: i64 = 0;
        let mut pages: usize = 0;
        let before_date = plan.before_date();

        'pages: loop {
            if let Some(max_pages) = self.max_pages {
                if pages >= max_pages {
                    warn!(
                        channel_id = handle.id,
                        pages,
                        collected = collected.len(),
                        "Page ceiling reached, returning partial history"
                    );
                    break;
                }
            }

            let page = self
                .client
                .get_history(
                    handle,
                    HistoryQuery {
                        limit: self.page_size,
                        offset_id,
                        before_date,
                    },
                )
                .await?;
            pages += 1;

            let page_len = page.len();
            let last_id = page.last().map(|item| item.id);
            debug!(
                channel_id = handle.id,
                page = pages,
                offset_id,
                page_len,
                "step: history page received"
            );

            for item in page {
                match plan.admit(&item.date) {
                    Admit::Stop => break 'pages,
                    Admit::Skip => continue,
                    Admit::Keep => {}
                }
                if let Some(message) = item.into_message() {
                    collected.push(message);
                    if plan.is_satisfied(collected.len()) {
                        break 'pages;
                    }
                }
            }

            if page_len < self.page_size {
                break;
            }
            match last_id {
                Some(id) if id > 0 && (offset_id == 0 || id < offset_id) => offset_id = id,
                _ => {
                    warn!(
                        channel_id = handle.id,
                        offset_id,
                        last_id = ?last_id,
                        "History cursor did not decrease, stopping"
                    );
                    break;
                }
            }
        }

        if let Some(limit) = plan.limit() {
            collected.truncate(limit);
        }
        Ok(collected)
    }
}
