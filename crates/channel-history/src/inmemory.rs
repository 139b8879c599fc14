//! # In-memory history client
//!
//! Keeps channel histories in process. Used by tests and for running the bot without a gateway.
//! Mirrors the upstream paging contract: newest first, `offset_id` exclusive, `before_date` exclusive.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{ChannelHandle, HistoryClient, HistoryError, HistoryItem, HistoryQuery};

#[derive(Debug, Clone)]
struct StoredChannel {
    handle: ChannelHandle,
    items: Vec<HistoryItem>,
}

/// In-memory [`HistoryClient`].
#[derive(Debug, Clone)]
pub struct InMemoryHistoryClient {
    channels: Arc<RwLock<HashMap<String, StoredChannel>>>,
    authorized: Arc<AtomicBool>,
    connected: Arc<AtomicBool>,
    failure: Arc<RwLock<Option<HistoryError>>>,
    history_calls: Arc<AtomicUsize>,
}

impl Default for InMemoryHistoryClient {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryHistoryClient {
    /// Authorized, connected client with no channels.
    pub fn new() -> Self {
        Self {
            channels: Arc::new(RwLock::new(HashMap::new())),
            authorized: Arc::new(AtomicBool::new(true)),
            connected: Arc::new(AtomicBool::new(true)),
            failure: Arc::new(RwLock::new(None)),
            history_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Adds (or replaces) a channel. Usernames match case-insensitively, without `@`.
    pub async fn insert_channel(&self, id: i64, username: &str, items: Vec<HistoryItem>) {
        let username = crate::normalize_channel(username).to_string();
        let handle = ChannelHandle {
            id,
            username: username.clone(),
            title: None,
        };
        self.channels
            .write()
            .await
            .insert(username.to_lowercase(), StoredChannel { handle, items });
    }

    pub fn set_authorized(&self, authorized: bool) {
        self.authorized.store(authorized, Ordering::SeqCst);
    }

    /// Makes every subsequent `get_history` call fail with `error` (or succeed again with `None`).
    pub async fn fail_history_with(&self, error: Option<HistoryError>) {
        *self.failure.write().await = error;
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    /// Number of `get_history` calls served so far.
    pub fn history_calls(&self) -> usize {
        self.history_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HistoryClient for InMemoryHistoryClient {
    async fn connect(&self) -> Result<(), HistoryError> {
        self.connected.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn disconnect(&self) -> Result<(), HistoryError> {
        self.connected.store(false, Ordering::SeqCst);
        Ok(())
    }

    async fn is_authorized(&self) -> Result<bool, HistoryError> {
        Ok(self.authorized.load(Ordering::SeqCst))
    }

    async fn resolve_entity(&self, username: &str) -> Result<ChannelHandle, HistoryError> {
        let channels = self.channels.read().await;
        channels
            .get(&username.to_lowercase())
            .map(|c| c.handle.clone())
            .ok_or_else(|| HistoryError::NotFound(username.to_string()))
    }

    async fn get_history(
        &self,
        channel: &ChannelHandle,
        query: HistoryQuery,
    ) -> Result<Vec<HistoryItem>, HistoryError> {
        self.history_calls.fetch_add(1, Ordering::SeqCst);
        if !self.is_connected() {
            return Err(HistoryError::Transport("client is disconnected".to_string()));
        }
        if let Some(error) = self.failure.read().await.clone() {
            return Err(error);
        }

        let channels = self.channels.read().await;
        let stored = channels
            .values()
            .find(|c| c.handle.id == channel.id)
            .ok_or_else(|| HistoryError::NotFound(channel.username.clone()))?;

        let mut page: Vec<HistoryItem> = stored
            .items
            .iter()
            .filter(|item| query.offset_id <= 0 || item.id < query.offset_id)
            .filter(|item| query.before_date.map_or(true, |before| item.date < before))
            .cloned()
            .collect();
        page.sort_by(|a, b| b.id.cmp(&a.id));
        page.truncate(query.limit);
        Ok(page)
    }
}
