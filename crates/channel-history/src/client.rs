//! Messaging-platform client interface consumed by the fetcher.

use async_trait::async_trait;

use crate::{ChannelHandle, HistoryError, HistoryItem, HistoryQuery};

/// External history client (user session on the messaging platform). Authentication is provisioned
/// out of band; this interface only consumes an existing session.
#[async_trait]
pub trait HistoryClient: Send + Sync {
    /// Opens the connection to the platform. Called once at startup.
    async fn connect(&self) -> Result<(), HistoryError>;

    /// Closes the connection. Called once at shutdown.
    async fn disconnect(&self) -> Result<(), HistoryError>;

    /// Whether the underlying session is authorized to read channels.
    async fn is_authorized(&self) -> Result<bool, HistoryError>;

    /// Resolves a public channel username (without `@`) to a handle.
    async fn resolve_entity(&self, username: &str) -> Result<ChannelHandle, HistoryError>;

    /// Returns up to `query.limit` items older than `query.offset_id`, newest first.
    async fn get_history(
        &self,
        channel: &ChannelHandle,
        query: HistoryQuery,
    ) -> Result<Vec<HistoryItem>, HistoryError>;
}
