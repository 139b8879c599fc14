use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A user's selection. Both fields start unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preference {
    pub channel: Option<String>,
    pub topic: Option<String>,
}

/// Injected key-value store of preferences keyed by Telegram user id.
///
/// A preference is created by the first `set_channel` or `set_topic` for a user and is never
/// removed. Each setter is a single atomic update of that user's entry.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    async fn get(&self, user_id: i64) -> Result<Option<Preference>, anyhow::Error>;

    async fn set_channel(&self, user_id: i64, channel: String) -> Result<(), anyhow::Error>;

    async fn set_topic(&self, user_id: i64, topic: String) -> Result<(), anyhow::Error>;

    /// Snapshot of every stored preference.
    async fn entries(&self) -> Result<Vec<(i64, Preference)>, anyhow::Error>;
}
