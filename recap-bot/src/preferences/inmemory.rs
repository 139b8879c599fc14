//! Process-local [`PreferenceStore`]. Contents are lost on restart.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::{Preference, PreferenceStore};

#[derive(Debug, Clone, Default)]
pub struct InMemoryPreferenceStore {
    entries: Arc<RwLock<HashMap<i64, Preference>>>,
}

impl InMemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl PreferenceStore for InMemoryPreferenceStore {
    async fn get(&self, user_id: i64) -> Result<Option<Preference>, anyhow::Error> {
        Ok(self.entries.read().await.get(&user_id).cloned())
    }

    async fn set_channel(&self, user_id: i64, channel: String) -> Result<(), anyhow::Error> {
        self.entries
            .write()
            .await
            .entry(user_id)
            .or_default()
            .channel = Some(channel);
        Ok(())
    }

    async fn set_topic(&self, user_id: i64, topic: String) -> Result<(), anyhow::Error> {
        self.entries.write().await.entry(user_id).or_default().topic = Some(topic);
        Ok(())
    }

    async fn entries(&self) -> Result<Vec<(i64, Preference)>, anyhow::Error> {
        let entries = self.entries.read().await;
        let mut snapshot: Vec<(i64, Preference)> =
            entries.iter().map(|(id, p)| (*id, p.clone())).collect();
        snapshot.sort_by_key(|(id, _)| *id);
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unknown_user_has_no_preference() {
        let store = InMemoryPreferenceStore::new();
        assert_eq!(store.get(1).await.unwrap(), None);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_setters_create_then_update_one_entry() {
        let store = InMemoryPreferenceStore::new();
        store.set_topic(7, "rust".into()).await.unwrap();
        assert_eq!(
            store.get(7).await.unwrap(),
            Some(Preference {
                channel: None,
                topic: Some("rust".into())
            })
        );

        store.set_channel(7, "@news".into()).await.unwrap();
        store.set_channel(7, "@other".into()).await.unwrap();
        let pref = store.get(7).await.unwrap().unwrap();
        assert_eq!(pref.channel.as_deref(), Some("@other"));
        assert_eq!(pref.topic.as_deref(), Some("rust"));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_entries_snapshot_sorted_by_user() {
        let store = InMemoryPreferenceStore::new();
        store.set_channel(20, "@b".into()).await.unwrap();
        store.set_channel(10, "@a".into()).await.unwrap();
        let ids: Vec<i64> = store.entries().await.unwrap().into_iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![10, 20]);
    }

    #[tokio::test]
    async fn test_concurrent_writers_keep_every_user() {
        let store = InMemoryPreferenceStore::new();
        let mut tasks = Vec::new();
        for user in 0..32 {
            let store = store.clone();
            tasks.push(tokio::spawn(async move {
                store.set_channel(user, format!("@c{user}")).await.unwrap();
                store.set_topic(user, format!("t{user}")).await.unwrap();
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }
        assert_eq!(store.len().await, 32);
        let pref = store.get(5).await.unwrap().unwrap();
        assert_eq!(pref.channel.as_deref(), Some("@c5"));
        assert_eq!(pref.topic.as_deref(), Some("t5"));
    }
}
