//! Test doubles shared by the integration tests: a recording [`Bot`], a scripted LLM, and
//! helpers to assemble a [`RecapService`] over an in-memory history client.

#![allow(dead_code)]

use async_trait::async_trait;
use channel_history::{HistoryFetcher, HistoryItem, InMemoryHistoryClient};
use chrono::{DateTime, Utc};
use llm_client::{ChatMessage, LlmClient};
use rag::RagPipeline;
use recap_bot::{
    Bot, Chat, DbotError, InMemoryPreferenceStore, Message, MessageDirection, PreferenceStore,
    RecapService, RecapSettings, Result, User,
};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// One recorded `send_message(chat, text)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sent {
    pub chat_id: i64,
    pub text: String,
}

/// Bot that records every outgoing message. Sends to chats in `failing_chats` return an error.
#[derive(Default)]
pub struct MockBot {
    sent: Mutex<Vec<Sent>>,
    failing_chats: Mutex<HashSet<i64>>,
}

impl MockBot {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn fail_for_chat(&self, chat_id: i64) {
        self.failing_chats.lock().unwrap().insert(chat_id);
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.sent().into_iter().map(|s| s.text).collect()
    }

    pub fn last_text(&self) -> Option<String> {
        self.sent().pop().map(|s| s.text)
    }
}

#[async_trait]
impl Bot for MockBot {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        if self.failing_chats.lock().unwrap().contains(&chat.id) {
            return Err(DbotError::Bot(format!("chat {} blocked the bot", chat.id)));
        }
        self.sent.lock().unwrap().push(Sent {
            chat_id: chat.id,
            text: text.to_string(),
        });
        Ok(())
    }
}

/// LLM that records prompts and replies with a fixed answer, or fails.
pub struct ScriptedLlm {
    reply: std::result::Result<String, String>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedLlm {
    pub fn answering(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(reply.to_string()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(error: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(error.to_string()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmClient for ScriptedLlm {
    async fn get_llm_response_with_messages(
        &self,
        messages: Vec<ChatMessage>,
    ) -> anyhow::Result<String> {
        let prompt = messages
            .iter()
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        self.prompts.lock().unwrap().push(prompt);
        self.reply.clone().map_err(|e| anyhow::anyhow!(e))
    }
}

pub fn item(id: i64, date: DateTime<Utc>, text: &str) -> HistoryItem {
    HistoryItem {
        id,
        date,
        text: Some(text.to_string()),
    }
}

pub struct Fixture {
    pub history: InMemoryHistoryClient,
    pub preferences: Arc<InMemoryPreferenceStore>,
    pub service: Arc<RecapService>,
}

pub fn fixture(
    history: InMemoryHistoryClient,
    llm: Arc<dyn LlmClient>,
    settings: RecapSettings,
) -> Fixture {
    let preferences = Arc::new(InMemoryPreferenceStore::new());
    let store: Arc<dyn PreferenceStore> = preferences.clone();
    let service = Arc::new(RecapService::new(
        HistoryFetcher::new(Arc::new(history.clone())),
        Arc::new(RagPipeline::new(llm)),
        store,
        settings,
    ));
    Fixture {
        history,
        preferences,
        service,
    }
}

pub fn private_message(user_id: i64, text: &str) -> Message {
    Message {
        id: format!("msg-{}", user_id),
        user: User {
            id: user_id,
            username: Some(format!("user{}", user_id)),
            first_name: Some("Test".to_string()),
            last_name: None,
        },
        chat: Chat::private(user_id),
        content: text.to_string(),
        message_type: "text".to_string(),
        direction: MessageDirection::Incoming,
        created_at: Utc::now(),
        reply_to_message_id: None,
    }
}
