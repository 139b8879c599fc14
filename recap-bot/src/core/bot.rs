//! Outgoing message abstraction. [`crate::telegram::TelegramBotAdapter`] implements it over
//! teloxide; tests substitute a recording bot.

use async_trait::async_trait;

use super::error::Result;
use super::types::{Chat, Message};

#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a text message to the given chat.
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()>;

    /// Replies in the chat the message came from.
    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        self.send_message(&message.chat, text).await
    }
}
