use async_trait::async_trait;
use tracing::{info, instrument};

use crate::core::{Handler, HandlerResponse, Message, Result};

/// Logs each incoming message in `before` and the outcome in `after`; never stops the chain.
pub struct LoggingHandler;

#[async_trait]
impl Handler for LoggingHandler {
    #[instrument(skip(self, message))]
    async fn before(&self, message: &Message) -> Result<bool> {
        info!(
            user_id = message.user.id,
            username = %message.user.username.as_deref().unwrap_or("unknown"),
            chat_type = %message.chat.chat_type,
            message_content = %message.content,
            "Received message"
        );
        Ok(true)
    }

    #[instrument(skip(self, message, response))]
    async fn after(&self, message: &Message, response: &HandlerResponse) -> Result<()> {
        match response {
            HandlerResponse::Reply(text) => info!(
                user_id = message.user.id,
                message_id = %message.id,
                reply_len = text.chars().count(),
                "Replied to command"
            ),
            other => info!(
                user_id = message.user.id,
                message_id = %message.id,
                response = ?other,
                "Message not answered"
            ),
        }
        Ok(())
    }
}
