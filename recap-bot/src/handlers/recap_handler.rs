//! Command handler: parses the message, runs the command, delivers the reply in chunks.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, instrument, warn};

use crate::commands::{command_addressee, parse_command};
use crate::core::{Bot, Handler, HandlerResponse, Message, Result};
use crate::delivery::deliver_reply;
use crate::recap::RecapService;

pub struct RecapHandler {
    bot: Arc<dyn Bot>,
    service: Arc<RecapService>,
    /// Filled from getMe at startup; commands addressed to another bot are ignored.
    bot_username: Arc<RwLock<Option<String>>>,
}

impl RecapHandler {
    pub fn new(
        bot: Arc<dyn Bot>,
        service: Arc<RecapService>,
        bot_username: Arc<RwLock<Option<String>>>,
    ) -> Self {
        Self {
            bot,
            service,
            bot_username,
        }
    }

    async fn addressed_elsewhere(&self, text: &str) -> bool {
        let Some(addressee) = command_addressee(text) else {
            return false;
        };
        match self.bot_username.read().await.as_deref() {
            Some(me) => !addressee.eq_ignore_ascii_case(me),
            None => false,
        }
    }
}

#[async_trait]
impl Handler for RecapHandler {
    #[instrument(skip(self, message), fields(user_id = message.user.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let text = message.content.trim();
        if text.is_empty() || self.addressed_elsewhere(text).await {
            return Ok(HandlerResponse::Ignore);
        }

        let reply = match parse_command(text) {
            Ok(None) => return Ok(HandlerResponse::Continue),
            Ok(Some(command)) => {
                info!(command = ?command, "step: command parsed");
                self.service.execute(message.user.id, command).await?
            }
            Err(e) => {
                warn!(error = %e, "Invalid command");
                e.to_string()
            }
        };

        deliver_reply(
            self.bot.as_ref(),
            message,
            &reply,
            self.service.settings().max_chunk_len,
        )
        .await?;
        Ok(HandlerResponse::Reply(reply))
    }
}
