//! # Handler chain
//!
//! Runs every `before` in order (any `false` stops the chain), then `handle` until one returns
//! Stop or Reply, then every `after` in reverse with the final response.

use crate::core::{Handler, HandlerResponse, Message, Result};
use std::sync::Arc;
use tracing::{debug, info, instrument};

#[derive(Clone, Default)]
pub struct HandlerChain {
    handlers: Vec<Arc<dyn Handler>>,
}

fn handler_name(handler: &Arc<dyn Handler>) -> &'static str {
    std::any::type_name_of_val(handler.as_ref())
}

impl HandlerChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a handler.
    pub fn add_handler(mut self, handler: Arc<dyn Handler>) -> Self {
        self.handlers.push(handler);
        self
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    #[instrument(skip(self, message), fields(user_id = message.user.id, chat_id = message.chat.id))]
    pub async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        info!(message_id = %message.id, "step: handler_chain started");

        for h in &self.handlers {
            if !h.before(message).await? {
                info!(handler = handler_name(h), "step: before returned false, chain stopped");
                return Ok(HandlerResponse::Stop);
            }
        }

        let mut final_response = HandlerResponse::Continue;
        for h in &self.handlers {
            let response = h.handle(message).await?;
            debug!(handler = handler_name(h), response = ?response, "step: handler handle done");
            if matches!(response, HandlerResponse::Stop | HandlerResponse::Reply(_)) {
                final_response = response;
                break;
            }
        }

        for h in self.handlers.iter().rev() {
            h.after(message, &final_response).await?;
        }

        let reply_len = match &final_response {
            HandlerResponse::Reply(text) => Some(text.len()),
            _ => None,
        };
        info!(message_id = %message.id, reply_len = ?reply_len, "step: handler_chain finished");
        Ok(final_response)
    }
}
