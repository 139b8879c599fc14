//! REPL runner: converts teloxide messages to core messages and runs the handler chain on each.

use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use tokio::sync::RwLock;
use tracing::{error, info, instrument};

use super::adapters::TelegramMessageWrapper;
use crate::chain::HandlerChain;
use crate::core::ToCoreMessage;

/// Resolves the bot username (getMe) into `bot_username`, then serves updates until shutdown.
/// Each message is handled on its own task.
#[instrument(skip(bot, handler_chain, bot_username))]
pub async fn run_repl(
    bot: teloxide::Bot,
    handler_chain: HandlerChain,
    bot_username: Arc<RwLock<Option<String>>>,
) -> Result<()> {
    match bot.get_me().await {
        Ok(me) => {
            if let Some(username) = &me.user.username {
                *bot_username.write().await = Some(username.clone());
                info!(username = %username, "Bot username set before repl");
            }
        }
        Err(e) => error!(error = %e, "getMe failed; commands addressed with @botname will not be filtered"),
    }

    teloxide::repl(bot, move |msg: Message| {
        let chain = handler_chain.clone();
        async move {
            let core_msg = TelegramMessageWrapper(&msg).to_core();
            tokio::spawn(async move {
                if let Err(e) = chain.handle(&core_msg).await {
                    error!(error = %e, user_id = core_msg.user.id, "Handler chain failed");
                }
            });
            respond(())
        }
    })
    .await;

    Ok(())
}
