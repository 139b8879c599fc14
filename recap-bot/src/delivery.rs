//! Sends a reply as one or more transport-sized messages, in order.

use tracing::debug;

use crate::core::{Bot, Chat, Message, Result};
use crate::report::delivery_chunks;

/// Sends `text` to `chat` in chunks of at most `max_chunk_len` characters; an empty text sends the
/// "nothing to display" sentinel. Stops at the first failed send. Returns the number of messages sent.
pub async fn deliver(bot: &dyn Bot, chat: &Chat, text: &str, max_chunk_len: usize) -> Result<usize> {
    let mut sent = 0;
    for chunk in delivery_chunks(Some(text), max_chunk_len) {
        bot.send_message(chat, chunk).await?;
        sent += 1;
    }
    debug!(chat_id = chat.id, chunks = sent, "step: reply delivered");
    Ok(sent)
}

/// Like [`deliver`], but answers `message` in its own chat through [`Bot::reply_to`].
pub async fn deliver_reply(
    bot: &dyn Bot,
    message: &Message,
    text: &str,
    max_chunk_len: usize,
) -> Result<usize> {
    let mut sent = 0;
    for chunk in delivery_chunks(Some(text), max_chunk_len) {
        bot.reply_to(message, chunk).await?;
        sent += 1;
    }
    debug!(chat_id = message.chat.id, chunks = sent, "step: reply delivered");
    Ok(sent)
}
