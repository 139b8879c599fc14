//! Report rendering and transport-sized chunking.

mod chunk;
mod format;

pub use chunk::{delivery_chunks, split_text, DeliveryChunks, TextChunks, DEFAULT_MAX_CHUNK_LEN, NOTHING_TO_DISPLAY};
pub use format::{format_messages, ReportOptions, NO_MESSAGES_FOUND};
