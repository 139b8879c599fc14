//! Splits text into transport-sized chunks.
//!
//! [`TextChunks`] is lossless: concatenating its chunks gives the input back, and empty input gives
//! no chunks. [`delivery_chunks`] is what gets sent; it yields [`NOTHING_TO_DISPLAY`] instead of
//! nothing. Lengths count Unicode scalar values.

/// Telegram's message limit is 4096; keep some headroom.
pub const DEFAULT_MAX_CHUNK_LEN: usize = 4000;

/// Sent in place of an empty text.
pub const NOTHING_TO_DISPLAY: &str = "Nothing to display.";

/// Iterator over contiguous `&str` pieces of at most `max_chars` characters.
#[derive(Debug, Clone)]
pub struct TextChunks<'a> {
    rest: &'a str,
    max_chars: usize,
}

/// Lazily splits `text`; a `max_chars` of 0 is treated as 1.
pub fn split_text(text: &str, max_chars: usize) -> TextChunks<'_> {
    TextChunks {
        rest: text,
        max_chars: max_chars.max(1),
    }
}

impl<'a> Iterator for TextChunks<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.rest.is_empty() {
            return None;
        }
        let cut = self
            .rest
            .char_indices()
            .nth(self.max_chars)
            .map_or(self.rest.len(), |(i, _)| i);
        let (chunk, rest) = self.rest.split_at(cut);
        self.rest = rest;
        Some(chunk)
    }
}

/// Chunks to send for `text`: the sentinel alone when `text` is absent or empty.
#[derive(Debug, Clone)]
pub enum DeliveryChunks<'a> {
    Sentinel(Option<&'static str>),
    Text(TextChunks<'a>),
}

impl<'a> Iterator for DeliveryChunks<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        match self {
            DeliveryChunks::Sentinel(sentinel) => sentinel.take(),
            DeliveryChunks::Text(chunks) => chunks.next(),
        }
    }
}

pub fn delivery_chunks(text: Option<&str>, max_chars: usize) -> DeliveryChunks<'_> {
    match text {
        Some(text) if !text.is_empty() => DeliveryChunks::Text(split_text(text, max_chars)),
        _ => DeliveryChunks::Sentinel(Some(NOTHING_TO_DISPLAY)),
    }
}
