//! # channel-history
//!
//! Retrieves messages from a public channel through an external [`HistoryClient`]
//! (resolve → paginated history), in count mode or date-range mode, and narrows them by topic.
//!
//! - [`HistoryFetcher`]: one pagination loop for both modes; failures become an empty result plus an error log
//!   ([`HistoryFetcher::try_fetch`] keeps the cause).
//! - [`filter_by_topic`]: case-insensitive substring filter, order preserving.
//! - [`GatewayHistoryClient`]: HTTP/JSON client for a history gateway holding the user session.
//! - [`InMemoryHistoryClient`]: in-process client for tests and local runs.

mod client;
mod config;
mod error;
mod fetcher;
mod filter;
mod gateway;
mod inmemory;
mod message;

pub use client::HistoryClient;
pub use config::EnvHistoryConfig;
pub use error::HistoryError;
pub use fetcher::{HistoryFetcher, DEFAULT_MAX_PAGES, MAX_PAGE_SIZE};
pub use filter::filter_by_topic;
pub use gateway::GatewayHistoryClient;
pub use inmemory::InMemoryHistoryClient;
pub use message::{
    normalize_channel, ChannelHandle, ChannelMessage, DateWindow, FetchRequest, HistoryItem,
    HistoryQuery, MAX_COUNT_LIMIT,
};
