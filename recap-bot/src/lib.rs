//! # Channel recap bot
//!
//! Telegram bot that reports and summarizes public channel history. Commands are parsed into
//! [`Command`]s and run by [`RecapService`] over a [`channel_history::HistoryFetcher`] and a
//! [`rag::RagPipeline`]; replies go out in chunks through the core [`Bot`] trait.

pub mod chain;
pub mod cli;
pub mod commands;
pub mod components;
pub mod config;
pub mod core;
pub mod daily;
pub mod delivery;
pub mod handlers;
pub mod preferences;
pub mod recap;
pub mod report;
pub mod runner;
pub mod telegram;

pub use cli::{load_config, Cli, Commands};

pub use crate::core::{
    init_tracing, Bot, Chat, DbotError, Handler, HandlerError, HandlerResponse, Message,
    MessageDirection, Result, ToCoreMessage, ToCoreUser, User,
};

pub use chain::HandlerChain;
pub use commands::{parse_command, Command, ValidationError};
pub use components::{build_bot_components, build_handler_chain, BotComponents};
pub use config::{BaseConfig, BotConfig, RecapConfig};
pub use daily::DailyRecapJob;
pub use delivery::{deliver, deliver_reply};
pub use handlers::{LoggingHandler, RecapHandler};
pub use preferences::{InMemoryPreferenceStore, Preference, PreferenceStore};
pub use recap::{RecapService, RecapSettings, RecapStyle};
pub use report::{delivery_chunks, format_messages, split_text, ReportOptions};
pub use runner::run_bot;
pub use telegram::{run_repl, TelegramBotAdapter, TelegramMessageWrapper, TelegramUserWrapper};
