//! Bot configuration: BaseConfig (Telegram + log) + RecapConfig (report, delivery, daily job) +
//! history gateway and LLM settings from their crates.

mod base;
mod bot_config;
mod recap;

#[cfg(test)]
mod tests;

pub use base::BaseConfig;
pub use bot_config::BotConfig;
pub use recap::RecapConfig;
