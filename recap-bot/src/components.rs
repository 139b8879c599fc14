//! Component factory: builds the shared clients and services once from config.

use anyhow::Result;
use channel_history::{GatewayHistoryClient, HistoryClient, HistoryFetcher};
use llm_client::{LlmClient, LlmConfig, OpenAILlmClient};
use rag::RagPipeline;
use std::sync::Arc;
use teloxide::prelude::*;
use tokio::sync::RwLock;
use tracing::{error, info, instrument};

use crate::chain::HandlerChain;
use crate::config::BotConfig;
use crate::core::Bot as CoreBot;
use crate::handlers::{LoggingHandler, RecapHandler};
use crate::preferences::{InMemoryPreferenceStore, PreferenceStore};
use crate::recap::RecapService;
use crate::telegram::TelegramBotAdapter;

/// Dependencies shared by the handler chain, the daily job and the runner.
#[derive(Clone)]
pub struct BotComponents {
    pub teloxide_bot: teloxide::Bot,
    pub bot_username: Arc<RwLock<Option<String>>>,
    /// Outgoing messages; the teloxide adapter unless overridden (tests).
    pub bot: Arc<dyn CoreBot>,
    pub history_client: Arc<dyn HistoryClient>,
    pub service: Arc<RecapService>,
}

pub fn build_teloxide_bot(config: &BotConfig) -> teloxide::Bot {
    let bot = Bot::new(config.bot_token());
    match config.telegram_api_url() {
        Some(url_str) => match reqwest::Url::parse(url_str) {
            Ok(url) => bot.set_api_url(url),
            Err(e) => {
                error!(error = %e, url = %url_str, "Invalid TELEGRAM_API_URL, using default");
                bot
            }
        },
        None => bot,
    }
}

pub fn build_history_client(config: &BotConfig) -> Result<Arc<dyn HistoryClient>> {
    let client = GatewayHistoryClient::new(
        &config.history.gateway_url,
        config.history.gateway_token.clone(),
    )?;
    info!(gateway = %client.base_url(), "Using history gateway");
    Ok(Arc::new(client))
}

pub fn build_llm_client(config: &BotConfig) -> Arc<dyn LlmClient> {
    let llm = &config.llm;
    let client =
        OpenAILlmClient::with_base_url(llm.api_key().to_string(), llm.base_url().to_string())
            .with_model(llm.model().to_string())
            .with_max_tokens(llm.max_tokens());
    match llm.system_prompt() {
        Some(prompt) => Arc::new(client.with_system_prompt(prompt)),
        None => Arc::new(client),
    }
}

pub fn build_recap_service(
    config: &BotConfig,
    history_client: Arc<dyn HistoryClient>,
    llm_client: Arc<dyn LlmClient>,
    preferences: Arc<dyn PreferenceStore>,
) -> RecapService {
    let fetcher = HistoryFetcher::new(history_client)
        .with_page_size(config.history.page_size)
        .with_max_pages(config.history.max_pages);
    RecapService::new(
        fetcher,
        Arc::new(RagPipeline::new(llm_client)),
        preferences,
        config.recap.settings(),
    )
}

/// Builds components around the given history and LLM clients. `bot_override` replaces the
/// Telegram adapter for outgoing messages.
#[instrument(skip_all)]
pub fn build_bot_components(
    config: &BotConfig,
    history_client: Arc<dyn HistoryClient>,
    llm_client: Arc<dyn LlmClient>,
    bot_override: Option<Arc<dyn CoreBot>>,
) -> BotComponents {
    let teloxide_bot = build_teloxide_bot(config);
    let bot: Arc<dyn CoreBot> = match bot_override {
        Some(bot) => bot,
        None => Arc::new(TelegramBotAdapter::new(teloxide_bot.clone())),
    };
    let preferences: Arc<dyn PreferenceStore> = Arc::new(InMemoryPreferenceStore::new());
    let service = Arc::new(build_recap_service(
        config,
        history_client.clone(),
        llm_client,
        preferences,
    ));
    BotComponents {
        teloxide_bot,
        bot_username: Arc::new(RwLock::new(None)),
        bot,
        history_client,
        service,
    }
}

/// logging → recap commands.
pub fn build_handler_chain(components: &BotComponents) -> HandlerChain {
    HandlerChain::new()
        .add_handler(Arc::new(LoggingHandler))
        .add_handler(Arc::new(RecapHandler::new(
            components.bot.clone(),
            components.service.clone(),
            components.bot_username.clone(),
        )))
}
