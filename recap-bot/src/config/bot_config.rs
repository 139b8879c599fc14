//! BotConfig: everything the bot needs, loaded from env in one place.

use anyhow::{Context, Result};
use channel_history::EnvHistoryConfig;
use llm_client::{EnvLlmConfig, LlmConfig};

use super::{BaseConfig, RecapConfig};

pub struct BotConfig {
    pub base: BaseConfig,
    pub recap: RecapConfig,
    pub history: EnvHistoryConfig,
    pub llm: EnvLlmConfig,
}

impl BotConfig {
    /// Load full config from environment variables. If `token` is provided it overrides BOT_TOKEN.
    /// Call validate() after load to check config before init.
    pub fn load(token: Option<String>) -> Result<Self> {
        Ok(Self {
            base: BaseConfig::load(token)?,
            recap: RecapConfig::from_env()?,
            history: EnvHistoryConfig::from_env()?,
            llm: EnvLlmConfig::from_env()?,
        })
    }

    pub fn validate(&self) -> Result<()> {
        self.base.validate()?;
        self.recap.validate()?;
        reqwest::Url::parse(&self.history.gateway_url).with_context(|| {
            format!("HISTORY_GATEWAY_URL is not a valid URL: {}", self.history.gateway_url)
        })?;
        reqwest::Url::parse(self.llm.base_url())
            .with_context(|| format!("OPENAI_BASE_URL is not a valid URL: {}", self.llm.base_url()))?;
        Ok(())
    }

    pub fn base(&self) -> &BaseConfig {
        &self.base
    }
    pub fn bot_token(&self) -> &str {
        &self.base.bot_token
    }
    pub fn log_file(&self) -> &str {
        &self.base.log_file
    }
    pub fn telegram_api_url(&self) -> Option<&str> {
        self.base.telegram_api_url.as_deref()
    }
}
