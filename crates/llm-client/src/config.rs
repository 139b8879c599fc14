//! LLM configuration: trait and env-based implementation.

use anyhow::{Context, Result};
use std::env;

/// LLM configuration interface for OpenAI-compatible APIs.
pub trait LlmConfig: Send + Sync {
    fn api_key(&self) -> &str;
    fn base_url(&self) -> &str;
    fn model(&self) -> &str;
    fn max_tokens(&self) -> Option<u32>;
    fn system_prompt(&self) -> Option<&str>;
}

/// LLM config loaded from environment variables.
#[derive(Debug, Clone)]
pub struct EnvLlmConfig {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub llm_model: String,
    pub llm_max_tokens: Option<u32>,
    pub llm_system_prompt: Option<String>,
}

impl LlmConfig for EnvLlmConfig {
    fn api_key(&self) -> &str {
        &self.openai_api_key
    }
    fn base_url(&self) -> &str {
        &self.openai_base_url
    }
    fn model(&self) -> &str {
        &self.llm_model
    }
    fn max_tokens(&self) -> Option<u32> {
        self.llm_max_tokens
    }
    fn system_prompt(&self) -> Option<&str> {
        self.llm_system_prompt.as_deref()
    }
}

impl EnvLlmConfig {
    /// Load from environment variables: OPENAI_API_KEY (required), OPENAI_BASE_URL, MODEL,
    /// LLM_MAX_TOKENS, LLM_SYSTEM_PROMPT or SYSTEM_PROMPT.
    pub fn from_env() -> Result<Self> {
        let openai_api_key = env::var("OPENAI_API_KEY").context("OPENAI_API_KEY not set")?;
        let openai_base_url = env::var("OPENAI_BASE_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1".to_string());
        let llm_model = env::var("MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string());
        let llm_max_tokens = match env::var("LLM_MAX_TOKENS") {
            Ok(raw) => Some(
                raw.parse::<u32>()
                    .with_context(|| format!("Invalid LLM_MAX_TOKENS: {}", raw))?,
            ),
            Err(_) => None,
        };
        let llm_system_prompt = env::var("LLM_SYSTEM_PROMPT")
            .or_else(|_| env::var("SYSTEM_PROMPT"))
            .ok()
            .filter(|s| !s.trim().is_empty());
        Ok(Self {
            openai_api_key,
            openai_base_url,
            llm_model,
            llm_max_tokens,
            llm_system_prompt,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_llm_env() {
        for key in [
            "OPENAI_API_KEY",
            "OPENAI_BASE_URL",
            "MODEL",
            "LLM_MAX_TOKENS",
            "LLM_SYSTEM_PROMPT",
            "SYSTEM_PROMPT",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_llm_env();
        env::set_var("OPENAI_API_KEY", "test_key");

        let cfg = EnvLlmConfig::from_env().unwrap();
        assert_eq!(cfg.api_key(), "test_key");
        assert_eq!(cfg.base_url(), "https://api.openai.com/v1");
        assert_eq!(cfg.model(), "gpt-4o-mini");
        assert_eq!(cfg.max_tokens(), None);
        assert!(cfg.system_prompt().is_none());

        clear_llm_env();
    }

    #[test]
    #[serial]
    fn test_from_env_custom_values() {
        clear_llm_env();
        env::set_var("OPENAI_API_KEY", "k");
        env::set_var("OPENAI_BASE_URL", "https://llm.internal/v1");
        env::set_var("MODEL", "claude-3-7-sonnet-latest");
        env::set_var("LLM_MAX_TOKENS", "1024");
        env::set_var("SYSTEM_PROMPT", "Be brief.");

        let cfg = EnvLlmConfig::from_env().unwrap();
        assert_eq!(cfg.base_url(), "https://llm.internal/v1");
        assert_eq!(cfg.model(), "claude-3-7-sonnet-latest");
        assert_eq!(cfg.max_tokens(), Some(1024));
        assert_eq!(cfg.system_prompt(), Some("Be brief."));

        clear_llm_env();
    }

    #[test]
    #[serial]
    fn test_from_env_blank_system_prompt_ignored() {
        clear_llm_env();
        env::set_var("OPENAI_API_KEY", "k");
        env::set_var("LLM_SYSTEM_PROMPT", "   ");

        let cfg = EnvLlmConfig::from_env().unwrap();
        assert!(cfg.system_prompt().is_none());

        clear_llm_env();
    }

    #[test]
    #[serial]
    fn test_from_env_invalid_max_tokens_is_error() {
        clear_llm_env();
        env::set_var("OPENAI_API_KEY", "k");
        env::set_var("LLM_MAX_TOKENS", "lots");

        let err = EnvLlmConfig::from_env().unwrap_err();
        assert!(err.to_string().contains("LLM_MAX_TOKENS"));

        clear_llm_env();
    }

    #[test]
    #[serial]
    fn test_from_env_missing_key_is_error() {
        clear_llm_env();
        assert!(EnvLlmConfig::from_env().is_err());
    }
}
