//! # OpenAI API client
//!
//! Thin wrapper around [async-openai] for one-shot chat completion against any
//! OpenAI-compatible endpoint. Provides token masking for safe logging.

use async_openai::{types::CreateChatCompletionRequestArgs, Client};
use std::sync::Arc;
use tracing;

pub use async_openai::types::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
};

/// Masks an API key/token for safe logging: shows first 7 chars + "***" + last 4 chars.
/// If length <= 11, returns "***" to avoid leaking any part of the key.
pub fn mask_token(token: &str) -> String {
    let len = token.len();
    if len <= 11 || !token.is_char_boundary(7) || !token.is_char_boundary(len - 4) {
        "***".to_string()
    } else {
        format!("{}***{}", &token[..7], &token[len - 4..])
    }
}

/// OpenAI chat client. Wraps async-openai client and keeps the API key for masked logging.
#[derive(Clone)]
pub struct OpenAIClient {
    client: Arc<Client<async_openai::config::OpenAIConfig>>,
    /// API key kept only for masked logging.
    api_key_for_logging: String,
    /// Upper bound on completion tokens; provider default when None.
    max_tokens: Option<u32>,
}

impl OpenAIClient {
    /// Builds a client with a custom base URL (e.g. for proxies or compatible endpoints).
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        let api_key_for_logging = api_key.clone();
        let config = async_openai::config::OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(base_url);
        Self {
            client: Arc::new(Client::with_config(config)),
            api_key_for_logging,
            max_tokens: None,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    fn masked_key(&self) -> String {
        mask_token(&self.api_key_for_logging)
    }

    /// Sends a chat completion request and returns the first choice's content unmodified.
    ///
    /// Logs masked API key, request JSON, and token usage. A response with no choices is an error;
    /// a choice with no content yields an empty string.
    pub async fn chat_completion(
        &self,
        model: &str,
        messages: Vec<ChatCompletionRequestMessage>,
    ) -> anyhow::Result<String> {
        tracing::info!(
            model = %model,
            message_count = messages.len(),
            api_key = %self.masked_key(),
            "OpenAI chat_completion request"
        );

        let mut args = CreateChatCompletionRequestArgs::default();
        args.model(model).messages(messages);
        if let Some(max_tokens) = self.max_tokens {
            args.max_tokens(max_tokens);
        }
        let request = args.build()?;

        if let Ok(json) = serde_json::to_string_pretty(&request) {
            tracing::debug!(request_json = %json, "OpenAI chat_completion request JSON");
        }

        let response = self.client.chat().create(request).await?;

        if let Some(ref u) = response.usage {
            tracing::info!(
                prompt_tokens = u.prompt_tokens,
                completion_tokens = u.completion_tokens,
                total_tokens = u.total_tokens,
                "OpenAI chat_completion usage"
            );
        }

        match response.choices.first() {
            Some(choice) => Ok(choice.message.content.clone().unwrap_or_default()),
            None => anyhow::bail!("No response from OpenAI"),
        }
    }
}
