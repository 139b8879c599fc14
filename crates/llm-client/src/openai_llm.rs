//! OpenAI implementation of [`LlmClient`]: wraps openai-client and prepends the system message.

use anyhow::Result;
use async_trait::async_trait;
use prompt::ChatMessage;
use tracing::instrument;

use super::{chat_message_to_openai, LlmClient};

/// Default system prompt: plain text suitable for sending straight to Telegram.
pub const DEFAULT_SYSTEM_CONTENT: &str =
    "Do not use Markdown or any formatting symbols (such as *, _, `, #). Reply in plain text suitable for sending directly in Telegram.";

/// [`LlmClient`] backed by openai-client.
#[derive(Clone)]
pub struct OpenAILlmClient {
    client: openai_client::OpenAIClient,
    model: String,
    system_prompt: Option<String>,
}

impl OpenAILlmClient {
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: openai_client::OpenAIClient::with_base_url(api_key, base_url),
            model: "gpt-4o-mini".to_string(),
            system_prompt: None,
        }
    }

    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.client = self.client.with_max_tokens(max_tokens);
        self
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    fn system_content(&self) -> &str {
        self.system_prompt
            .as_deref()
            .unwrap_or(DEFAULT_SYSTEM_CONTENT)
    }
}

#[async_trait]
impl LlmClient for OpenAILlmClient {
    #[instrument(skip(self, messages), fields(model = %self.model))]
    async fn get_llm_response_with_messages(&self, messages: Vec<ChatMessage>) -> Result<String> {
        let mut openai_messages: Vec<openai_client::ChatCompletionRequestMessage> = vec![
            openai_client::ChatCompletionRequestSystemMessageArgs::default()
                .content(self.system_content().to_string())
                .build()?
                .into(),
        ];
        for msg in &messages {
            openai_messages.push(chat_message_to_openai(msg)?);
        }
        self.client
            .chat_completion(&self.model, openai_messages)
            .await
    }
}
