//! # LLM client abstraction
//!
//! Defines the [`LlmClient`] trait and an OpenAI implementation. Transport-agnostic;
//! used by the `rag` crate's generate stage and by the bot's component factory.

use anyhow::Result;
use async_trait::async_trait;
use openai_client::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs,
};
pub use prompt::{ChatMessage, MessageRole};

mod config;
mod openai_llm;

pub use config::{EnvLlmConfig, LlmConfig};
pub use openai_llm::{OpenAILlmClient, DEFAULT_SYSTEM_CONTENT};

/// Generation service interface: one synchronous request, one reply, may fail.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Returns the model reply text for the given messages (system/user/assistant). Implementations add system prompt etc.
    async fn get_llm_response_with_messages(&self, messages: Vec<ChatMessage>) -> Result<String>;

    /// Sends `prompt` as a single user message and returns the reply unmodified.
    async fn complete(&self, prompt: &str) -> Result<String> {
        self.get_llm_response_with_messages(vec![ChatMessage::user(prompt)])
            .await
    }
}

/// Converts a single [`ChatMessage`] into OpenAI API message format.
fn chat_message_to_openai(msg: &ChatMessage) -> Result<ChatCompletionRequestMessage> {
    use openai_client::ChatCompletionRequestAssistantMessageArgs;
    let content = msg.content.clone();
    let openai_msg: ChatCompletionRequestMessage = match msg.role {
        MessageRole::System => ChatCompletionRequestSystemMessageArgs::default()
            .content(content)
            .build()?
            .into(),
        MessageRole::User => ChatCompletionRequestUserMessageArgs::default()
            .content(content)
            .build()?
            .into(),
        MessageRole::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
            .content(content)
            .build()?
            .into(),
    };
    Ok(openai_msg)
}
