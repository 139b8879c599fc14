//! Terminal stage: prompt construction and the generation call.

use async_trait::async_trait;
use llm_client::LlmClient;
use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::{GenerationError, RagStage, RagState};

/// Joins the retrieved documents into a context blob, renders the RAG prompt, and stores the
/// model reply in `state.response` unmodified. Runs even when there are no documents.
pub struct GenerateStage {
    llm_client: Arc<dyn LlmClient>,
}

impl GenerateStage {
    pub fn new(llm_client: Arc<dyn LlmClient>) -> Self {
        Self { llm_client }
    }
}

#[async_trait]
impl RagStage for GenerateStage {
    fn name(&self) -> &'static str {
        "generate"
    }

    #[instrument(skip(self, state))]
    async fn run(&self, state: &mut RagState) -> Result<(), GenerationError> {
        let context = prompt::join_documents(&state.retrieved_documents);
        let prompt_text = prompt::build_rag_prompt(&context, &state.query);
        info!(
            documents = state.retrieved_documents.len(),
            context_len = context.len(),
            prompt_len = prompt_text.len(),
            "step: rag generate request"
        );

        let response = self.llm_client.complete(&prompt_text).await.map_err(|e| {
            error!(error = %e, "rag generate request failed");
            GenerationError::request(&e)
        })?;

        info!(response_len = response.len(), "step: rag generate done");
        state.response = Some(response);
        Ok(())
    }
}
