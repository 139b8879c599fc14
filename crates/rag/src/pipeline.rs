use llm_client::LlmClient;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::{GenerateStage, GenerationError, RagStage, RagState};

/// Fixed entry → stages in order → generate → fixed exit.
#[derive(Clone)]
pub struct RagPipeline {
    stages: Vec<Arc<dyn RagStage>>,
    generate: Arc<dyn RagStage>,
}

impl RagPipeline {
    /// Single-stage pipeline: generation only.
    pub fn new(llm_client: Arc<dyn LlmClient>) -> Self {
        Self {
            stages: Vec::new(),
            generate: Arc::new(GenerateStage::new(llm_client)),
        }
    }

    /// Appends a stage that runs before generation (after any previously added stages).
    pub fn with_stage_before_generate(mut self, stage: Arc<dyn RagStage>) -> Self {
        self.stages.push(stage);
        self
    }

    /// Stage names in execution order.
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages
            .iter()
            .chain(std::iter::once(&self.generate))
            .map(|s| s.name())
            .collect()
    }

    /// Runs every stage over `state` and returns it with `response` set.
    #[instrument(skip(self, state), fields(query_len = state.query.len(), documents = state.retrieved_documents.len()))]
    pub async fn invoke(&self, mut state: RagState) -> Result<RagState, GenerationError> {
        for stage in self.stages.iter().chain(std::iter::once(&self.generate)) {
            info!(stage = stage.name(), "step: rag stage started");
            stage.run(&mut state).await?;
        }
        if state.response.is_none() {
            return Err(GenerationError::NoResponse);
        }
        Ok(state)
    }

    /// Answers `query` from `documents`. An empty document set is not an error.
    pub async fn generate(
        &self,
        documents: Vec<String>,
        query: &str,
    ) -> Result<String, GenerationError> {
        let state = self.invoke(RagState::new(query, documents)).await?;
        state.response.ok_or(GenerationError::NoResponse)
    }
}
