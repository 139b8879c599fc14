use async_trait::async_trait;

use crate::{GenerationError, RagState};

/// One step of the pipeline. Reads and updates the shared [`RagState`].
#[async_trait]
pub trait RagStage: Send + Sync {
    /// Stable identifier used in logs and errors.
    fn name(&self) -> &'static str;

    async fn run(&self, state: &mut RagState) -> Result<(), GenerationError>;
}
