//! # rag
//!
//! Answers a question from a set of retrieved documents (channel message texts). The pipeline is
//! an ordered list of [`RagStage`]s run over one [`RagState`]; the default pipeline has a single
//! [`GenerateStage`] that builds the prompt and calls the [`llm_client::LlmClient`].
//!
//! Stages added with [`RagPipeline::with_stage_before_generate`] (e.g. ranking) run ahead of
//! generation without changing [`RagPipeline::generate`].

mod error;
mod generate;
mod pipeline;
mod stage;
mod state;

pub use error::GenerationError;
pub use generate::GenerateStage;
pub use pipeline::RagPipeline;
pub use stage::RagStage;
pub use state::RagState;
