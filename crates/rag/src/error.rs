use thiserror::Error;

/// Failure of the generation pipeline. Not retried; reported once to the caller.
#[derive(Error, Debug)]
pub enum GenerationError {
    /// The generation service call failed (network, quota, malformed response).
    #[error("generation request failed: {0}")]
    Request(String),

    /// A stage other than generation failed.
    #[error("stage {stage} failed: {message}")]
    Stage { stage: String, message: String },

    /// All stages ran but none produced a response.
    #[error("pipeline finished without a response")]
    NoResponse,
}

impl GenerationError {
    /// Wraps an upstream error, keeping its full cause chain in the message.
    pub fn request(err: &anyhow::Error) -> Self {
        Self::Request(format!("{:#}", err))
    }
}
