//! Per-invocation pipeline state.

/// State carried through one pipeline run. `response` stays `None` until generation completes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RagState {
    pub query: String,
    pub retrieved_documents: Vec<String>,
    pub response: Option<String>,
}

impl RagState {
    pub fn new(query: impl Into<String>, retrieved_documents: Vec<String>) -> Self {
        Self {
            query: query.into(),
            retrieved_documents,
            response: None,
        }
    }
}
