//! # Prompt
//!
//! Builds the single prompt string sent to the generation model when answering a question
//! about channel messages.
//!
//! ## Format
//!
//! - **Context**: retrieved documents joined by a blank line ([`DOCUMENT_SEPARATOR`])
//! - **Question**: the user query, embedded verbatim
//!
//! ## Usage
//!
//! Used by the `rag` crate's generate stage. Chat-message types ([`ChatMessage`], [`MessageRole`])
//! are shared with `llm-client`, which converts them into provider requests.
//!
//! ## External interactions
//!
//! - **AI models**: Output is sent to LLM APIs (OpenAI-compatible).

/// Role of a message, one-to-one with OpenAI Chat Completions API `role` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    /// System instruction (API `role: "system"`).
    System,
    /// User message (API `role: "user"`).
    User,
    /// Assistant message (API `role: "assistant"`).
    Assistant,
}

/// A single chat message, one-to-one with one element of OpenAI `messages` array.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// Separator placed between documents in the context blob.
pub const DOCUMENT_SEPARATOR: &str = "\n\n";

/// Instruction template for answering a question from retrieved channel messages.
/// Placeholders: `{context}` and `{query}`.
pub const RAG_PROMPT_TEMPLATE: &str = "You are a helpful assistant answering questions based on the provided information.

Context information:
{context}

User question: {query}

Please provide a helpful, accurate, and concise answer based only on the context provided.
If the context doesn't contain relevant information to answer the question, say so rather than making up information.";

/// Joins documents into one context blob. An empty document set yields an empty string.
pub fn join_documents<I, D>(documents: I) -> String
where
    I: IntoIterator<Item = D>,
    D: AsRef<str>,
{
    let mut out = String::new();
    for (i, doc) in documents.into_iter().enumerate() {
        if i > 0 {
            out.push_str(DOCUMENT_SEPARATOR);
        }
        out.push_str(doc.as_ref());
    }
    out
}

/// Replaces `{name}` placeholders in `template` with the matching value.
///
/// Single pass over the template: substituted text is never scanned again, so user input
/// containing `{query}` or `{context}` is embedded as-is. Unknown placeholders are kept literally.
pub fn render_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                let name = &after[..close];
                match values.iter().find(|(key, _)| *key == name) {
                    Some((_, value)) => out.push_str(value),
                    None => {
                        out.push('{');
                        out.push_str(name);
                        out.push('}');
                    }
                }
                rest = &after[close + 1..];
            }
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

/// Builds the RAG prompt from a prepared context blob and the user query.
pub fn build_rag_prompt(context: &str, query: &str) -> String {
    render_template(RAG_PROMPT_TEMPLATE, &[("context", context), ("query", query)])
}
