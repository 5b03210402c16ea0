//! CompletionClient trait — the abstraction over the remote LLM endpoint.
//!
//! A client knows how to send one constructed prompt to a completion
//! endpoint and return the reply text. The session never sees transport
//! details: any failure comes back as a [`CompletionError`] and is converted
//! into a fixed localized apology above this boundary.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::CompletionError;

/// A single completion request.
///
/// Carries the model identifier, a token budget, and the full constructed
/// prompt (system instructions + knowledge text + trailing transcript +
/// question + target language name) as one user message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// The model to use (e.g., "claude-sonnet-4-20250514")
    pub model: String,

    /// Maximum tokens to generate
    pub max_tokens: u32,

    /// The fully rendered prompt
    pub prompt: String,
}

/// A completed reply from the endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionReply {
    /// All textual content fragments, concatenated in response order,
    /// joined by newline.
    pub text: String,

    /// Which model actually responded (may differ from requested)
    pub model: String,
}

/// The core CompletionClient trait.
///
/// The session orchestrator calls `complete()` without knowing which
/// endpoint is behind it.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// A human-readable name for this client (e.g., "anthropic").
    fn name(&self) -> &str;

    /// Send a request and get the complete reply.
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> std::result::Result<CompletionReply, CompletionError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serialization() {
        let req = CompletionRequest {
            model: "claude-sonnet-4-20250514".into(),
            max_tokens: 1000,
            prompt: "KNOWLEDGE:\n...".into(),
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains("claude-sonnet-4-20250514"));
        assert!(json.contains("1000"));
    }
}
