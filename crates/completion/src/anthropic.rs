//! Anthropic Messages API client.
//!
//! Sends the fully constructed prompt as a single user message and collects
//! the reply text from the response content blocks.
//!
//! Features:
//! - `x-api-key` header authentication (not Bearer)
//! - `anthropic-version` header
//! - Textual content fragments concatenated in response order, joined by
//!   newline; absent/malformed fragments contribute nothing
//!
//! No automatic retry, and no timeout beyond the transport default. A
//! failure surfaces once and becomes the session's apology reply; callers
//! that want a timeout can wrap the trait.

use askdesk_core::completion::{CompletionClient, CompletionReply, CompletionRequest};
use askdesk_core::error::CompletionError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

const ANTHROPIC_VERSION: &str = "2023-06-01";
const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";

/// Anthropic Messages API completion client.
pub struct AnthropicClient {
    name: String,
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl AnthropicClient {
    /// Create a new Anthropic client.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            name: "anthropic".into(),
            base_url: DEFAULT_BASE_URL.into(),
            api_key: api_key.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Create with a custom base URL (e.g., for testing or proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Join all textual content fragments in response order.
    fn reply_text(blocks: &[ResponseContentBlock]) -> String {
        blocks
            .iter()
            .filter_map(|b| b.text.as_deref())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[async_trait]
impl CompletionClient for AnthropicClient {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> std::result::Result<CompletionReply, CompletionError> {
        let url = format!("{}/v1/messages", self.base_url);

        let body = ApiRequest {
            model: request.model.clone(),
            max_tokens: request.max_tokens,
            messages: vec![ApiMessage {
                role: "user".into(),
                content: request.prompt,
            }],
        };

        debug!(model = %request.model, "Sending completion request");

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| CompletionError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        if status != 200 {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status, body = %error_body, "Completion API error");
            return Err(CompletionError::ApiError {
                status_code: status,
                message: error_body,
            });
        }

        let api_resp: ApiResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::MalformedResponse(e.to_string()))?;

        Ok(CompletionReply {
            text: Self::reply_text(&api_resp.content),
            model: api_resp.model,
        })
    }
}

// --- Anthropic API types ---

#[derive(Debug, Serialize)]
struct ApiRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<ApiMessage>,
}

#[derive(Debug, Serialize)]
struct ApiMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    model: String,
    content: Vec<ResponseContentBlock>,
}

/// One response content block. Only the optional `text` field matters here;
/// blocks without it (tool use, thinking, unknown kinds) contribute nothing.
#[derive(Debug, Deserialize)]
struct ResponseContentBlock {
    #[serde(default)]
    text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructor() {
        let client = AnthropicClient::new("sk-ant-test");
        assert_eq!(client.name(), "anthropic");
        assert_eq!(client.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn constructor_with_base_url() {
        let client = AnthropicClient::new("sk-ant-test").with_base_url("https://proxy.example.com/");
        assert_eq!(client.base_url, "https://proxy.example.com");
    }

    #[test]
    fn parse_text_response() {
        let resp: ApiResponse = serde_json::from_str(
            r#"{
                "id": "msg_01",
                "model": "claude-sonnet-4-20250514",
                "content": [{"type": "text", "text": "Hello!"}],
                "usage": {"input_tokens": 10, "output_tokens": 5}
            }"#,
        )
        .unwrap();
        assert_eq!(AnthropicClient::reply_text(&resp.content), "Hello!");
        assert_eq!(resp.model, "claude-sonnet-4-20250514");
    }

    #[test]
    fn fragments_joined_by_newline() {
        let resp: ApiResponse = serde_json::from_str(
            r#"{
                "model": "claude-sonnet-4-20250514",
                "content": [
                    {"type": "text", "text": "First part."},
                    {"type": "text", "text": "Second part."}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(
            AnthropicClient::reply_text(&resp.content),
            "First part.\nSecond part."
        );
    }

    #[test]
    fn textless_fragments_contribute_nothing() {
        let resp: ApiResponse = serde_json::from_str(
            r#"{
                "model": "claude-sonnet-4-20250514",
                "content": [
                    {"type": "tool_use", "id": "toolu_1", "name": "x", "input": {}},
                    {"type": "text", "text": "Answer."}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(AnthropicClient::reply_text(&resp.content), "Answer.");
    }

    #[test]
    fn empty_content_yields_empty_text() {
        let resp: ApiResponse =
            serde_json::from_str(r#"{"model": "m", "content": []}"#).unwrap();
        assert_eq!(AnthropicClient::reply_text(&resp.content), "");
    }

    #[test]
    fn request_body_shape() {
        let body = ApiRequest {
            model: "claude-sonnet-4-20250514".into(),
            max_tokens: 1000,
            messages: vec![ApiMessage {
                role: "user".into(),
                content: "the prompt".into(),
            }],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "claude-sonnet-4-20250514");
        assert_eq!(json["max_tokens"], 1000);
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "the prompt");
    }
}
