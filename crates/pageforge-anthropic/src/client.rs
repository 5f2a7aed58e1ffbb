// SPDX-FileCopyrightText: 2026 Pageforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Anthropic Messages API.
//!
//! Handles request construction, authentication headers, and error
//! normalization. Each call is one POST; rate-limit waits are advisory
//! (`retry-after`) and executed by the caller, never here.

use std::time::Duration;

use pageforge_core::{
    ChatMessage, ChatParams, ChatRole, Completion, HeuristicEstimator, ModelSpec, PageforgeError,
    TokenEstimator, TokenUsage,
};
use pageforge_provider::output_budget;
use reqwest::header::{HeaderMap, HeaderValue};
use tracing::debug;

use crate::types::{ApiErrorResponse, ApiMessage, MessageRequest, MessageResponse, ResponseContentBlock};

/// Base URL for the Anthropic Messages API.
const API_BASE_URL: &str = "https://api.anthropic.com/v1/messages";

/// Known Claude models and their token ceilings.
pub const ANTHROPIC_MODELS: &[ModelSpec] = &[
    ModelSpec::new("claude-sonnet-4-20250514", 200_000, 64_000),
    ModelSpec::new("claude-opus-4-20250514", 200_000, 32_000),
    ModelSpec::new("claude-haiku-4-5-20250901", 200_000, 64_000),
];

/// HTTP client for Anthropic API communication.
#[derive(Debug, Clone)]
pub struct AnthropicClient {
    client: reqwest::Client,
    configured: bool,
    base_url: String,
}

impl AnthropicClient {
    /// Creates a new Anthropic API client.
    ///
    /// An empty `api_key` defers the configuration error to `complete`,
    /// matching the other providers.
    pub fn new(
        api_key: String,
        api_version: String,
        timeout: Duration,
    ) -> Result<Self, PageforgeError> {
        let configured = !api_key.trim().is_empty();
        let mut headers = HeaderMap::new();
        if configured {
            headers.insert(
                "x-api-key",
                HeaderValue::from_str(&api_key).map_err(|e| {
                    PageforgeError::Config(format!("invalid API key header value: {e}"))
                })?,
            );
        }
        headers.insert(
            "anthropic-version",
            HeaderValue::from_str(&api_version).map_err(|e| {
                PageforgeError::Config(format!("invalid API version header value: {e}"))
            })?,
        );
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| PageforgeError::Provider {
                message: format!("anthropic: failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            configured,
            base_url: API_BASE_URL.to_string(),
        })
    }

    pub fn is_configured(&self) -> bool {
        self.configured
    }

    /// Overrides the base URL (wiremock tests).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sends one completion request and returns the normalized result.
    pub async fn complete(
        &self,
        model: &str,
        messages: &[ChatMessage],
        params: &ChatParams,
        estimator: &dyn TokenEstimator,
    ) -> Result<Completion, PageforgeError> {
        if !self.configured {
            return Err(PageforgeError::Config(
                "anthropic API key not set; create one at https://console.anthropic.com".into(),
            ));
        }

        let spec = ANTHROPIC_MODELS
            .iter()
            .find(|m| m.id == model)
            .ok_or_else(|| PageforgeError::provider("anthropic", format!("unknown model `{model}`")))?;

        let max_tokens = output_budget(spec, estimator, messages)?;

        // System turns travel in the dedicated field, not the message list.
        let system: Vec<&str> = messages
            .iter()
            .filter(|m| m.role == ChatRole::System)
            .map(|m| m.content.as_str())
            .collect();
        let request = MessageRequest {
            model: model.to_string(),
            messages: messages
                .iter()
                .filter(|m| m.role != ChatRole::System)
                .map(|m| ApiMessage {
                    role: match m.role {
                        ChatRole::Assistant => "assistant".to_string(),
                        _ => "user".to_string(),
                    },
                    content: m.content.clone(),
                })
                .collect(),
            system: if system.is_empty() {
                None
            } else {
                Some(system.join("\n\n"))
            },
            max_tokens,
            temperature: params.temperature,
            top_p: params.top_p,
        };

        let response = self
            .client
            .post(&self.base_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| PageforgeError::transport("anthropic", e))?;

        let status = response.status();
        debug!(status = %status, model, "completion response received");

        let body = response
            .text()
            .await
            .map_err(|e| PageforgeError::transport("anthropic", e))?;

        if !status.is_success() {
            let message = match serde_json::from_str::<ApiErrorResponse>(&body) {
                Ok(api_err) => format!(
                    "API error ({}): {}",
                    api_err.error.type_, api_err.error.message
                ),
                Err(_) => format!("API returned {status}: {body}"),
            };
            return Err(PageforgeError::provider("anthropic", message));
        }

        let parsed: MessageResponse = serde_json::from_str(&body).map_err(|e| {
            PageforgeError::provider("anthropic", format!("failed to parse API response: {e}"))
        })?;

        let text = parsed
            .content
            .iter()
            .find_map(|block| match block {
                ResponseContentBlock::Text { text } => Some(text.as_str()),
                ResponseContentBlock::Other => None,
            })
            .ok_or_else(|| {
                PageforgeError::provider("anthropic", "response contained no text block")
            })?;

        Ok(Completion {
            text: text.trim().to_string(),
            model: parsed.model,
            usage: Some(TokenUsage {
                input_tokens: parsed.usage.input_tokens,
                output_tokens: parsed.usage.output_tokens,
            }),
        })
    }

    /// Convenience wrapper using the default heuristic estimator.
    pub async fn complete_with_default_estimator(
        &self,
        model: &str,
        messages: &[ChatMessage],
        params: &ChatParams,
    ) -> Result<Completion, PageforgeError> {
        self.complete(model, messages, params, &HeuristicEstimator::default())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: &str) -> AnthropicClient {
        AnthropicClient::new(
            "test-api-key".into(),
            "2023-06-01".into(),
            Duration::from_secs(5),
        )
        .unwrap()
        .with_base_url(base_url.to_string())
    }

    fn response_body(text: &str) -> serde_json::Value {
        serde_json::json!({
            "id": "msg_test",
            "type": "message",
            "role": "assistant",
            "content": [{"type": "text", "text": text}],
            "model": "claude-sonnet-4-20250514",
            "stop_reason": "end_turn",
            "usage": {"input_tokens": 10, "output_tokens": 5}
        })
    }

    #[tokio::test]
    async fn complete_success_trims_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/"))
            .and(header("x-api-key", "test-api-key"))
            .and(header("anthropic-version", "2023-06-01"))
            .respond_with(ResponseTemplate::new(200).set_body_json(response_body("  Hi there!  ")))
            .mount(&server)
            .await;

        let result = test_client(&server.uri())
            .complete_with_default_estimator(
                "claude-sonnet-4-20250514",
                &[ChatMessage::user("Hello")],
                &ChatParams::default(),
            )
            .await
            .unwrap();
        assert_eq!(result.text, "Hi there!");
        assert_eq!(result.usage.unwrap().input_tokens, 10);
    }

    #[tokio::test]
    async fn system_messages_move_to_system_field() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(serde_json::json!({
                "system": "Write like a local.",
                "messages": [{"role": "user", "content": "Describe Bergen"}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(response_body("ok")))
            .expect(1)
            .mount(&server)
            .await;

        test_client(&server.uri())
            .complete_with_default_estimator(
                "claude-sonnet-4-20250514",
                &[
                    ChatMessage::system("Write like a local."),
                    ChatMessage::user("Describe Bergen"),
                ],
                &ChatParams::default(),
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn missing_key_is_a_config_error() {
        let client = AnthropicClient::new(
            String::new(),
            "2023-06-01".into(),
            Duration::from_secs(5),
        )
        .unwrap();
        let err = client
            .complete_with_default_estimator(
                "claude-sonnet-4-20250514",
                &[ChatMessage::user("hi")],
                &ChatParams::default(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, PageforgeError::Config(_)));
    }

    #[tokio::test]
    async fn api_error_payload_is_wrapped() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": {"type": "invalid_request_error", "message": "Bad model"}
            })))
            .mount(&server)
            .await;

        let err = test_client(&server.uri())
            .complete_with_default_estimator(
                "claude-sonnet-4-20250514",
                &[ChatMessage::user("hi")],
                &ChatParams::default(),
            )
            .await
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("anthropic"), "got: {msg}");
        assert!(msg.contains("invalid_request_error"), "got: {msg}");
    }

    #[tokio::test]
    async fn oversized_prompt_never_reaches_the_wire() {
        let server = MockServer::start().await;
        // No mock mounted; a request would fail loudly.
        let err = test_client(&server.uri())
            .complete_with_default_estimator(
                "claude-sonnet-4-20250514",
                &[ChatMessage::user("x".repeat(900_000))], // 225k tokens > 200k
                &ChatParams::default(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, PageforgeError::PromptTooLong { .. }));
    }
}
