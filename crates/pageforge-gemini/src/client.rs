// SPDX-FileCopyrightText: 2026 Pageforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Gemini generateContent API.
//!
//! Gemini's wire shape differs from the chat-completions family: turns are
//! `contents` with `parts`, the assistant role is "model", and sampling
//! parameters live in a camelCase `generationConfig` object.

use std::time::Duration;

use pageforge_core::{
    ChatMessage, ChatParams, ChatRole, Completion, HeuristicEstimator, ModelSpec, PageforgeError,
    TokenEstimator, TokenUsage,
};
use pageforge_provider::output_budget;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Base URL for the Gemini API.
const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Known Gemini models and their token ceilings.
pub const GEMINI_MODELS: &[ModelSpec] = &[
    ModelSpec::new("gemini-2.5-pro", 65_536, 65_536),
    ModelSpec::new("gemini-2.5-flash", 65_536, 65_536),
    ModelSpec::new("gemini-2.0-flash", 32_768, 8_192),
];

// --- Wire types ---

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    max_output_tokens: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
    #[serde(default)]
    model_version: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
    #[serde(default)]
    status: Option<String>,
}

// --- Client ---

/// HTTP client for Gemini API communication.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: String, timeout: Duration) -> Result<Self, PageforgeError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PageforgeError::Provider {
                message: format!("gemini: failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;
        Ok(Self {
            client,
            api_key,
            base_url: API_BASE_URL.to_string(),
        })
    }

    pub fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// Overrides the base URL (wiremock tests).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// One generateContent call, normalized into `(error | trimmed text)`.
    pub async fn generate(
        &self,
        model: &str,
        messages: &[ChatMessage],
        params: &ChatParams,
        estimator: &dyn TokenEstimator,
    ) -> Result<Completion, PageforgeError> {
        if !self.is_configured() {
            return Err(PageforgeError::Config(
                "gemini API key not set; create one at https://aistudio.google.com/apikey".into(),
            ));
        }

        let spec = GEMINI_MODELS
            .iter()
            .find(|m| m.id == model)
            .ok_or_else(|| PageforgeError::provider("gemini", format!("unknown model `{model}`")))?;

        let max_output_tokens = output_budget(spec, estimator, messages)?;

        let system: Vec<Part> = messages
            .iter()
            .filter(|m| m.role == ChatRole::System)
            .map(|m| Part {
                text: m.content.clone(),
            })
            .collect();
        let request = GenerateContentRequest {
            contents: messages
                .iter()
                .filter(|m| m.role != ChatRole::System)
                .map(|m| Content {
                    role: Some(match m.role {
                        ChatRole::Assistant => "model".to_string(),
                        _ => "user".to_string(),
                    }),
                    parts: vec![Part {
                        text: m.content.clone(),
                    }],
                })
                .collect(),
            system_instruction: if system.is_empty() {
                None
            } else {
                Some(Content {
                    role: None,
                    parts: system,
                })
            },
            generation_config: GenerationConfig {
                temperature: params.temperature,
                top_p: params.top_p,
                max_output_tokens,
            },
        };

        let url = format!("{}/models/{model}:generateContent", self.base_url);
        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| PageforgeError::transport("gemini", e))?;

        let status = response.status();
        debug!(status = %status, model, "generateContent response received");

        let body = response
            .text()
            .await
            .map_err(|e| PageforgeError::transport("gemini", e))?;

        if !status.is_success() {
            let message = match serde_json::from_str::<ErrorResponse>(&body) {
                Ok(err) => match err.error.status {
                    Some(s) => format!("API error ({s}): {}", err.error.message),
                    None => format!("API error: {}", err.error.message),
                },
                Err(_) => format!("API returned {status}: {body}"),
            };
            return Err(PageforgeError::provider("gemini", message));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body).map_err(|e| {
            PageforgeError::provider("gemini", format!("failed to parse API response: {e}"))
        })?;

        let text = parsed
            .candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .and_then(|c| c.parts.first())
            .map(|p| p.text.as_str())
            .ok_or_else(|| PageforgeError::provider("gemini", "response contained no candidates"))?;

        Ok(Completion {
            text: text.trim().to_string(),
            model: parsed.model_version.unwrap_or_else(|| model.to_string()),
            usage: parsed.usage_metadata.map(|u| TokenUsage {
                input_tokens: u.prompt_token_count,
                output_tokens: u.candidates_token_count,
            }),
        })
    }

    /// Convenience wrapper using the default heuristic estimator.
    pub async fn generate_with_default_estimator(
        &self,
        model: &str,
        messages: &[ChatMessage],
        params: &ChatParams,
    ) -> Result<Completion, PageforgeError> {
        self.generate(model, messages, params, &HeuristicEstimator::default())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: &str) -> GeminiClient {
        GeminiClient::new("g-test-key".into(), Duration::from_secs(5))
            .unwrap()
            .with_base_url(base_url.to_string())
    }

    fn response_body(text: &str) -> serde_json::Value {
        serde_json::json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": text}]},
                "finishReason": "STOP"
            }],
            "usageMetadata": {"promptTokenCount": 6, "candidatesTokenCount": 4},
            "modelVersion": "gemini-2.5-pro"
        })
    }

    #[tokio::test]
    async fn generate_success_returns_trimmed_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/gemini-2.5-pro:generateContent"))
            .and(header("x-goog-api-key", "g-test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(response_body(" Fjord facts. ")))
            .mount(&server)
            .await;

        let result = test_client(&server.uri())
            .generate_with_default_estimator(
                "gemini-2.5-pro",
                &[ChatMessage::user("weather")],
                &ChatParams::default(),
            )
            .await
            .unwrap();
        assert_eq!(result.text, "Fjord facts.");
        assert_eq!(result.model, "gemini-2.5-pro");
        assert_eq!(result.usage.unwrap().output_tokens, 4);
    }

    #[tokio::test]
    async fn sixty_thousand_token_prompt_fits_the_ceiling() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(response_body("ok")))
            .mount(&server)
            .await;

        // 240_000 chars -> 60_000 tokens, under the 65_536 ceiling.
        let result = test_client(&server.uri())
            .generate_with_default_estimator(
                "gemini-2.5-flash",
                &[ChatMessage::user("x".repeat(240_000))],
                &ChatParams::default(),
            )
            .await;
        assert!(result.is_ok(), "got {result:?}");
    }

    #[tokio::test]
    async fn seventy_thousand_token_prompt_is_too_long() {
        let server = MockServer::start().await;
        // 280_000 chars -> 70_000 tokens, over the 65_536 ceiling.
        let err = test_client(&server.uri())
            .generate_with_default_estimator(
                "gemini-2.5-pro",
                &[ChatMessage::user("x".repeat(280_000))],
                &ChatParams::default(),
            )
            .await
            .unwrap_err();
        match err {
            PageforgeError::PromptTooLong { estimated, limit, .. } => {
                assert_eq!(estimated, 70_000);
                assert_eq!(limit, 65_536);
            }
            other => panic!("expected PromptTooLong, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn system_turns_become_system_instruction() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(serde_json::json!({
                "systemInstruction": {"parts": [{"text": "Be concise."}]},
                "contents": [{"role": "user", "parts": [{"text": "hi"}]}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(response_body("ok")))
            .expect(1)
            .mount(&server)
            .await;

        test_client(&server.uri())
            .generate_with_default_estimator(
                "gemini-2.5-pro",
                &[ChatMessage::system("Be concise."), ChatMessage::user("hi")],
                &ChatParams::default(),
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn missing_key_is_a_config_error() {
        let client = GeminiClient::new(String::new(), Duration::from_secs(5)).unwrap();
        let err = client
            .generate_with_default_estimator(
                "gemini-2.5-pro",
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
                "error": {"code": 400, "message": "API key not valid", "status": "INVALID_ARGUMENT"}
            })))
            .mount(&server)
            .await;

        let err = test_client(&server.uri())
            .generate_with_default_estimator(
                "gemini-2.5-pro",
                &[ChatMessage::user("hi")],
                &ChatParams::default(),
            )
            .await
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("INVALID_ARGUMENT"), "got: {msg}");
    }
}
