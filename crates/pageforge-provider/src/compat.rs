// SPDX-FileCopyrightText: 2026 Pageforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Generic client for OpenAI-compatible chat-completions endpoints.
//!
//! Most chat providers in this workspace (OpenAI, Mistral, DeepSeek, Grok,
//! Perplexity, Qwen, OpenRouter) speak the same wire shape and differ only
//! in endpoint, auth, and model table -- exactly what a
//! [`ProviderDescriptor`] carries. Each query is one POST, normalized into
//! `(error | trimmed text)`. No retries here.

use std::sync::Arc;
use std::time::Duration;

use pageforge_core::{
    ChatMessage, ChatParams, Completion, HeuristicEstimator, PageforgeError, TokenEstimator,
    TokenUsage,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::budget::output_budget;
use crate::descriptor::{AuthScheme, ProviderDescriptor};

// --- Wire types ---

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    frequency_penalty: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    presence_penalty: Option<f32>,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    usage: Option<WireUsage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireUsage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
    #[serde(rename = "type", default)]
    type_: Option<String>,
}

// --- Client ---

/// One provider's HTTP client, parameterized by its descriptor.
pub struct CompatClient {
    http: reqwest::Client,
    descriptor: ProviderDescriptor,
    api_key: String,
    estimator: Arc<dyn TokenEstimator>,
    endpoint: String,
    extra_headers: Vec<(String, String)>,
}

impl CompatClient {
    /// Creates a client for the given descriptor.
    ///
    /// An empty `api_key` is allowed here; `query` reports the
    /// configuration error, so a misconfigured provider still registers
    /// and surfaces a clear message on first use.
    pub fn new(
        descriptor: ProviderDescriptor,
        api_key: String,
        timeout: Duration,
    ) -> Result<Self, PageforgeError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PageforgeError::Provider {
                message: format!("{}: failed to build HTTP client: {e}", descriptor.name),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            http,
            endpoint: descriptor.endpoint.to_string(),
            descriptor,
            api_key,
            estimator: Arc::new(HeuristicEstimator::default()),
            extra_headers: Vec::new(),
        })
    }

    /// Substitute a different token estimator.
    pub fn with_estimator(mut self, estimator: Arc<dyn TokenEstimator>) -> Self {
        self.estimator = estimator;
        self
    }

    /// Overrides the endpoint URL (wiremock tests, self-hosted gateways).
    pub fn with_endpoint(mut self, url: impl Into<String>) -> Self {
        self.endpoint = url.into();
        self
    }

    /// Adds a static header to every request (attribution headers etc.).
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.push((name.into(), value.into()));
        self
    }

    pub fn descriptor(&self) -> &ProviderDescriptor {
        &self.descriptor
    }

    /// One chat completion: budget check, single POST, normalized result.
    pub async fn query(
        &self,
        model: &str,
        messages: &[ChatMessage],
        params: &ChatParams,
    ) -> Result<Completion, PageforgeError> {
        let name = self.descriptor.name;

        if self.api_key.trim().is_empty() {
            return Err(PageforgeError::Config(format!(
                "{name} API key not set; create one at {}",
                self.descriptor.account_url
            )));
        }

        let spec = self.descriptor.model(model).ok_or_else(|| {
            PageforgeError::provider(name, format!("unknown model `{model}`"))
        })?;

        let max_tokens = output_budget(spec, self.estimator.as_ref(), messages)?;
        let params = params.strip(spec.unsupported);

        let body = ChatCompletionRequest {
            model,
            messages: messages
                .iter()
                .map(|m| WireMessage {
                    role: role_str(m.role),
                    content: &m.content,
                })
                .collect(),
            max_tokens,
            temperature: params.temperature,
            top_p: params.top_p,
            frequency_penalty: params.frequency_penalty,
            presence_penalty: params.presence_penalty,
            stream: false,
        };

        let mut request = self.http.post(&self.endpoint).json(&body);
        request = match self.descriptor.auth {
            AuthScheme::Bearer => request.bearer_auth(&self.api_key),
            AuthScheme::Header(header) => request.header(header, &self.api_key),
            AuthScheme::QueryParam(param) => request.query(&[(param, self.api_key.as_str())]),
        };
        for (header, value) in &self.extra_headers {
            request = request.header(header, value);
        }

        let response = request
            .send()
            .await
            .map_err(|e| PageforgeError::transport(name, e))?;

        let status = response.status();
        debug!(provider = name, status = %status, model, "completion response received");

        let text = response
            .text()
            .await
            .map_err(|e| PageforgeError::transport(name, e))?;

        if !status.is_success() {
            return Err(PageforgeError::provider(name, error_message(status, &text)));
        }

        // A 200 body can still carry an error field on some gateways.
        if let Ok(err) = serde_json::from_str::<ErrorResponse>(&text) {
            return Err(PageforgeError::provider(name, err.error.message));
        }

        let parsed: ChatCompletionResponse = serde_json::from_str(&text)
            .map_err(|e| PageforgeError::provider(name, format!("unexpected response: {e}")))?;

        let content = parsed
            .choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .ok_or_else(|| PageforgeError::provider(name, "response contained no completion"))?;

        Ok(Completion {
            text: content.trim().to_string(),
            model: parsed.model.unwrap_or_else(|| model.to_string()),
            usage: parsed.usage.map(|u| TokenUsage {
                input_tokens: u.prompt_tokens,
                output_tokens: u.completion_tokens,
            }),
        })
    }
}

fn role_str(role: pageforge_core::ChatRole) -> &'static str {
    match role {
        pageforge_core::ChatRole::System => "system",
        pageforge_core::ChatRole::User => "user",
        pageforge_core::ChatRole::Assistant => "assistant",
    }
}

/// Human-readable message for a non-success response, preferring the
/// provider's own error payload over the raw body.
fn error_message(status: reqwest::StatusCode, body: &str) -> String {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(err) => match err.error.type_ {
            Some(type_) => format!("API error ({type_}): {}", err.error.message),
            None => format!("API error: {}", err.error.message),
        },
        Err(_) => format!("API returned {status}: {body}"),
    }
}
