// SPDX-FileCopyrightText: 2026 Pageforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! DeepSeek provider adapter (OpenAI-compatible wire shape).
//!
//! The reasoner model ignores sampling parameters, so they are stripped
//! from requests rather than rejected server-side mid-generation.

use std::time::Duration;

use async_trait::async_trait;
use pageforge_config::PageforgeConfig;
use pageforge_core::{
    ChatMessage, ChatParams, ChatProvider, Completion, HealthStatus, Integration,
    IntegrationKind, ModelSpec, PageforgeError, TuningParam,
};
use pageforge_provider::{AuthScheme, CompatClient, ProviderDescriptor};

const REASONER_UNSUPPORTED: &[TuningParam] = &[
    TuningParam::Temperature,
    TuningParam::TopP,
    TuningParam::FrequencyPenalty,
    TuningParam::PresencePenalty,
];

/// Known DeepSeek models and their token ceilings.
pub const DEEPSEEK_MODELS: &[ModelSpec] = &[
    ModelSpec::new("deepseek-chat", 65_536, 8_192),
    ModelSpec::new("deepseek-reasoner", 65_536, 65_536).with_unsupported(REASONER_UNSUPPORTED),
];

pub const DEEPSEEK: ProviderDescriptor = ProviderDescriptor {
    name: "deepseek",
    endpoint: "https://api.deepseek.com/chat/completions",
    auth: AuthScheme::Bearer,
    account_url: "https://platform.deepseek.com/api_keys",
    models: DEEPSEEK_MODELS,
};

/// DeepSeek chat provider.
pub struct DeepSeekProvider {
    client: CompatClient,
    configured: bool,
}

impl DeepSeekProvider {
    pub fn new(api_key: String, timeout: Duration) -> Result<Self, PageforgeError> {
        let configured = !api_key.trim().is_empty();
        Ok(Self {
            client: CompatClient::new(DEEPSEEK, api_key, timeout)?,
            configured,
        })
    }

    pub fn from_config(config: &PageforgeConfig) -> Result<Self, PageforgeError> {
        Self::new(
            config.providers.deepseek.api_key.clone(),
            Duration::from_secs(config.generation.request_timeout_secs),
        )
    }

    /// Overrides the endpoint URL (wiremock tests).
    pub fn with_endpoint(mut self, url: impl Into<String>) -> Self {
        self.client = self.client.with_endpoint(url);
        self
    }
}

#[async_trait]
impl Integration for DeepSeekProvider {
    fn name(&self) -> &str {
        "deepseek"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn kind(&self) -> IntegrationKind {
        IntegrationKind::Provider
    }

    async fn health_check(&self) -> Result<HealthStatus, PageforgeError> {
        if self.configured {
            Ok(HealthStatus::Healthy)
        } else {
            Ok(HealthStatus::Degraded("API key not set".to_string()))
        }
    }
}

#[async_trait]
impl ChatProvider for DeepSeekProvider {
    fn models(&self) -> &[ModelSpec] {
        DEEPSEEK_MODELS
    }

    async fn query(
        &self,
        model: &str,
        messages: &[ChatMessage],
        params: &ChatParams,
    ) -> Result<Completion, PageforgeError> {
        self.client.query(model, messages, params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, Request, ResponseTemplate};

    #[tokio::test]
    async fn reasoner_requests_carry_no_sampling_params() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(|req: &Request| {
                let body: serde_json::Value = serde_json::from_slice(&req.body).unwrap();
                assert!(body.get("temperature").is_none());
                assert!(body.get("frequency_penalty").is_none());
                ResponseTemplate::new(200).set_body_json(serde_json::json!({
                    "model": "deepseek-reasoner",
                    "choices": [{"message": {"role": "assistant", "content": "thought"}}]
                }))
            })
            .expect(1)
            .mount(&server)
            .await;

        let provider = DeepSeekProvider::new("ds-key".into(), Duration::from_secs(5))
            .unwrap()
            .with_endpoint(format!("{}/chat/completions", server.uri()));
        let params = ChatParams {
            temperature: Some(1.0),
            frequency_penalty: Some(0.4),
            ..Default::default()
        };
        let result = provider
            .query("deepseek-reasoner", &[ChatMessage::user("why")], &params)
            .await
            .unwrap();
        assert_eq!(result.text, "thought");
    }

    #[tokio::test]
    async fn chat_model_keeps_sampling_params() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(|req: &Request| {
                let body: serde_json::Value = serde_json::from_slice(&req.body).unwrap();
                assert_eq!(body["temperature"], serde_json::json!(1.0f32));
                ResponseTemplate::new(200).set_body_json(serde_json::json!({
                    "model": "deepseek-chat",
                    "choices": [{"message": {"role": "assistant", "content": "ok"}}]
                }))
            })
            .mount(&server)
            .await;

        let provider = DeepSeekProvider::new("ds-key".into(), Duration::from_secs(5))
            .unwrap()
            .with_endpoint(format!("{}/chat/completions", server.uri()));
        let params = ChatParams {
            temperature: Some(1.0),
            ..Default::default()
        };
        provider
            .query("deepseek-chat", &[ChatMessage::user("hi")], &params)
            .await
            .unwrap();
    }
}
