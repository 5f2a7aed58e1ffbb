// SPDX-FileCopyrightText: 2026 Pageforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenAI chat provider adapter.
//!
//! Speaks the chat-completions wire shape via the shared [`CompatClient`].
//! Rate-limit backoff reads the `x-ratelimit-reset-requests` /
//! `x-ratelimit-reset-tokens` headers.

use std::time::Duration;

use async_trait::async_trait;
use pageforge_config::PageforgeConfig;
use pageforge_core::{
    ChatMessage, ChatParams, ChatProvider, Completion, HealthStatus, Integration,
    IntegrationKind, ModelSpec, PageforgeError, RateLimited, TuningParam,
};
use pageforge_provider::{ratelimit_reset_backoff, AuthScheme, CompatClient, ProviderDescriptor};

/// Reasoning models reject sampling parameters entirely.
const REASONING_UNSUPPORTED: &[TuningParam] = &[
    TuningParam::Temperature,
    TuningParam::TopP,
    TuningParam::FrequencyPenalty,
    TuningParam::PresencePenalty,
];

/// Known OpenAI models and their token ceilings.
pub const OPENAI_MODELS: &[ModelSpec] = &[
    ModelSpec::new("gpt-4o", 128_000, 16_384),
    ModelSpec::new("gpt-4o-mini", 128_000, 16_384),
    ModelSpec::new("gpt-4.1", 1_047_576, 32_768),
    ModelSpec::new("gpt-4.1-mini", 1_047_576, 32_768),
    ModelSpec::new("o4-mini", 200_000, 100_000).with_unsupported(REASONING_UNSUPPORTED),
];

/// OpenAI endpoint and auth shape.
pub const OPENAI: ProviderDescriptor = ProviderDescriptor {
    name: "openai",
    endpoint: "https://api.openai.com/v1/chat/completions",
    auth: AuthScheme::Bearer,
    account_url: "https://platform.openai.com/api-keys",
    models: OPENAI_MODELS,
};

/// OpenAI chat provider.
pub struct OpenAiProvider {
    client: CompatClient,
    configured: bool,
}

impl OpenAiProvider {
    pub fn new(api_key: String, timeout: Duration) -> Result<Self, PageforgeError> {
        let configured = !api_key.trim().is_empty();
        Ok(Self {
            client: CompatClient::new(OPENAI, api_key, timeout)?,
            configured,
        })
    }

    pub fn from_config(config: &PageforgeConfig) -> Result<Self, PageforgeError> {
        Self::new(
            config.providers.openai.api_key.clone(),
            Duration::from_secs(config.generation.request_timeout_secs),
        )
    }

    /// Overrides the endpoint URL (wiremock tests, compatible gateways).
    pub fn with_endpoint(mut self, url: impl Into<String>) -> Self {
        self.client = self.client.with_endpoint(url);
        self
    }
}

#[async_trait]
impl Integration for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
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
impl ChatProvider for OpenAiProvider {
    fn models(&self) -> &[ModelSpec] {
        OPENAI_MODELS
    }

    async fn query(
        &self,
        model: &str,
        messages: &[ChatMessage],
        params: &ChatParams,
    ) -> Result<Completion, PageforgeError> {
        self.client.query(model, messages, params).await
    }

    fn rate_limit_backoff(&self, pause: Duration, response: &RateLimited) -> Duration {
        ratelimit_reset_backoff(pause, response)
    }
}
