// SPDX-FileCopyrightText: 2026 Pageforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenRouter provider adapter.
//!
//! OpenRouter fronts many upstream models behind one OpenAI-compatible
//! endpoint and asks callers to attribute requests via `HTTP-Referer` and
//! `X-Title` headers.

use std::time::Duration;

use async_trait::async_trait;
use pageforge_config::PageforgeConfig;
use pageforge_core::{
    ChatMessage, ChatParams, ChatProvider, Completion, HealthStatus, Integration,
    IntegrationKind, ModelSpec, PageforgeError,
};
use pageforge_provider::{AuthScheme, CompatClient, ProviderDescriptor};

/// A small default table; OpenRouter routes thousands of ids, these are the
/// ones the generation UI offers out of the box.
pub const OPENROUTER_MODELS: &[ModelSpec] = &[
    ModelSpec::new("openai/gpt-4o", 128_000, 16_384),
    ModelSpec::new("anthropic/claude-sonnet-4", 200_000, 64_000),
    ModelSpec::new("google/gemini-2.5-flash", 65_536, 65_536),
    ModelSpec::new("meta-llama/llama-3.3-70b-instruct", 131_072, 16_384),
];

pub const OPENROUTER: ProviderDescriptor = ProviderDescriptor {
    name: "openrouter",
    endpoint: "https://openrouter.ai/api/v1/chat/completions",
    auth: AuthScheme::Bearer,
    account_url: "https://openrouter.ai/keys",
    models: OPENROUTER_MODELS,
};

/// OpenRouter chat provider.
pub struct OpenRouterProvider {
    client: CompatClient,
    configured: bool,
}

impl OpenRouterProvider {
    pub fn new(
        api_key: String,
        referer: String,
        title: String,
        timeout: Duration,
    ) -> Result<Self, PageforgeError> {
        let configured = !api_key.trim().is_empty();
        Ok(Self {
            client: CompatClient::new(OPENROUTER, api_key, timeout)?
                .with_header("HTTP-Referer", referer)
                .with_header("X-Title", title),
            configured,
        })
    }

    pub fn from_config(config: &PageforgeConfig) -> Result<Self, PageforgeError> {
        let or = &config.providers.openrouter;
        Self::new(
            or.api_key.clone(),
            or.referer.clone(),
            or.title.clone(),
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
impl Integration for OpenRouterProvider {
    fn name(&self) -> &str {
        "openrouter"
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
impl ChatProvider for OpenRouterProvider {
    fn models(&self) -> &[ModelSpec] {
        OPENROUTER_MODELS
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
