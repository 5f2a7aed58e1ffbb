// SPDX-FileCopyrightText: 2026 Pageforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Perplexity provider adapter (OpenAI-compatible wire shape).
//!
//! Perplexity completions are search-grounded, which makes them the
//! research-flavored choice among the chat providers.

use std::time::Duration;

use async_trait::async_trait;
use pageforge_config::PageforgeConfig;
use pageforge_core::{
    ChatMessage, ChatParams, ChatProvider, Completion, HealthStatus, Integration,
    IntegrationKind, ModelSpec, PageforgeError,
};
use pageforge_provider::{AuthScheme, CompatClient, ProviderDescriptor};

/// Known Perplexity models and their token ceilings.
pub const PERPLEXITY_MODELS: &[ModelSpec] = &[
    ModelSpec::new("sonar", 127_072, 8_192),
    ModelSpec::new("sonar-pro", 200_000, 8_192),
    ModelSpec::new("sonar-reasoning", 127_072, 8_192),
];

pub const PERPLEXITY: ProviderDescriptor = ProviderDescriptor {
    name: "perplexity",
    endpoint: "https://api.perplexity.ai/chat/completions",
    auth: AuthScheme::Bearer,
    account_url: "https://www.perplexity.ai/settings/api",
    models: PERPLEXITY_MODELS,
};

/// Perplexity chat provider.
pub struct PerplexityProvider {
    client: CompatClient,
    configured: bool,
}

impl PerplexityProvider {
    pub fn new(api_key: String, timeout: Duration) -> Result<Self, PageforgeError> {
        let configured = !api_key.trim().is_empty();
        Ok(Self {
            client: CompatClient::new(PERPLEXITY, api_key, timeout)?,
            configured,
        })
    }

    pub fn from_config(config: &PageforgeConfig) -> Result<Self, PageforgeError> {
        Self::new(
            config.providers.perplexity.api_key.clone(),
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
impl Integration for PerplexityProvider {
    fn name(&self) -> &str {
        "perplexity"
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
impl ChatProvider for PerplexityProvider {
    fn models(&self) -> &[ModelSpec] {
        PERPLEXITY_MODELS
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
