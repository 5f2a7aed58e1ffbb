// SPDX-FileCopyrightText: 2026 Pageforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mistral provider adapter (OpenAI-compatible wire shape).

use std::time::Duration;

use async_trait::async_trait;
use pageforge_config::PageforgeConfig;
use pageforge_core::{
    ChatMessage, ChatParams, ChatProvider, Completion, HealthStatus, Integration,
    IntegrationKind, ModelSpec, PageforgeError,
};
use pageforge_provider::{AuthScheme, CompatClient, ProviderDescriptor};

/// Known Mistral models and their token ceilings.
pub const MISTRAL_MODELS: &[ModelSpec] = &[
    ModelSpec::new("mistral-large-latest", 131_072, 32_768),
    ModelSpec::new("mistral-medium-latest", 131_072, 32_768),
    ModelSpec::new("mistral-small-latest", 131_072, 32_768),
    ModelSpec::new("open-mistral-nemo", 131_072, 16_384),
];

pub const MISTRAL: ProviderDescriptor = ProviderDescriptor {
    name: "mistral",
    endpoint: "https://api.mistral.ai/v1/chat/completions",
    auth: AuthScheme::Bearer,
    account_url: "https://console.mistral.ai/api-keys",
    models: MISTRAL_MODELS,
};

/// Mistral chat provider.
pub struct MistralProvider {
    client: CompatClient,
    configured: bool,
}

impl MistralProvider {
    pub fn new(api_key: String, timeout: Duration) -> Result<Self, PageforgeError> {
        let configured = !api_key.trim().is_empty();
        Ok(Self {
            client: CompatClient::new(MISTRAL, api_key, timeout)?,
            configured,
        })
    }

    pub fn from_config(config: &PageforgeConfig) -> Result<Self, PageforgeError> {
        Self::new(
            config.providers.mistral.api_key.clone(),
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
impl Integration for MistralProvider {
    fn name(&self) -> &str {
        "mistral"
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
impl ChatProvider for MistralProvider {
    fn models(&self) -> &[ModelSpec] {
        MISTRAL_MODELS
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
