// SPDX-FileCopyrightText: 2026 Pageforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! xAI Grok provider adapter: chat completions plus image generation.

pub mod image;

pub use image::{XaiImageClient, IMAGE_MODEL};

use std::time::Duration;

use async_trait::async_trait;
use pageforge_config::PageforgeConfig;
use pageforge_core::{
    ChatMessage, ChatParams, ChatProvider, Completion, HealthStatus, Integration,
    IntegrationKind, ModelSpec, PageforgeError,
};
use pageforge_provider::{AuthScheme, CompatClient, ProviderDescriptor};

/// Known Grok chat models and their token ceilings.
pub const XAI_MODELS: &[ModelSpec] = &[
    ModelSpec::new("grok-3", 131_072, 16_384),
    ModelSpec::new("grok-3-mini", 131_072, 16_384),
    ModelSpec::new("grok-2-1212", 131_072, 16_384),
];

pub const XAI: ProviderDescriptor = ProviderDescriptor {
    name: "xai",
    endpoint: "https://api.x.ai/v1/chat/completions",
    auth: AuthScheme::Bearer,
    account_url: "https://console.x.ai",
    models: XAI_MODELS,
};

/// Grok chat provider.
pub struct XaiProvider {
    client: CompatClient,
    configured: bool,
}

impl XaiProvider {
    pub fn new(api_key: String, timeout: Duration) -> Result<Self, PageforgeError> {
        let configured = !api_key.trim().is_empty();
        Ok(Self {
            client: CompatClient::new(XAI, api_key, timeout)?,
            configured,
        })
    }

    pub fn from_config(config: &PageforgeConfig) -> Result<Self, PageforgeError> {
        Self::new(
            config.providers.xai.api_key.clone(),
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
impl Integration for XaiProvider {
    fn name(&self) -> &str {
        "xai"
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
impl ChatProvider for XaiProvider {
    fn models(&self) -> &[ModelSpec] {
        XAI_MODELS
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
