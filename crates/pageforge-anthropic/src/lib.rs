// SPDX-FileCopyrightText: 2026 Pageforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Anthropic Claude provider adapter.
//!
//! Speaks the Messages API (`x-api-key` + `anthropic-version` headers,
//! system prompt as a dedicated field). Rate-limit backoff reads the
//! `retry-after` header on 429/529 responses.

pub mod client;
pub mod types;

pub use client::{AnthropicClient, ANTHROPIC_MODELS};

use std::time::Duration;

use async_trait::async_trait;
use pageforge_config::PageforgeConfig;
use pageforge_core::{
    ChatMessage, ChatParams, ChatProvider, Completion, HealthStatus, Integration,
    IntegrationKind, ModelSpec, PageforgeError, RateLimited,
};
use pageforge_provider::retry_after_backoff;

/// Anthropic Claude chat provider.
pub struct AnthropicProvider {
    client: AnthropicClient,
}

impl AnthropicProvider {
    pub fn new(
        api_key: String,
        api_version: String,
        timeout: Duration,
    ) -> Result<Self, PageforgeError> {
        Ok(Self {
            client: AnthropicClient::new(api_key, api_version, timeout)?,
        })
    }

    pub fn from_config(config: &PageforgeConfig) -> Result<Self, PageforgeError> {
        Self::new(
            config.providers.anthropic.api_key.clone(),
            config.providers.anthropic.api_version.clone(),
            Duration::from_secs(config.generation.request_timeout_secs),
        )
    }

    /// Overrides the base URL (wiremock tests).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.client = self.client.with_base_url(url);
        self
    }
}

#[async_trait]
impl Integration for AnthropicProvider {
    fn name(&self) -> &str {
        "anthropic"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn kind(&self) -> IntegrationKind {
        IntegrationKind::Provider
    }

    async fn health_check(&self) -> Result<HealthStatus, PageforgeError> {
        if self.client.is_configured() {
            Ok(HealthStatus::Healthy)
        } else {
            Ok(HealthStatus::Degraded("API key not set".to_string()))
        }
    }
}

#[async_trait]
impl ChatProvider for AnthropicProvider {
    fn models(&self) -> &[ModelSpec] {
        ANTHROPIC_MODELS
    }

    async fn query(
        &self,
        model: &str,
        messages: &[ChatMessage],
        params: &ChatParams,
    ) -> Result<Completion, PageforgeError> {
        self.client
            .complete_with_default_estimator(model, messages, params)
            .await
    }

    fn rate_limit_backoff(&self, pause: Duration, response: &RateLimited) -> Duration {
        retry_after_backoff(pause, response)
    }
}
