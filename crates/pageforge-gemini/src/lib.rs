// SPDX-FileCopyrightText: 2026 Pageforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Google Gemini provider adapter.

pub mod client;

pub use client::{GeminiClient, GEMINI_MODELS};

use std::time::Duration;

use async_trait::async_trait;
use pageforge_config::PageforgeConfig;
use pageforge_core::{
    ChatMessage, ChatParams, ChatProvider, Completion, HealthStatus, Integration,
    IntegrationKind, ModelSpec, PageforgeError,
};

/// Gemini chat provider.
pub struct GeminiProvider {
    client: GeminiClient,
}

impl GeminiProvider {
    pub fn new(api_key: String, timeout: Duration) -> Result<Self, PageforgeError> {
        Ok(Self {
            client: GeminiClient::new(api_key, timeout)?,
        })
    }

    pub fn from_config(config: &PageforgeConfig) -> Result<Self, PageforgeError> {
        Self::new(
            config.providers.gemini.api_key.clone(),
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
impl Integration for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
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
impl ChatProvider for GeminiProvider {
    fn models(&self) -> &[ModelSpec] {
        GEMINI_MODELS
    }

    async fn query(
        &self,
        model: &str,
        messages: &[ChatMessage],
        params: &ChatParams,
    ) -> Result<Completion, PageforgeError> {
        self.client
            .generate_with_default_estimator(model, messages, params)
            .await
    }
}
