// SPDX-FileCopyrightText: 2026 Pageforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Alibaba Qwen provider adapter, via the DashScope OpenAI-compatible mode.

use std::time::Duration;

use async_trait::async_trait;
use pageforge_config::PageforgeConfig;
use pageforge_core::{
    ChatMessage, ChatParams, ChatProvider, Completion, HealthStatus, Integration,
    IntegrationKind, ModelSpec, PageforgeError,
};
use pageforge_provider::{AuthScheme, CompatClient, ProviderDescriptor};

/// Known Qwen models and their token ceilings.
pub const QWEN_MODELS: &[ModelSpec] = &[
    ModelSpec::new("qwen-max", 32_768, 8_192),
    ModelSpec::new("qwen-plus", 131_072, 8_192),
    ModelSpec::new("qwen-turbo", 131_072, 8_192),
];

pub const QWEN: ProviderDescriptor = ProviderDescriptor {
    name: "qwen",
    endpoint: "https://dashscope-intl.aliyuncs.com/compatible-mode/v1/chat/completions",
    auth: AuthScheme::Bearer,
    account_url: "https://bailian.console.alibabacloud.com",
    models: QWEN_MODELS,
};

/// Qwen chat provider.
pub struct QwenProvider {
    client: CompatClient,
    configured: bool,
}

impl QwenProvider {
    pub fn new(api_key: String, timeout: Duration) -> Result<Self, PageforgeError> {
        let configured = !api_key.trim().is_empty();
        Ok(Self {
            client: CompatClient::new(QWEN, api_key, timeout)?,
            configured,
        })
    }

    pub fn from_config(config: &PageforgeConfig) -> Result<Self, PageforgeError> {
        Self::new(
            config.providers.qwen.api_key.clone(),
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
impl Integration for QwenProvider {
    fn name(&self) -> &str {
        "qwen"
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
impl ChatProvider for QwenProvider {
    fn models(&self) -> &[ModelSpec] {
        QWEN_MODELS
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
