// SPDX-FileCopyrightText: 2026 Pageforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock chat provider for deterministic testing.
//!
//! Responses are popped from a FIFO queue, enabling fast, CI-runnable
//! tests without external API calls.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use pageforge_core::{
    ChatMessage, ChatParams, ChatProvider, Completion, HealthStatus, Integration,
    IntegrationKind, ModelSpec, PageforgeError, TokenUsage,
};

const MODELS: &[ModelSpec] = &[
    ModelSpec::new("mock-chat", 8192, 1024),
    ModelSpec::new("mock-mini", 120, 40),
];

/// A mock chat provider that returns pre-configured responses.
///
/// When the queue is empty, a default "mock response" text is returned.
/// Every query is recorded for later assertion.
pub struct MockChatProvider {
    responses: Arc<Mutex<VecDeque<String>>>,
    calls: Arc<Mutex<Vec<(String, Vec<ChatMessage>)>>>,
}

impl MockChatProvider {
    /// Create a new mock provider with an empty response queue.
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock provider pre-loaded with the given responses.
    pub fn with_responses(responses: Vec<String>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::from(responses))),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Add a response to the end of the queue.
    pub async fn add_response(&self, text: impl Into<String>) {
        self.responses.lock().await.push_back(text.into());
    }

    /// Every (model, messages) pair this provider was queried with.
    pub async fn calls(&self) -> Vec<(String, Vec<ChatMessage>)> {
        self.calls.lock().await.clone()
    }

    async fn next_response(&self) -> String {
        self.responses
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| "mock response".to_string())
    }
}

impl Default for MockChatProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Integration for MockChatProvider {
    fn name(&self) -> &str {
        "mock-provider"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn kind(&self) -> IntegrationKind {
        IntegrationKind::Provider
    }

    async fn health_check(&self) -> Result<HealthStatus, PageforgeError> {
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl ChatProvider for MockChatProvider {
    fn models(&self) -> &[ModelSpec] {
        MODELS
    }

    async fn query(
        &self,
        model: &str,
        messages: &[ChatMessage],
        _params: &ChatParams,
    ) -> Result<Completion, PageforgeError> {
        self.calls
            .lock()
            .await
            .push((model.to_string(), messages.to_vec()));
        let text = self.next_response().await;
        Ok(Completion {
            text: text.trim().to_string(),
            model: model.to_string(),
            usage: Some(TokenUsage {
                input_tokens: 10,
                output_tokens: 20,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn responses_pop_in_fifo_order() {
        let provider =
            MockChatProvider::with_responses(vec!["first".to_string(), "  second  ".to_string()]);
        let messages = [ChatMessage::user("hi")];

        let a = provider
            .query("mock-chat", &messages, &ChatParams::default())
            .await
            .unwrap();
        let b = provider
            .query("mock-chat", &messages, &ChatParams::default())
            .await
            .unwrap();
        let c = provider
            .query("mock-chat", &messages, &ChatParams::default())
            .await
            .unwrap();

        assert_eq!(a.text, "first");
        assert_eq!(b.text, "second");
        assert_eq!(c.text, "mock response");
    }

    #[tokio::test]
    async fn calls_are_recorded() {
        let provider = MockChatProvider::new();
        provider
            .query(
                "mock-mini",
                &[ChatMessage::user("write a title")],
                &ChatParams::default(),
            )
            .await
            .unwrap();

        let calls = provider.calls().await;
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "mock-mini");
        assert_eq!(calls[0].1[0].content, "write a title");
    }

    #[test]
    fn token_limits_come_from_the_model_table() {
        let provider = MockChatProvider::new();
        assert_eq!(provider.token_limit("mock-chat"), Some(8192));
        assert_eq!(provider.token_limit("mock-mini"), Some(120));
        assert_eq!(provider.token_limit("unknown"), None);
    }
}
