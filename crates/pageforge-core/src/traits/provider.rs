// SPDX-FileCopyrightText: 2026 Pageforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chat provider trait for AI/content API integrations.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::PageforgeError;
use crate::traits::integration::Integration;
use crate::types::{ChatMessage, ChatParams, Completion, ModelSpec, RateLimited};

/// Adapter for chat-completion providers (OpenAI, Claude, Gemini, ...).
///
/// Every query is a single blocking call: build auth, check the token
/// budget, POST once, normalize the result. No adapter retries, queues, or
/// coordinates concurrent requests -- the caller owns any retry loop,
/// advised by [`ChatProvider::rate_limit_backoff`].
#[async_trait]
pub trait ChatProvider: Integration {
    /// Models this provider can serve, with their token ceilings.
    fn models(&self) -> &[ModelSpec];

    /// Token ceiling for a model, or `None` for an unknown model id.
    fn token_limit(&self, model: &str) -> Option<u32> {
        self.models()
            .iter()
            .find(|m| m.id == model)
            .map(|m| m.token_limit)
    }

    /// Sends one chat completion request and returns the trimmed text.
    async fn query(
        &self,
        model: &str,
        messages: &[ChatMessage],
        params: &ChatParams,
    ) -> Result<Completion, PageforgeError>;

    /// How long the caller should wait after a rate-limited response.
    ///
    /// Providers that expose reset headers override this; the default keeps
    /// the caller's own pause.
    fn rate_limit_backoff(&self, pause: Duration, response: &RateLimited) -> Duration {
        let _ = response;
        pause
    }
}
