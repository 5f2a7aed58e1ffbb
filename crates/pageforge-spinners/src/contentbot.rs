// SPDX-FileCopyrightText: 2026 Pageforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! ContentBot client: long-form content from a prompt.

use std::time::Duration;

use async_trait::async_trait;
use pageforge_core::PageforgeError;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ArticleWriter;

const API_URL: &str = "https://contentbot.ai/api/v1/ai";

#[derive(Debug, Serialize)]
struct ApiRequest<'a> {
    prompt: &'a str,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// ContentBot API client.
#[derive(Debug, Clone)]
pub struct ContentBotClient {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
}

impl ContentBotClient {
    pub fn new(api_key: String, timeout: Duration) -> Result<Self, PageforgeError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PageforgeError::Provider {
                message: format!("contentbot: failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;
        Ok(Self {
            client,
            api_key,
            endpoint: API_URL.to_string(),
        })
    }

    pub fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// Overrides the endpoint URL (wiremock tests).
    pub fn with_endpoint(mut self, url: impl Into<String>) -> Self {
        self.endpoint = url.into();
        self
    }

    /// Generate long-form content for the prompt.
    pub async fn generate(&self, prompt: &str) -> Result<String, PageforgeError> {
        if !self.is_configured() {
            return Err(PageforgeError::Config(
                "contentbot API key not set; see https://contentbot.ai/api".into(),
            ));
        }

        let response = self
            .client
            .post(&self.endpoint)
            .header("token", &self.api_key)
            .json(&ApiRequest { prompt })
            .send()
            .await
            .map_err(|e| PageforgeError::transport("contentbot", e))?;

        let status = response.status();
        debug!(status = %status, "generate response received");

        if !status.is_success() {
            return Err(PageforgeError::provider(
                "contentbot",
                format!("API returned {status}"),
            ));
        }

        let parsed: ApiResponse = response.json().await.map_err(|e| {
            PageforgeError::provider("contentbot", format!("unexpected response: {e}"))
        })?;

        if let Some(error) = parsed.error {
            return Err(PageforgeError::provider("contentbot", error));
        }

        parsed
            .content
            .map(|c| c.trim().to_string())
            .ok_or_else(|| PageforgeError::provider("contentbot", "response contained no content"))
    }
}

#[async_trait]
impl ArticleWriter for ContentBotClient {
    fn name(&self) -> &str {
        "contentbot"
    }

    async fn write(&self, keyword: &str) -> Result<String, PageforgeError> {
        self.generate(keyword).await
    }
}
