// SPDX-FileCopyrightText: 2026 Pageforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! AI Writer client: researched articles from a headline.

use std::time::Duration;

use async_trait::async_trait;
use pageforge_core::PageforgeError;
use serde::Deserialize;
use tracing::debug;

use crate::ArticleWriter;

const API_URL: &str = "https://api.ai-writer.com/v2/articles";

#[derive(Debug, Deserialize)]
struct ApiResponse {
    status: String,
    #[serde(default)]
    article: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// AI Writer API client.
#[derive(Debug, Clone)]
pub struct AiWriterClient {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
}

impl AiWriterClient {
    pub fn new(api_key: String, timeout: Duration) -> Result<Self, PageforgeError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PageforgeError::Provider {
                message: format!("aiwriter: failed to build HTTP client: {e}"),
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

    /// Research and write one article for the given headline.
    pub async fn research_article(&self, headline: &str) -> Result<String, PageforgeError> {
        if !self.is_configured() {
            return Err(PageforgeError::Config(
                "aiwriter API key not set; see https://ai-writer.com/api".into(),
            ));
        }

        let form = [("key", self.api_key.as_str()), ("headline", headline)];

        let response = self
            .client
            .post(&self.endpoint)
            .form(&form)
            .send()
            .await
            .map_err(|e| PageforgeError::transport("aiwriter", e))?;

        let status = response.status();
        debug!(status = %status, "research_article response received");

        if !status.is_success() {
            return Err(PageforgeError::provider(
                "aiwriter",
                format!("API returned {status}"),
            ));
        }

        let parsed: ApiResponse = response.json().await.map_err(|e| {
            PageforgeError::provider("aiwriter", format!("unexpected response: {e}"))
        })?;

        if parsed.status != "success" {
            let message = parsed
                .message
                .unwrap_or_else(|| format!("status {}", parsed.status));
            return Err(PageforgeError::provider("aiwriter", message));
        }

        parsed
            .article
            .map(|a| a.trim().to_string())
            .ok_or_else(|| PageforgeError::provider("aiwriter", "response contained no article"))
    }
}

#[async_trait]
impl ArticleWriter for AiWriterClient {
    fn name(&self) -> &str {
        "aiwriter"
    }

    async fn write(&self, keyword: &str) -> Result<String, PageforgeError> {
        self.research_article(keyword).await
    }
}
