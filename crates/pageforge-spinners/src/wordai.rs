// SPDX-FileCopyrightText: 2026 Pageforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! WordAi client.

use std::time::Duration;

use async_trait::async_trait;
use pageforge_core::PageforgeError;
use serde::Deserialize;
use tracing::debug;

use crate::ArticleSpinner;

const API_URL: &str = "https://wai.wordai.com/api/rewrite";

#[derive(Debug, Deserialize)]
struct ApiResponse {
    status: String,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// WordAi API client.
#[derive(Debug, Clone)]
pub struct WordAiClient {
    client: reqwest::Client,
    email: String,
    api_key: String,
    endpoint: String,
}

impl WordAiClient {
    pub fn new(email: String, api_key: String, timeout: Duration) -> Result<Self, PageforgeError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PageforgeError::Provider {
                message: format!("wordai: failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;
        Ok(Self {
            client,
            email,
            api_key,
            endpoint: API_URL.to_string(),
        })
    }

    pub fn is_configured(&self) -> bool {
        !self.email.trim().is_empty() && !self.api_key.trim().is_empty()
    }

    /// Overrides the endpoint URL (wiremock tests).
    pub fn with_endpoint(mut self, url: impl Into<String>) -> Self {
        self.endpoint = url.into();
        self
    }

    /// Rewrite the given text once.
    pub async fn rewrite(&self, input: &str) -> Result<String, PageforgeError> {
        if !self.is_configured() {
            return Err(PageforgeError::Config(
                "wordai email and API key not set; see https://wordai.com/api".into(),
            ));
        }

        let form = [
            ("email", self.email.as_str()),
            ("key", self.api_key.as_str()),
            ("input", input),
        ];

        let response = self
            .client
            .post(&self.endpoint)
            .form(&form)
            .send()
            .await
            .map_err(|e| PageforgeError::transport("wordai", e))?;

        let status = response.status();
        debug!(status = %status, "rewrite response received");

        if !status.is_success() {
            return Err(PageforgeError::provider(
                "wordai",
                format!("API returned {status}"),
            ));
        }

        let parsed: ApiResponse = response
            .json()
            .await
            .map_err(|e| PageforgeError::provider("wordai", format!("unexpected response: {e}")))?;

        if parsed.status != "Success" {
            let message = parsed
                .error
                .unwrap_or_else(|| format!("status {}", parsed.status));
            return Err(PageforgeError::provider("wordai", message));
        }

        parsed
            .text
            .map(|t| t.trim().to_string())
            .ok_or_else(|| PageforgeError::provider("wordai", "response contained no text"))
    }
}

#[async_trait]
impl ArticleSpinner for WordAiClient {
    fn name(&self) -> &str {
        "wordai"
    }

    async fn spin(&self, text: &str) -> Result<String, PageforgeError> {
        self.rewrite(text).await
    }
}
