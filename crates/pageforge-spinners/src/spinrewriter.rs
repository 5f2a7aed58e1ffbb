// SPDX-FileCopyrightText: 2026 Pageforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Spin Rewriter client.
//!
//! One form-encoded POST per call with `action=unique_variation`. The API
//! answers 200 for everything and signals failure through `status`.

use std::time::Duration;

use async_trait::async_trait;
use pageforge_core::PageforgeError;
use serde::Deserialize;
use tracing::debug;

use crate::ArticleSpinner;

const API_URL: &str = "https://www.spinrewriter.com/action/api";

#[derive(Debug, Deserialize)]
struct ApiResponse {
    status: String,
    #[serde(default)]
    response: String,
}

/// Spin Rewriter API client.
#[derive(Debug, Clone)]
pub struct SpinRewriterClient {
    client: reqwest::Client,
    email_address: String,
    api_key: String,
    endpoint: String,
}

impl SpinRewriterClient {
    pub fn new(
        email_address: String,
        api_key: String,
        timeout: Duration,
    ) -> Result<Self, PageforgeError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PageforgeError::Provider {
                message: format!("spinrewriter: failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;
        Ok(Self {
            client,
            email_address,
            api_key,
            endpoint: API_URL.to_string(),
        })
    }

    pub fn is_configured(&self) -> bool {
        !self.email_address.trim().is_empty() && !self.api_key.trim().is_empty()
    }

    /// Overrides the endpoint URL (wiremock tests).
    pub fn with_endpoint(mut self, url: impl Into<String>) -> Self {
        self.endpoint = url.into();
        self
    }

    /// Request one unique variation of the text.
    pub async fn unique_variation(&self, text: &str) -> Result<String, PageforgeError> {
        if !self.is_configured() {
            return Err(PageforgeError::Config(
                "spinrewriter email address and API key not set; see https://www.spinrewriter.com/api".into(),
            ));
        }

        let form = [
            ("email_address", self.email_address.as_str()),
            ("api_key", self.api_key.as_str()),
            ("action", "unique_variation"),
            ("text", text),
            ("auto_protected_terms", "true"),
            ("nested_spintax", "true"),
        ];

        let response = self
            .client
            .post(&self.endpoint)
            .form(&form)
            .send()
            .await
            .map_err(|e| PageforgeError::transport("spinrewriter", e))?;

        let status = response.status();
        debug!(status = %status, "unique_variation response received");

        if !status.is_success() {
            return Err(PageforgeError::provider(
                "spinrewriter",
                format!("API returned {status}"),
            ));
        }

        let parsed: ApiResponse = response
            .json()
            .await
            .map_err(|e| PageforgeError::provider("spinrewriter", format!("unexpected response: {e}")))?;

        if parsed.status != "OK" {
            return Err(PageforgeError::provider("spinrewriter", parsed.response));
        }

        Ok(parsed.response.trim().to_string())
    }
}

#[async_trait]
impl ArticleSpinner for SpinRewriterClient {
    fn name(&self) -> &str {
        "spinrewriter"
    }

    async fn spin(&self, text: &str) -> Result<String, PageforgeError> {
        self.unique_variation(text).await
    }
}
