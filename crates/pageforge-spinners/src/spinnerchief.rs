// SPDX-FileCopyrightText: 2026 Pageforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SpinnerChief client.
//!
//! The oldest wire shape in this crate: credentials go in query
//! parameters, the article rides in the raw request body, and the
//! response is plain text with an `error=` prefix convention instead of
//! a structured error payload.

use std::time::Duration;

use async_trait::async_trait;
use pageforge_core::PageforgeError;
use tracing::debug;

use crate::ArticleSpinner;

const API_URL: &str = "http://api.spinnerchief.com/apikey";

/// SpinnerChief API client.
#[derive(Debug, Clone)]
pub struct SpinnerChiefClient {
    client: reqwest::Client,
    api_key: String,
    username: String,
    password: String,
    endpoint: String,
}

impl SpinnerChiefClient {
    pub fn new(
        api_key: String,
        username: String,
        password: String,
        timeout: Duration,
    ) -> Result<Self, PageforgeError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PageforgeError::Provider {
                message: format!("spinnerchief: failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;
        Ok(Self {
            client,
            api_key,
            username,
            password,
            endpoint: API_URL.to_string(),
        })
    }

    pub fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty()
            && !self.username.trim().is_empty()
            && !self.password.trim().is_empty()
    }

    /// Overrides the endpoint URL (wiremock tests).
    pub fn with_endpoint(mut self, url: impl Into<String>) -> Self {
        self.endpoint = url.into();
        self
    }

    /// Spin the text with the account's default settings.
    pub async fn spin_text(&self, text: &str) -> Result<String, PageforgeError> {
        if !self.is_configured() {
            return Err(PageforgeError::Config(
                "spinnerchief API key, username, and password not set; see http://developer.spinnerchief.com".into(),
            ));
        }

        let response = self
            .client
            .post(&self.endpoint)
            .query(&[
                ("apikey", self.api_key.as_str()),
                ("username", self.username.as_str()),
                ("password", self.password.as_str()),
                ("spintype", "0"),
            ])
            .body(text.to_string())
            .send()
            .await
            .map_err(|e| PageforgeError::transport("spinnerchief", e))?;

        let status = response.status();
        debug!(status = %status, "spin response received");

        if !status.is_success() {
            return Err(PageforgeError::provider(
                "spinnerchief",
                format!("API returned {status}"),
            ));
        }

        let body = response
            .text()
            .await
            .map_err(|e| PageforgeError::transport("spinnerchief", e))?;

        if let Some(message) = body.strip_prefix("error=") {
            return Err(PageforgeError::provider("spinnerchief", message.trim()));
        }

        Ok(body.trim().to_string())
    }
}

#[async_trait]
impl ArticleSpinner for SpinnerChiefClient {
    fn name(&self) -> &str {
        "spinnerchief"
    }

    async fn spin(&self, text: &str) -> Result<String, PageforgeError> {
        self.spin_text(text).await
    }
}
