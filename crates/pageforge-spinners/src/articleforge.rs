// SPDX-FileCopyrightText: 2026 Pageforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Article Forge client.
//!
//! Uses the synchronous `create_article` endpoint, which blocks until the
//! article is ready -- the polling initiate/progress flow is deliberately
//! not used, keeping every adapter call one-shot.

use std::time::Duration;

use async_trait::async_trait;
use pageforge_core::PageforgeError;
use serde::Deserialize;
use tracing::debug;

use crate::ArticleWriter;

const API_URL: &str = "https://af.articleforge.com/api/create_article";

#[derive(Debug, Deserialize)]
struct ApiResponse {
    status: String,
    #[serde(default)]
    article: Option<String>,
    #[serde(default)]
    error_message: Option<String>,
}

/// Article Forge API client.
#[derive(Debug, Clone)]
pub struct ArticleForgeClient {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
    /// Requested article length: "very_short", "short", "medium", "long".
    length: String,
}

impl ArticleForgeClient {
    pub fn new(api_key: String, timeout: Duration) -> Result<Self, PageforgeError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PageforgeError::Provider {
                message: format!("articleforge: failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;
        Ok(Self {
            client,
            api_key,
            endpoint: API_URL.to_string(),
            length: "medium".to_string(),
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

    pub fn with_length(mut self, length: impl Into<String>) -> Self {
        self.length = length.into();
        self
    }

    /// Create one article for the keyword, blocking until it is ready.
    pub async fn create_article(&self, keyword: &str) -> Result<String, PageforgeError> {
        if !self.is_configured() {
            return Err(PageforgeError::Config(
                "articleforge API key not set; see https://af.articleforge.com/api_info".into(),
            ));
        }

        let form = [
            ("key", self.api_key.as_str()),
            ("keyword", keyword),
            ("length", self.length.as_str()),
        ];

        let response = self
            .client
            .post(&self.endpoint)
            .form(&form)
            .send()
            .await
            .map_err(|e| PageforgeError::transport("articleforge", e))?;

        let status = response.status();
        debug!(status = %status, keyword, "create_article response received");

        if !status.is_success() {
            return Err(PageforgeError::provider(
                "articleforge",
                format!("API returned {status}"),
            ));
        }

        let parsed: ApiResponse = response.json().await.map_err(|e| {
            PageforgeError::provider("articleforge", format!("unexpected response: {e}"))
        })?;

        if parsed.status != "Success" {
            let message = parsed
                .error_message
                .unwrap_or_else(|| format!("status {}", parsed.status));
            return Err(PageforgeError::provider("articleforge", message));
        }

        parsed
            .article
            .map(|a| a.trim().to_string())
            .ok_or_else(|| PageforgeError::provider("articleforge", "response contained no article"))
    }
}

#[async_trait]
impl ArticleWriter for ArticleForgeClient {
    fn name(&self) -> &str {
        "articleforge"
    }

    async fn write(&self, keyword: &str) -> Result<String, PageforgeError> {
        self.create_article(keyword).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> ArticleForgeClient {
        ArticleForgeClient::new("af-key".into(), Duration::from_secs(5))
            .unwrap()
            .with_endpoint(format!("{}/api/create_article", server.uri()))
    }

    #[tokio::test]
    async fn create_article_returns_the_article() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_string_contains("keyword=plumber+oslo"))
            .and(body_string_contains("length=medium"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "Success",
                "article": "Finding a plumber in Oslo..."
            })))
            .mount(&server)
            .await;

        let article = client(&server).write("plumber oslo").await.unwrap();
        assert_eq!(article, "Finding a plumber in Oslo...");
    }

    #[tokio::test]
    async fn fail_status_carries_error_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "Fail",
                "error_message": "Invalid API key"
            })))
            .mount(&server)
            .await;

        let err = client(&server).write("keyword").await.unwrap_err();
        assert!(err.to_string().contains("Invalid API key"));
    }
}
