// SPDX-FileCopyrightText: 2026 Pageforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! YouTube Data API v3 search.
//!
//! One GET per lookup; each result becomes a watch URL ready for embedding
//! as a dynamic element in generated content.

use std::time::Duration;

use async_trait::async_trait;
use pageforge_core::{PageforgeError, ResearchResult, ResearchSource};
use serde::Deserialize;
use tracing::debug;

const API_URL: &str = "https://www.googleapis.com/youtube/v3/search";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: ItemId,
    snippet: Snippet,
}

#[derive(Debug, Deserialize)]
struct ItemId {
    #[serde(rename = "videoId", default)]
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Snippet {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

/// YouTube search source.
#[derive(Debug, Clone)]
pub struct YoutubeSource {
    client: reqwest::Client,
    api_key: String,
    max_results: u8,
    endpoint: String,
}

impl YoutubeSource {
    pub fn new(api_key: String, max_results: u8, timeout: Duration) -> Result<Self, PageforgeError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PageforgeError::Provider {
                message: format!("youtube: failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;
        Ok(Self {
            client,
            api_key,
            max_results,
            endpoint: API_URL.to_string(),
        })
    }

    /// Overrides the endpoint URL (wiremock tests).
    pub fn with_endpoint(mut self, url: impl Into<String>) -> Self {
        self.endpoint = url.into();
        self
    }
}

#[async_trait]
impl ResearchSource for YoutubeSource {
    fn name(&self) -> &str {
        "youtube"
    }

    async fn lookup(&self, query: &str) -> Result<Vec<ResearchResult>, PageforgeError> {
        if self.api_key.trim().is_empty() {
            return Err(PageforgeError::Config(
                "youtube API key not set; create one at https://console.cloud.google.com".into(),
            ));
        }

        let max_results = self.max_results.to_string();
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("part", "snippet"),
                ("q", query),
                ("type", "video"),
                ("maxResults", max_results.as_str()),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| PageforgeError::transport("youtube", e))?;

        let status = response.status();
        debug!(status = %status, query, "search response received");

        let body = response
            .text()
            .await
            .map_err(|e| PageforgeError::transport("youtube", e))?;

        if !status.is_success() {
            let message = match serde_json::from_str::<ErrorResponse>(&body) {
                Ok(err) => err.error.message,
                Err(_) => format!("API returned {status}"),
            };
            return Err(PageforgeError::provider("youtube", message));
        }

        let parsed: SearchResponse = serde_json::from_str(&body).map_err(|e| {
            PageforgeError::provider("youtube", format!("unexpected response: {e}"))
        })?;

        Ok(parsed
            .items
            .into_iter()
            .filter_map(|item| {
                let video_id = item.id.video_id?;
                Some(ResearchResult {
                    title: item.snippet.title,
                    url: Some(format!("https://www.youtube.com/watch?v={video_id}")),
                    body: item.snippet.description,
                })
            })
            .collect())
    }
}
