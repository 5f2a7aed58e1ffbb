// SPDX-FileCopyrightText: 2026 Pageforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Grok image generation.
//!
//! One POST to `images/generations` with `response_format: "b64_json"`,
//! decoded into [`ImageData`] ready for media import. No retries, no
//! batching.

use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use pageforge_core::{ImageData, PageforgeError};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Base URL for the xAI image API.
const IMAGE_API_URL: &str = "https://api.x.ai/v1/images/generations";

/// Default image model.
pub const IMAGE_MODEL: &str = "grok-2-image";

#[derive(Debug, Serialize)]
struct ImageRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    response_format: &'a str,
}

#[derive(Debug, Deserialize)]
struct ImageResponse {
    #[serde(default)]
    data: Vec<ImagePayload>,
}

#[derive(Debug, Deserialize)]
struct ImagePayload {
    #[serde(default)]
    b64_json: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

/// Client for Grok image generation.
#[derive(Debug, Clone)]
pub struct XaiImageClient {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
}

impl XaiImageClient {
    pub fn new(api_key: String, timeout: Duration) -> Result<Self, PageforgeError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PageforgeError::Provider {
                message: format!("xai: failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;
        Ok(Self {
            client,
            api_key,
            endpoint: IMAGE_API_URL.to_string(),
        })
    }

    /// Overrides the endpoint URL (wiremock tests).
    pub fn with_endpoint(mut self, url: impl Into<String>) -> Self {
        self.endpoint = url.into();
        self
    }

    /// Generate a single image from a prompt.
    ///
    /// The result carries a synthesized file name; Grok returns JPEG data.
    pub async fn generate(&self, prompt: &str) -> Result<ImageData, PageforgeError> {
        if self.api_key.trim().is_empty() {
            return Err(PageforgeError::Config(
                "xai API key not set; create one at https://console.x.ai".into(),
            ));
        }

        let request = ImageRequest {
            model: IMAGE_MODEL,
            prompt,
            response_format: "b64_json",
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| PageforgeError::transport("xai", e))?;

        let status = response.status();
        debug!(status = %status, "image generation response received");

        let body = response
            .text()
            .await
            .map_err(|e| PageforgeError::transport("xai", e))?;

        if !status.is_success() {
            let message = match serde_json::from_str::<ErrorResponse>(&body) {
                Ok(err) => err.error,
                Err(_) => format!("API returned {status}: {body}"),
            };
            return Err(PageforgeError::provider("xai", message));
        }

        let parsed: ImageResponse = serde_json::from_str(&body).map_err(|e| {
            PageforgeError::provider("xai", format!("failed to parse API response: {e}"))
        })?;

        let encoded = parsed
            .data
            .first()
            .and_then(|p| p.b64_json.as_deref())
            .ok_or_else(|| PageforgeError::provider("xai", "response contained no image data"))?;

        let bytes = BASE64.decode(encoded).map_err(|e| {
            PageforgeError::provider("xai", format!("image payload is not valid base64: {e}"))
        })?;

        Ok(ImageData {
            bytes,
            mime: "image/jpeg".to_string(),
            file_name: "grok-generated.jpg".to_string(),
        })
    }
}
