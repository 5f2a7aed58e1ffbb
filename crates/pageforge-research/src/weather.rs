// SPDX-FileCopyrightText: 2026 Pageforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenWeatherMap current conditions lookup.
//!
//! OWM quirk: the `cod` field is a number on success and a string on
//! error, so errors are parsed from the body rather than trusted from the
//! HTTP status alone.

use std::time::Duration;

use async_trait::async_trait;
use pageforge_core::{PageforgeError, ResearchResult, ResearchSource};
use serde::Deserialize;
use tracing::debug;

const API_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

#[derive(Debug, Deserialize)]
struct WeatherResponse {
    #[serde(default)]
    name: String,
    main: MainBlock,
    #[serde(default)]
    weather: Vec<ConditionBlock>,
}

#[derive(Debug, Deserialize)]
struct MainBlock {
    temp: f64,
    #[serde(default)]
    humidity: Option<u8>,
}

#[derive(Debug, Deserialize)]
struct ConditionBlock {
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    // String on errors ("404"), number on success (200).
    #[allow(dead_code)]
    cod: serde_json::Value,
    #[serde(default)]
    message: String,
}

/// OpenWeatherMap current-conditions source.
#[derive(Debug, Clone)]
pub struct WeatherSource {
    client: reqwest::Client,
    api_key: String,
    units: String,
    endpoint: String,
}

impl WeatherSource {
    pub fn new(api_key: String, units: String, timeout: Duration) -> Result<Self, PageforgeError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PageforgeError::Provider {
                message: format!("openweathermap: failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;
        Ok(Self {
            client,
            api_key,
            units,
            endpoint: API_URL.to_string(),
        })
    }

    /// Overrides the endpoint URL (wiremock tests).
    pub fn with_endpoint(mut self, url: impl Into<String>) -> Self {
        self.endpoint = url.into();
        self
    }

    fn unit_symbol(&self) -> &'static str {
        match self.units.as_str() {
            "imperial" => "°F",
            "standard" => "K",
            _ => "°C",
        }
    }
}

#[async_trait]
impl ResearchSource for WeatherSource {
    fn name(&self) -> &str {
        "openweathermap"
    }

    async fn lookup(&self, query: &str) -> Result<Vec<ResearchResult>, PageforgeError> {
        if self.api_key.trim().is_empty() {
            return Err(PageforgeError::Config(
                "openweathermap API key not set; create one at https://openweathermap.org/api".into(),
            ));
        }

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("q", query),
                ("units", self.units.as_str()),
                ("appid", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| PageforgeError::transport("openweathermap", e))?;

        let status = response.status();
        debug!(status = %status, location = query, "weather response received");

        let body = response
            .text()
            .await
            .map_err(|e| PageforgeError::transport("openweathermap", e))?;

        if !status.is_success() {
            let message = match serde_json::from_str::<ErrorResponse>(&body) {
                Ok(err) if !err.message.is_empty() => err.message,
                _ => format!("API returned {status}"),
            };
            return Err(PageforgeError::provider("openweathermap", message));
        }

        let parsed: WeatherResponse = serde_json::from_str(&body).map_err(|e| {
            PageforgeError::provider("openweathermap", format!("unexpected response: {e}"))
        })?;

        let description = parsed
            .weather
            .first()
            .map(|c| c.description.clone())
            .unwrap_or_default();
        let mut body_text = format!("{:.1}{}, {description}", parsed.main.temp, self.unit_symbol());
        if let Some(humidity) = parsed.main.humidity {
            body_text.push_str(&format!(", {humidity}% humidity"));
        }

        Ok(vec![ResearchResult {
            title: parsed.name,
            url: None,
            body: body_text,
        }])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn source(server: &MockServer, units: &str) -> WeatherSource {
        WeatherSource::new("owm-key".into(), units.into(), Duration::from_secs(5))
            .unwrap()
            .with_endpoint(format!("{}/data/2.5/weather", server.uri()))
    }

    #[tokio::test]
    async fn lookup_formats_current_conditions() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("q", "Bergen"))
            .and(query_param("units", "metric"))
            .and(query_param("appid", "owm-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "cod": 200,
                "name": "Bergen",
                "main": {"temp": 11.4, "humidity": 87},
                "weather": [{"main": "Rain", "description": "light rain"}]
            })))
            .mount(&server)
            .await;

        let results = source(&server, "metric").lookup("Bergen").await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Bergen");
        assert_eq!(results[0].body, "11.4°C, light rain, 87% humidity");
    }

    #[tokio::test]
    async fn string_cod_error_payload_is_wrapped() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "cod": "404",
                "message": "city not found"
            })))
            .mount(&server)
            .await;

        let err = source(&server, "metric").lookup("Atlantis").await.unwrap_err();
        assert!(err.to_string().contains("city not found"));
    }

    #[tokio::test]
    async fn imperial_units_change_the_symbol() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("units", "imperial"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "cod": 200,
                "name": "Austin",
                "main": {"temp": 95.0},
                "weather": [{"description": "clear sky"}]
            })))
            .mount(&server)
            .await;

        let results = source(&server, "imperial").lookup("Austin").await.unwrap();
        assert!(results[0].body.starts_with("95.0°F"));
    }
}
