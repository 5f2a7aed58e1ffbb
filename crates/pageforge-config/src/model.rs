// SPDX-FileCopyrightText: 2026 Pageforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Pageforge integrations layer.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Top-level Pageforge configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. All sections are optional and default to sensible
/// values; provider sections default to "no key set".
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PageforgeConfig {
    /// Generation-pass behavior settings.
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Metadata store settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// AI chat provider credentials and defaults.
    #[serde(default)]
    pub providers: ProvidersConfig,

    /// Article spinner / content service credentials.
    #[serde(default)]
    pub spinners: SpinnersConfig,

    /// Research source credentials.
    #[serde(default)]
    pub research: ResearchConfig,
}

/// Generation-pass behavior configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GenerationConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Characters-per-token ratio for the heuristic prompt estimator.
    #[serde(default = "default_chars_per_token")]
    pub chars_per_token: u32,

    /// Timeout applied to every outbound provider request, in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            chars_per_token: default_chars_per_token(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_chars_per_token() -> u32 {
    4
}

fn default_request_timeout() -> u64 {
    120
}

/// Metadata store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

fn default_database_path() -> String {
    "pageforge.db".to_string()
}

/// API key plus optional default model, shared by most chat providers.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderKeyConfig {
    /// Provider API key. Empty means "not configured".
    #[serde(default)]
    pub api_key: String,

    /// Default model to query when the caller does not pick one.
    #[serde(default)]
    pub model: Option<String>,
}

/// Anthropic needs an API version header alongside the key.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AnthropicConfig {
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_anthropic_version")]
    pub api_version: String,

    #[serde(default)]
    pub model: Option<String>,
}

impl Default for AnthropicConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_version: default_anthropic_version(),
            model: None,
        }
    }
}

fn default_anthropic_version() -> String {
    "2023-06-01".to_string()
}

/// OpenRouter attributes requests to the calling application.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OpenRouterConfig {
    #[serde(default)]
    pub api_key: String,

    /// Sent as the HTTP-Referer attribution header.
    #[serde(default = "default_openrouter_referer")]
    pub referer: String,

    /// Sent as the X-Title attribution header.
    #[serde(default = "default_openrouter_title")]
    pub title: String,

    #[serde(default)]
    pub model: Option<String>,
}

impl Default for OpenRouterConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            referer: default_openrouter_referer(),
            title: default_openrouter_title(),
            model: None,
        }
    }
}

fn default_openrouter_referer() -> String {
    "https://github.com/pageforge/pageforge".to_string()
}

fn default_openrouter_title() -> String {
    "Pageforge".to_string()
}

/// All chat provider sections.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub openai: ProviderKeyConfig,
    #[serde(default)]
    pub anthropic: AnthropicConfig,
    #[serde(default)]
    pub gemini: ProviderKeyConfig,
    #[serde(default)]
    pub xai: ProviderKeyConfig,
    #[serde(default)]
    pub mistral: ProviderKeyConfig,
    #[serde(default)]
    pub deepseek: ProviderKeyConfig,
    #[serde(default)]
    pub qwen: ProviderKeyConfig,
    #[serde(default)]
    pub perplexity: ProviderKeyConfig,
    #[serde(default)]
    pub openrouter: OpenRouterConfig,
}

/// Spin Rewriter authenticates with an account email plus API key.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SpinRewriterConfig {
    #[serde(default)]
    pub email_address: String,
    #[serde(default)]
    pub api_key: String,
}

/// WordAi authenticates with an account email plus API key.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct WordAiConfig {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub api_key: String,
}

/// SpinnerChief wants a developer key plus account credentials.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SpinnerChiefConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// All spinner sections.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SpinnersConfig {
    #[serde(default)]
    pub spinrewriter: SpinRewriterConfig,
    #[serde(default)]
    pub wordai: WordAiConfig,
    #[serde(default)]
    pub spinnerchief: SpinnerChiefConfig,
    #[serde(default)]
    pub articleforge: ProviderKeyConfig,
    #[serde(default)]
    pub aiwriter: ProviderKeyConfig,
    #[serde(default)]
    pub contentbot: ProviderKeyConfig,
}

/// YouTube Data API settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct YoutubeConfig {
    #[serde(default)]
    pub api_key: String,

    /// Search results per lookup (API accepts 1..=50).
    #[serde(default = "default_youtube_max_results")]
    pub max_results: u8,
}

impl Default for YoutubeConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            max_results: default_youtube_max_results(),
        }
    }
}

fn default_youtube_max_results() -> u8 {
    5
}

/// OpenWeatherMap settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct WeatherConfig {
    #[serde(default)]
    pub api_key: String,

    /// Unit system: metric, imperial, or standard.
    #[serde(default = "default_weather_units")]
    pub units: String,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            units: default_weather_units(),
        }
    }
}

fn default_weather_units() -> String {
    "metric".to_string()
}

/// All research source sections.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ResearchConfig {
    #[serde(default)]
    pub youtube: YoutubeConfig,
    #[serde(default)]
    pub openweathermap: WeatherConfig,
}

impl PageforgeConfig {
    /// Dotted names of every credential key that currently holds a value.
    ///
    /// The registry compares this set against each manifest's `config_keys`
    /// to resolve `NotConfigured`.
    pub fn configured_keys(&self) -> HashSet<String> {
        let mut keys = HashSet::new();
        let mut push = |name: &str, value: &str| {
            if !value.trim().is_empty() {
                keys.insert(name.to_string());
            }
        };

        push("providers.openai.api_key", &self.providers.openai.api_key);
        push(
            "providers.anthropic.api_key",
            &self.providers.anthropic.api_key,
        );
        push("providers.gemini.api_key", &self.providers.gemini.api_key);
        push("providers.xai.api_key", &self.providers.xai.api_key);
        push("providers.mistral.api_key", &self.providers.mistral.api_key);
        push(
            "providers.deepseek.api_key",
            &self.providers.deepseek.api_key,
        );
        push("providers.qwen.api_key", &self.providers.qwen.api_key);
        push(
            "providers.perplexity.api_key",
            &self.providers.perplexity.api_key,
        );
        push(
            "providers.openrouter.api_key",
            &self.providers.openrouter.api_key,
        );

        push(
            "spinners.spinrewriter.email_address",
            &self.spinners.spinrewriter.email_address,
        );
        push(
            "spinners.spinrewriter.api_key",
            &self.spinners.spinrewriter.api_key,
        );
        push("spinners.wordai.email", &self.spinners.wordai.email);
        push("spinners.wordai.api_key", &self.spinners.wordai.api_key);
        push(
            "spinners.spinnerchief.api_key",
            &self.spinners.spinnerchief.api_key,
        );
        push(
            "spinners.spinnerchief.username",
            &self.spinners.spinnerchief.username,
        );
        push(
            "spinners.spinnerchief.password",
            &self.spinners.spinnerchief.password,
        );
        push(
            "spinners.articleforge.api_key",
            &self.spinners.articleforge.api_key,
        );
        push("spinners.aiwriter.api_key", &self.spinners.aiwriter.api_key);
        push(
            "spinners.contentbot.api_key",
            &self.spinners.contentbot.api_key,
        );

        push("research.youtube.api_key", &self.research.youtube.api_key);
        push(
            "research.openweathermap.api_key",
            &self.research.openweathermap.api_key,
        );

        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_no_configured_keys() {
        let config = PageforgeConfig::default();
        assert!(config.configured_keys().is_empty());
    }

    #[test]
    fn configured_keys_tracks_set_credentials() {
        let mut config = PageforgeConfig::default();
        config.providers.openai.api_key = "sk-test".to_string();
        config.spinners.wordai.email = "user@example.com".to_string();
        config.spinners.wordai.api_key = "key".to_string();

        let keys = config.configured_keys();
        assert!(keys.contains("providers.openai.api_key"));
        assert!(keys.contains("spinners.wordai.email"));
        assert!(keys.contains("spinners.wordai.api_key"));
        assert!(!keys.contains("providers.gemini.api_key"));
    }

    #[test]
    fn whitespace_only_key_is_not_configured() {
        let mut config = PageforgeConfig::default();
        config.providers.gemini.api_key = "   ".to_string();
        assert!(!config.configured_keys().contains("providers.gemini.api_key"));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let toml_str = r#"
[generation]
log_levle = "debug"
"#;
        assert!(toml::from_str::<PageforgeConfig>(toml_str).is_err());
    }

    #[test]
    fn defaults_fill_unspecified_sections() {
        let config: PageforgeConfig = toml::from_str("").unwrap();
        assert_eq!(config.generation.log_level, "info");
        assert_eq!(config.generation.chars_per_token, 4);
        assert_eq!(config.storage.database_path, "pageforge.db");
        assert_eq!(config.providers.anthropic.api_version, "2023-06-01");
        assert_eq!(config.research.youtube.max_results, 5);
        assert_eq!(config.research.openweathermap.units, "metric");
    }
}
