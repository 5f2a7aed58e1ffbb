// SPDX-FileCopyrightText: 2026 Pageforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes. Collects every failure instead of stopping at the first.

use crate::diagnostic::ConfigError;
use crate::model::PageforgeConfig;

const WEATHER_UNITS: &[&str] = &["metric", "imperial", "standard"];
const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &PageforgeConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if !LOG_LEVELS.contains(&config.generation.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "generation.log_level `{}` is not one of: {}",
                config.generation.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if config.generation.chars_per_token == 0 {
        errors.push(ConfigError::Validation {
            message: "generation.chars_per_token must be at least 1".to_string(),
        });
    }

    if config.generation.request_timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "generation.request_timeout_secs must be at least 1".to_string(),
        });
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    if config.research.youtube.max_results == 0 || config.research.youtube.max_results > 50 {
        errors.push(ConfigError::Validation {
            message: format!(
                "research.youtube.max_results must be between 1 and 50, got {}",
                config.research.youtube.max_results
            ),
        });
    }

    if !WEATHER_UNITS.contains(&config.research.openweathermap.units.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "research.openweathermap.units `{}` is not one of: {}",
                config.research.openweathermap.units,
                WEATHER_UNITS.join(", ")
            ),
        });
    }

    // Spin Rewriter and WordAi credentials come in pairs; half a pair is
    // always a mistake.
    let sr = &config.spinners.spinrewriter;
    if sr.email_address.is_empty() != sr.api_key.is_empty() {
        errors.push(ConfigError::Validation {
            message:
                "spinners.spinrewriter requires both email_address and api_key (one is missing)"
                    .to_string(),
        });
    }
    let wa = &config.spinners.wordai;
    if wa.email.is_empty() != wa.api_key.is_empty() {
        errors.push(ConfigError::Validation {
            message: "spinners.wordai requires both email and api_key (one is missing)"
                .to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
