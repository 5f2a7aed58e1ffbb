// SPDX-FileCopyrightText: 2026 Pageforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Pageforge integrations layer.

use thiserror::Error;

/// The primary error type used across all Pageforge adapter traits and core operations.
///
/// Expected failures travel as values. Absence of a third-party dependency is
/// NOT an error anywhere in this workspace -- integrations pass the original
/// value through unchanged when their dependency is missing.
#[derive(Debug, Error)]
pub enum PageforgeError {
    /// Configuration errors (missing API key, invalid TOML, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Provider errors (transport failure, provider-reported error payload).
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The prompt exceeds the model's token ceiling before any output budget remains.
    #[error("prompt too long for {model}: estimated {estimated} tokens, limit {limit}")]
    PromptTooLong {
        model: String,
        estimated: u32,
        limit: u32,
    },

    /// Storage backend errors (database connection, query failure, serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Layout payload could not be decoded or re-encoded for a page builder.
    #[error("transcode error for {integration}: {message}")]
    Transcode {
        integration: String,
        message: String,
    },

    /// Media fetch or import errors (bad URL, non-image response).
    #[error("media error: {message}")]
    Media {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Requested integration was not found in the registry.
    #[error("integration not found: {kind}/{name}")]
    IntegrationNotFound { kind: String, name: String },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl PageforgeError {
    /// Wrap a provider-side failure with a provider-prefixed message.
    pub fn provider(provider: &str, message: impl std::fmt::Display) -> Self {
        Self::Provider {
            message: format!("{provider}: {message}"),
            source: None,
        }
    }

    /// Wrap a transport-level failure, keeping the underlying error as source.
    pub fn transport(
        provider: &str,
        err: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Provider {
            message: format!("{provider}: request failed: {err}"),
            source: Some(Box::new(err)),
        }
    }
}
