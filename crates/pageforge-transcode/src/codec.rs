// SPDX-FileCopyrightText: 2026 Pageforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layout payload codecs.
//!
//! Each page builder stores its layout state in a single metadata value,
//! in one of four on-disk shapes. Decoding happens before keyword
//! substitution, encoding after, and `encode(decode(x)) == x` must hold
//! byte-for-byte for blobs in the builder's canonical encoding so the
//! builder renders the generated page unmodified.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use pageforge_core::{LayoutTranscoder, PageforgeError};

fn transcode_err(integration: &str, message: impl std::fmt::Display) -> PageforgeError {
    PageforgeError::Transcode {
        integration: integration.to_string(),
        message: message.to_string(),
    }
}

/// Compact JSON, as written by builders that store a plain JSON tree.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl LayoutTranscoder for JsonCodec {
    fn decode(&self, raw: &str) -> Result<serde_json::Value, PageforgeError> {
        serde_json::from_str(raw).map_err(|e| transcode_err("json", e))
    }

    fn encode(&self, value: &serde_json::Value) -> Result<String, PageforgeError> {
        serde_json::to_string(value).map_err(|e| transcode_err("json", e))
    }
}

/// A JSON document stored as a JSON string (the value is encoded twice).
#[derive(Debug, Clone, Copy, Default)]
pub struct DoubleEncodedJsonCodec;

impl LayoutTranscoder for DoubleEncodedJsonCodec {
    fn decode(&self, raw: &str) -> Result<serde_json::Value, PageforgeError> {
        let inner: String =
            serde_json::from_str(raw).map_err(|e| transcode_err("double-json", e))?;
        serde_json::from_str(&inner).map_err(|e| transcode_err("double-json", e))
    }

    fn encode(&self, value: &serde_json::Value) -> Result<String, PageforgeError> {
        let inner = serde_json::to_string(value).map_err(|e| transcode_err("double-json", e))?;
        serde_json::to_string(&inner).map_err(|e| transcode_err("double-json", e))
    }
}

/// Base64-wrapped compact JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct Base64JsonCodec;

impl LayoutTranscoder for Base64JsonCodec {
    fn decode(&self, raw: &str) -> Result<serde_json::Value, PageforgeError> {
        let bytes = BASE64
            .decode(raw.trim())
            .map_err(|e| transcode_err("base64-json", e))?;
        let text = String::from_utf8(bytes).map_err(|e| transcode_err("base64-json", e))?;
        serde_json::from_str(&text).map_err(|e| transcode_err("base64-json", e))
    }

    fn encode(&self, value: &serde_json::Value) -> Result<String, PageforgeError> {
        let text = serde_json::to_string(value).map_err(|e| transcode_err("base64-json", e))?;
        Ok(BASE64.encode(text.as_bytes()))
    }
}

/// Compact JSON stored through a slashing layer: backslashes, double quotes,
/// and single quotes are backslash-escaped on disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct SlashedJsonCodec;

impl LayoutTranscoder for SlashedJsonCodec {
    fn decode(&self, raw: &str) -> Result<serde_json::Value, PageforgeError> {
        let unslashed = strip_slashes(raw);
        serde_json::from_str(&unslashed).map_err(|e| transcode_err("slashed-json", e))
    }

    fn encode(&self, value: &serde_json::Value) -> Result<String, PageforgeError> {
        let text = serde_json::to_string(value).map_err(|e| transcode_err("slashed-json", e))?;
        Ok(add_slashes(&text))
    }
}

/// Escape `\`, `"`, and `'` with a backslash.
pub fn add_slashes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '"' | '\'') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Remove one level of backslash escaping.
pub fn strip_slashes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some(next) => out.push(next),
                // Trailing lone backslash stays.
                None => out.push('\\'),
            }
        } else {
            out.push(c);
        }
    }
    out
}
