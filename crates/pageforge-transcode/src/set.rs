// SPDX-FileCopyrightText: 2026 Pageforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-integration codec lookup with pass-through fallback.
//!
//! When no codec is registered for an integration (its builder is absent or
//! stores plain text), the value passes through unchanged. Absence is an
//! expected state, never an error.

use std::collections::HashMap;
use std::sync::Arc;

use pageforge_core::{LayoutTranscoder, PageforgeError};
use tracing::debug;

use crate::codec::{Base64JsonCodec, DoubleEncodedJsonCodec, JsonCodec, SlashedJsonCodec};

/// Maps integration names to their layout codecs.
#[derive(Default)]
pub struct TranscoderSet {
    codecs: HashMap<String, Arc<dyn LayoutTranscoder>>,
}

impl TranscoderSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in builder assignments.
    pub fn builtin() -> Self {
        let mut set = Self::new();
        let json: Arc<dyn LayoutTranscoder> = Arc::new(JsonCodec);
        for name in ["bricks", "oxygen", "zion", "yootheme", "elementor", "seedprod"] {
            set.register(name, Arc::clone(&json));
        }
        let slashed: Arc<dyn LayoutTranscoder> = Arc::new(SlashedJsonCodec);
        for name in ["visual-composer", "live-composer", "hybrid-composer"] {
            set.register(name, Arc::clone(&slashed));
        }
        set.register("brizy", Arc::new(Base64JsonCodec));
        set.register("breakdance", Arc::new(DoubleEncodedJsonCodec));
        set
    }

    pub fn register(&mut self, integration: &str, codec: Arc<dyn LayoutTranscoder>) {
        self.codecs.insert(integration.to_string(), codec);
    }

    pub fn get(&self, integration: &str) -> Option<&Arc<dyn LayoutTranscoder>> {
        self.codecs.get(integration)
    }

    /// Decode a stored blob, or pass it through as a plain string when no
    /// codec is registered for the integration.
    pub fn decode_or_passthrough(
        &self,
        integration: &str,
        raw: &str,
    ) -> Result<serde_json::Value, PageforgeError> {
        match self.codecs.get(integration) {
            Some(codec) => codec.decode(raw),
            None => {
                debug!(integration, "no codec registered, passing through");
                Ok(serde_json::Value::String(raw.to_string()))
            }
        }
    }

    /// Encode a substituted tree, or pass a plain string back through when
    /// no codec is registered.
    pub fn encode_or_passthrough(
        &self,
        integration: &str,
        value: &serde_json::Value,
    ) -> Result<String, PageforgeError> {
        match self.codecs.get(integration) {
            Some(codec) => codec.encode(value),
            None => match value {
                serde_json::Value::String(s) => Ok(s.clone()),
                other => serde_json::to_string(other).map_err(|e| {
                    PageforgeError::Transcode {
                        integration: integration.to_string(),
                        message: e.to_string(),
                    }
                }),
            },
        }
    }
}
