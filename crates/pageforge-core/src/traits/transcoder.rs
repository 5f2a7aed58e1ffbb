// SPDX-FileCopyrightText: 2026 Pageforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layout payload transcoding trait for page-builder integrations.

use crate::error::PageforgeError;

/// Converts a builder's stored layout blob to a plain JSON tree and back.
///
/// `encode(decode(x))` must reproduce `x` byte-for-byte for any well-formed
/// stored blob, including the builder's slashing/escaping conventions, so
/// the builder can render the generated page without modification.
pub trait LayoutTranscoder: Send + Sync {
    /// Decode the on-disk blob into a plain JSON tree for substitution.
    fn decode(&self, raw: &str) -> Result<serde_json::Value, PageforgeError>;

    /// Re-encode the substituted tree into the on-disk shape.
    fn encode(&self, value: &serde_json::Value) -> Result<String, PageforgeError>;
}
