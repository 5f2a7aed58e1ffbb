// SPDX-FileCopyrightText: 2026 Pageforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layout payload transcoding for page-builder integrations.
//!
//! Builders store layout state as JSON, base64, slashed, or double-encoded
//! blobs inside a single metadata value. These codecs convert the blob to a
//! plain JSON tree before keyword substitution and back to the exact
//! on-disk shape afterwards.

pub mod codec;
pub mod set;

pub use codec::{
    add_slashes, strip_slashes, Base64JsonCodec, DoubleEncodedJsonCodec, JsonCodec,
    SlashedJsonCodec,
};
pub use set::TranscoderSet;
