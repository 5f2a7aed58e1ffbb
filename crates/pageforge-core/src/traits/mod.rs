// SPDX-FileCopyrightText: 2026 Pageforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions.
//!
//! Every integration implements [`Integration`]; the per-capability traits
//! ([`ChatProvider`], [`MetadataStore`], [`MediaStore`], [`ResearchSource`],
//! [`LayoutTranscoder`]) add the behavior a capability needs.

pub mod integration;
pub mod provider;
pub mod research;
pub mod storage;
pub mod transcoder;

pub use integration::Integration;
pub use provider::ChatProvider;
pub use research::ResearchSource;
pub use storage::{MediaStore, MetadataStore};
pub use transcoder::LayoutTranscoder;
