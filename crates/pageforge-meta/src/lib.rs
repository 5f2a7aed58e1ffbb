// SPDX-FileCopyrightText: 2026 Pageforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Metadata filtering for the Pageforge generation pipeline: orphaned-key
//! removal for inactive integrations and the overwrite-section gate for
//! regenerated pages.

pub mod fields;
pub mod orphan;
pub mod overwrite;

pub use fields::FieldCache;
pub use orphan::{remove_orphaned_metadata, strip_orphaned};
pub use overwrite::{prevent_meta_copy, register_overwrite_gate, should_overwrite};
