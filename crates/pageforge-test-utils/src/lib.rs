// SPDX-FileCopyrightText: 2026 Pageforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for the Pageforge workspace.
//!
//! Provides a mock chat provider with queued responses, an in-memory
//! metadata/media store, and a [`GenerationHarness`] that drives a complete
//! generation pass (orphan stripping, overwrite gating, builder transcoding,
//! persistence) without a real database or network.

pub mod harness;
pub mod memory_store;
pub mod mock_provider;

pub use harness::GenerationHarness;
pub use memory_store::MemoryMetadataStore;
pub use mock_provider::MockChatProvider;
