// SPDX-FileCopyrightText: 2026 Pageforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Pageforge integrations layer.
//!
//! This crate provides the foundational trait definitions, error types, and
//! common types used throughout the Pageforge workspace. All integration
//! adapters implement traits defined here.

pub mod error;
pub mod estimator;
pub mod pattern;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::PageforgeError;
pub use estimator::{HeuristicEstimator, TokenEstimator};
pub use pattern::KeyPattern;
pub use types::{
    ChatMessage, ChatParams, ChatRole, Completion, GenerationTarget, GroupId, GroupSettings,
    HealthStatus, ImageData, IntegrationKind, MediaId, MetaMap, ModelSpec, PostId, RateLimited,
    ResearchResult, TokenUsage, TuningParam,
};

// Re-export all adapter traits at crate root.
pub use traits::{
    ChatProvider, Integration, LayoutTranscoder, MediaStore, MetadataStore, ResearchSource,
};
