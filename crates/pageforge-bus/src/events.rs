// SPDX-FileCopyrightText: 2026 Pageforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The named, typed hook points of the generation pipeline.

use pageforge_core::{GenerationTarget, GroupSettings, KeyPattern, MetaMap, PostId};

use crate::bus::{ActionBus, FilterBus};

/// Payload for the ignored-keys hook: which metadata keys the generation
/// engine must NOT copy onto the target page.
#[derive(Debug, Clone)]
pub struct IgnoredKeysEvent {
    pub ignored_keys: Vec<KeyPattern>,
    pub target: GenerationTarget,
    pub group: GroupSettings,
}

/// Payload for the content hooks that bracket keyword substitution.
///
/// `content_settings` handlers decode builder layout blobs into plain JSON
/// before substitution; `content_generated` handlers re-encode them after.
#[derive(Debug, Clone)]
pub struct ContentEvent {
    pub target: GenerationTarget,
    pub post_meta: MetaMap,
}

/// Payload emitted once a page has been written.
#[derive(Debug, Clone)]
pub struct FinishedEvent {
    pub target: GenerationTarget,
    pub generated: PostId,
}

/// All hook points of one generation pass.
///
/// Integrations register handlers here instead of subscribing to stringly
/// named filters; payload shape and argument order are compiler-checked.
#[derive(Default)]
pub struct GenerationHooks {
    /// Extends the ignored-keys list (overwrite-section gates).
    pub ignored_meta_keys: FilterBus<IgnoredKeysEvent>,
    /// Rewrites group settings before generation (orphan stripping).
    pub group_settings: FilterBus<GroupSettings>,
    /// Runs before keyword substitution (builder payload decode).
    pub content_settings: FilterBus<ContentEvent>,
    /// Runs after keyword substitution (builder payload encode).
    pub content_generated: FilterBus<ContentEvent>,
    /// Fires after the page is persisted.
    pub generation_finished: ActionBus<FinishedEvent>,
}

impl GenerationHooks {
    pub fn new() -> Self {
        Self::default()
    }
}
