// SPDX-FileCopyrightText: 2026 Pageforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Built-in integration wiring for the generation pipeline.
//!
//! Assembles the catalog, the detected environment, and the hook bus into a
//! ready pipeline: orphan stripping for inactive integrations, overwrite
//! gates for active ones, and layout transcoding around the substitution
//! pass for active page builders.

pub mod builders;
pub mod seo;

use std::collections::HashSet;
use std::sync::Arc;

use pageforge_bus::{GenerationHooks, DEFAULT_PRIORITY};
use pageforge_core::KeyPattern;
use pageforge_meta::{register_overwrite_gate, remove_orphaned_metadata};
use pageforge_registry::{Environment, IntegrationRegistry};
use pageforge_transcode::TranscoderSet;
use tracing::debug;

pub use builders::{layout_meta_key, register_builder_transcoding};
pub use seo::{update_aioseo_post_table, update_rank_math_options, AioseoRecord};

/// Wire every built-in integration behavior into the hook bus.
///
/// Activation is resolved once, here, against the environment and
/// configuration snapshot; the returned hook set is then used for every
/// page of the run. Inactive integrations contribute only their orphan
/// patterns; active ones contribute overwrite gates and (for builders
/// with a registered codec) the decode/encode pair around substitution.
pub fn register_builtin(
    hooks: &mut GenerationHooks,
    registry: &IntegrationRegistry,
    env: &Environment,
    configured_keys: &HashSet<String>,
    transcoders: Arc<TranscoderSet>,
) {
    // Orphan stripping runs before everything else on group settings.
    let orphaned: Vec<KeyPattern> = registry
        .get_orphaned(env, configured_keys)
        .into_iter()
        .flat_map(|e| e.manifest.meta_key_patterns.iter().cloned())
        .collect();
    if !orphaned.is_empty() {
        debug!(patterns = orphaned.len(), "registering orphan stripping");
        hooks.group_settings.register(DEFAULT_PRIORITY, move |mut settings| {
            remove_orphaned_metadata(&mut settings.post_meta, &orphaned);
            settings
        });
    }

    // Overwrite gates for every active integration that declares a section.
    for entry in registry.list_all() {
        if entry.manifest.overwrite_section.is_none() {
            continue;
        }
        if !registry.is_active(&entry.manifest.name, env, configured_keys) {
            continue;
        }
        register_overwrite_gate(hooks, entry.manifest.clone());
    }

    builders::register_builder_transcoding(hooks, registry, env, configured_keys, transcoders);
}
