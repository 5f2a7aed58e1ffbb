// SPDX-FileCopyrightText: 2026 Pageforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Overwrite-section gate.
//!
//! When regenerating an existing page, each integration's fields are either
//! overwritten or left untouched, driven by the group's per-section choice.
//! The gate appends the integration's key patterns to the ignored-keys list
//! whenever its section was NOT chosen, so the generation engine skips
//! writing them onto the existing page. Evaluated once per generated page
//! per integration.

use pageforge_bus::{GenerationHooks, IgnoredKeysEvent, DEFAULT_PRIORITY};
use pageforge_core::{GenerationTarget, GroupSettings, KeyPattern};
use pageforge_registry::IntegrationManifest;

/// Core gate decision.
///
/// Returns `ignored` unchanged when the target is a brand-new page, when the
/// manifest declares no overwrite section, or when the group chose to
/// overwrite this section. Otherwise appends the manifest's key patterns.
pub fn prevent_meta_copy(
    mut ignored: Vec<KeyPattern>,
    target: &GenerationTarget,
    group: &GroupSettings,
    manifest: &IntegrationManifest,
) -> Vec<KeyPattern> {
    if target.existing_id.is_none() {
        return ignored;
    }
    let Some(section) = &manifest.overwrite_section else {
        return ignored;
    };
    if group.overwrite_sections.contains(section) {
        return ignored;
    }
    ignored.extend(manifest.meta_key_patterns.iter().cloned());
    ignored
}

/// Returns true when the gate allows writing this integration's fields:
/// a brand-new page always writes; an existing page writes only when the
/// group chose the integration's section.
pub fn should_overwrite(
    target: &GenerationTarget,
    group: &GroupSettings,
    manifest: &IntegrationManifest,
) -> bool {
    if target.existing_id.is_none() {
        return true;
    }
    match &manifest.overwrite_section {
        Some(section) => group.overwrite_sections.contains(section),
        None => true,
    }
}

/// Register the gate as an ignored-keys filter for one integration.
pub fn register_overwrite_gate(hooks: &mut GenerationHooks, manifest: IntegrationManifest) {
    hooks
        .ignored_meta_keys
        .register(DEFAULT_PRIORITY, move |mut ev: IgnoredKeysEvent| {
            ev.ignored_keys =
                prevent_meta_copy(ev.ignored_keys, &ev.target, &ev.group, &manifest);
            ev
        });
}
