// SPDX-FileCopyrightText: 2026 Pageforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Page-builder layout transcoding around the substitution pass.
//!
//! Each builder stores its layout tree as an encoded blob inside a single
//! metadata value. The decode hook turns that blob into a plain JSON tree
//! before keyword substitution; the encode hook restores the exact on-disk
//! shape afterwards. A blob that fails to decode passes through unchanged --
//! a broken layout degrades that one builder's page only.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use pageforge_bus::{ContentEvent, GenerationHooks, DEFAULT_PRIORITY};
use pageforge_registry::{Environment, IntegrationRegistry};
use pageforge_transcode::TranscoderSet;
use tracing::warn;

/// The metadata key a builder keeps its layout blob under.
pub fn layout_meta_key(builder: &str) -> Option<&'static str> {
    Some(match builder {
        "bricks" => "_bricks_page_content_2",
        "oxygen" => "ct_builder_json",
        "breakdance" => "_breakdance_data",
        "brizy" => "brizy",
        "zion" => "_zionbuilder_page_elements",
        "yootheme" => "_yootheme_source",
        "elementor" => "_elementor_data",
        "seedprod" => "_seedprod_data",
        "visual-composer" => "vcv-pageContent",
        "live-composer" => "dslc_code",
        "hybrid-composer" => "_hc_sections",
        _ => return None,
    })
}

/// Register decode/encode hooks for every active builder with a codec.
///
/// Builders that are inactive, or whose layout is plain shortcode text with
/// no codec (Divi, WPBakery, Avia), are left alone -- their values pass
/// through the substitution pass as ordinary strings.
///
/// The two hooks share a marker set of keys the decode pass actually
/// decoded, so the encode pass never re-encodes a blob that passed through
/// undecoded. The pipeline runs one page at a time on a single call stack,
/// which keeps the markers consistent between the paired hooks.
pub fn register_builder_transcoding(
    hooks: &mut GenerationHooks,
    registry: &IntegrationRegistry,
    env: &Environment,
    configured_keys: &HashSet<String>,
    transcoders: Arc<TranscoderSet>,
) {
    let active: Vec<(String, &'static str)> = registry
        .list_all()
        .into_iter()
        .filter(|e| registry.is_active(&e.manifest.name, env, configured_keys))
        .filter_map(|e| {
            let name = e.manifest.name.clone();
            transcoders.get(&name)?;
            let key = layout_meta_key(&name)?;
            Some((name, key))
        })
        .collect();

    if active.is_empty() {
        return;
    }

    let decoded: Arc<Mutex<HashSet<String>>> = Arc::new(Mutex::new(HashSet::new()));

    let decode_set = Arc::clone(&transcoders);
    let decode_targets = active.clone();
    let decode_marks = Arc::clone(&decoded);
    hooks
        .content_settings
        .register(DEFAULT_PRIORITY, move |mut ev: ContentEvent| {
            let mut marks = decode_marks.lock().unwrap_or_else(|e| e.into_inner());
            marks.clear();
            for (builder, key) in &decode_targets {
                let Some(serde_json::Value::String(raw)) = ev.post_meta.get(*key) else {
                    continue;
                };
                match decode_set.decode_or_passthrough(builder, raw) {
                    Ok(tree) => {
                        ev.post_meta.insert((*key).to_string(), tree);
                        marks.insert((*key).to_string());
                    }
                    Err(e) => {
                        warn!(builder = %builder, error = %e, "layout decode failed, passing through");
                    }
                }
            }
            ev
        });

    hooks
        .content_generated
        .register(DEFAULT_PRIORITY, move |mut ev: ContentEvent| {
            let mut marks = decoded.lock().unwrap_or_else(|e| e.into_inner());
            for (builder, key) in &active {
                if !marks.remove(*key) {
                    continue;
                }
                let Some(tree) = ev.post_meta.get(*key) else {
                    continue;
                };
                match transcoders.encode_or_passthrough(builder, tree) {
                    Ok(stored) => {
                        ev.post_meta
                            .insert((*key).to_string(), serde_json::Value::String(stored));
                    }
                    Err(e) => {
                        warn!(builder = %builder, error = %e, "layout encode failed, passing through");
                    }
                }
            }
            ev
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use pageforge_core::{GenerationTarget, GroupId, MetaMap};
    use pageforge_registry::builtin_catalog;
    use serde_json::json;

    fn wired_hooks(env: &Environment) -> GenerationHooks {
        let mut registry = IntegrationRegistry::new();
        for manifest in builtin_catalog().unwrap() {
            registry.register(manifest);
        }
        let mut hooks = GenerationHooks::new();
        register_builder_transcoding(
            &mut hooks,
            &registry,
            env,
            &HashSet::new(),
            Arc::new(TranscoderSet::builtin()),
        );
        hooks
    }

    fn event(meta: MetaMap) -> ContentEvent {
        ContentEvent {
            target: GenerationTarget::new_page(GroupId(1)),
            post_meta: meta,
        }
    }

    #[test]
    fn every_codec_builder_has_a_layout_key() {
        for builder in [
            "bricks",
            "oxygen",
            "breakdance",
            "brizy",
            "zion",
            "yootheme",
            "elementor",
            "seedprod",
            "visual-composer",
            "live-composer",
            "hybrid-composer",
        ] {
            assert!(layout_meta_key(builder).is_some(), "missing key for {builder}");
        }
        assert_eq!(layout_meta_key("divi"), None);
    }

    #[test]
    fn active_breakdance_round_trips_through_the_hooks() {
        let mut env = Environment::new();
        env.detect("breakdance", true, Some(semver::Version::new(2, 0, 0)));
        let hooks = wired_hooks(&env);

        let tree = json!({"root": {"children": [{"text": "{city}"}]}});
        let stored = TranscoderSet::builtin()
            .encode_or_passthrough("breakdance", &tree)
            .unwrap();

        let mut meta = MetaMap::new();
        meta.insert("_breakdance_data".into(), json!(stored.clone()));

        // Decode exposes the plain tree to the substitution pass.
        let decoded = hooks.content_settings.apply(event(meta));
        assert_eq!(decoded.post_meta["_breakdance_data"], tree);

        // Encode restores the exact stored blob.
        let encoded = hooks.content_generated.apply(decoded);
        assert_eq!(encoded.post_meta["_breakdance_data"], json!(stored));
    }

    #[test]
    fn inactive_builder_passes_blob_through_unchanged() {
        let env = Environment::new();
        let hooks = wired_hooks(&env);

        let mut meta = MetaMap::new();
        meta.insert("_breakdance_data".into(), json!("\"{\\\"root\\\":[]}\""));
        let snapshot = meta.clone();

        let ev = hooks.content_settings.apply(event(meta));
        assert_eq!(ev.post_meta, snapshot);
    }

    #[test]
    fn malformed_blob_survives_decode_and_encode_unchanged() {
        let mut env = Environment::new();
        env.set_theme(pageforge_registry::ThemeInfo {
            name: "bricks".into(),
            version: Some(semver::Version::new(1, 9, 0)),
            parent: None,
        });
        let hooks = wired_hooks(&env);

        let mut meta = MetaMap::new();
        meta.insert("_bricks_page_content_2".into(), json!("{not json"));
        let snapshot = meta.clone();

        let decoded = hooks.content_settings.apply(event(meta));
        assert_eq!(decoded.post_meta, snapshot);

        // The undecoded blob must not get re-encoded on the way out.
        let encoded = hooks.content_generated.apply(decoded);
        assert_eq!(encoded.post_meta, snapshot);
    }

    #[test]
    fn unrelated_meta_is_untouched() {
        let mut env = Environment::new();
        env.detect("brizy", true, None);
        let hooks = wired_hooks(&env);

        let mut meta = MetaMap::new();
        meta.insert("_thumbnail_id".into(), json!(42));
        meta.insert("brizy".into(), json!(["not", "a", "string"]));

        let ev = hooks.content_settings.apply(event(meta.clone()));
        // Non-string layout values are skipped by the decode hook.
        assert_eq!(ev.post_meta, meta);
    }
}
