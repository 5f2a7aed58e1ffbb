// SPDX-FileCopyrightText: 2026 Pageforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Orphaned-metadata removal.
//!
//! When an integration is not active, its metadata keys must not be carried
//! into newly generated content. The removal is order-independent and
//! idempotent: re-running it on an already-filtered map removes nothing.

use std::collections::HashSet;

use pageforge_core::pattern::any_match;
use pageforge_core::{GroupSettings, KeyPattern, MetaMap};
use pageforge_registry::{Environment, IntegrationRegistry};
use tracing::debug;

/// Remove every key matching any of the patterns. Returns the removal count.
pub fn remove_orphaned_metadata(meta: &mut MetaMap, patterns: &[KeyPattern]) -> usize {
    let before = meta.len();
    meta.retain(|key, _| !any_match(patterns, key));
    before - meta.len()
}

/// Strip the metadata namespaces of every non-active integration from the
/// group's `post_meta`. Returns the total removal count.
pub fn strip_orphaned(
    settings: &mut GroupSettings,
    registry: &IntegrationRegistry,
    env: &Environment,
    configured_keys: &HashSet<String>,
) -> usize {
    let mut removed = 0;
    for entry in registry.get_orphaned(env, configured_keys) {
        if entry.manifest.meta_key_patterns.is_empty() {
            continue;
        }
        let count =
            remove_orphaned_metadata(&mut settings.post_meta, &entry.manifest.meta_key_patterns);
        if count > 0 {
            debug!(
                integration = %entry.manifest.name,
                removed = count,
                "stripped orphaned metadata"
            );
        }
        removed += count;
    }
    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use pageforge_core::IntegrationKind;
    use pageforge_registry::IntegrationManifest;
    use proptest::prelude::*;
    use serde_json::json;

    fn meta(keys: &[&str]) -> MetaMap {
        keys.iter()
            .map(|k| (k.to_string(), json!("value")))
            .collect()
    }

    #[test]
    fn literal_patterns_remove_exact_keys_only() {
        let mut m = meta(&["_elementor_data", "_elementor_data_backup", "title"]);
        let patterns = vec![KeyPattern::literal("_elementor_data")];
        let removed = remove_orphaned_metadata(&mut m, &patterns);
        assert_eq!(removed, 1);
        assert!(!m.contains_key("_elementor_data"));
        assert!(m.contains_key("_elementor_data_backup"));
        assert!(m.contains_key("title"));
    }

    #[test]
    fn regex_patterns_remove_whole_namespace() {
        let mut m = meta(&[
            "_yoast_wpseo_title",
            "_yoast_wpseo_metadesc",
            "_aioseo_title",
            "content",
        ]);
        let patterns = vec![KeyPattern::parse("/^_yoast_wpseo_/").unwrap()];
        let removed = remove_orphaned_metadata(&mut m, &patterns);
        assert_eq!(removed, 2);
        assert_eq!(m.len(), 2);
        assert!(m.contains_key("_aioseo_title"));
    }

    #[test]
    fn empty_patterns_remove_nothing() {
        let mut m = meta(&["a", "b"]);
        assert_eq!(remove_orphaned_metadata(&mut m, &[]), 0);
        assert_eq!(m.len(), 2);
    }

    #[test]
    fn removal_is_idempotent() {
        let mut m = meta(&["_sq_title", "_sq_desc", "keep"]);
        let patterns = vec![KeyPattern::parse("/^_sq_/").unwrap()];
        remove_orphaned_metadata(&mut m, &patterns);
        let snapshot = m.clone();
        let removed_again = remove_orphaned_metadata(&mut m, &patterns);
        assert_eq!(removed_again, 0);
        assert_eq!(m, snapshot);
    }

    #[test]
    fn strip_orphaned_only_touches_inactive_namespaces() {
        let mut yoast = manifest("yoast", &["/^_yoast_wpseo_/"]);
        yoast.depends_on = vec!["wordpress-seo".to_string()];
        let mut elementor = manifest("elementor", &["/^_elementor_/"]);
        elementor.depends_on = vec!["elementor".to_string()];

        let mut registry = IntegrationRegistry::new();
        registry.register(yoast);
        registry.register(elementor);

        // Only elementor's dependency is present.
        let mut env = Environment::new();
        env.detect("elementor", true, None);

        let mut settings = GroupSettings {
            overwrite_sections: Default::default(),
            post_meta: meta(&["_yoast_wpseo_title", "_elementor_data", "plain"]),
        };
        let removed = strip_orphaned(&mut settings, &registry, &env, &HashSet::new());
        assert_eq!(removed, 1);
        assert!(!settings.post_meta.contains_key("_yoast_wpseo_title"));
        assert!(settings.post_meta.contains_key("_elementor_data"));
        assert!(settings.post_meta.contains_key("plain"));
    }

    fn manifest(name: &str, patterns: &[&str]) -> IntegrationManifest {
        IntegrationManifest {
            name: name.to_string(),
            description: String::new(),
            kind: IntegrationKind::SeoPlugin,
            depends_on: vec![],
            theme: None,
            min_version: None,
            meta_key_patterns: patterns.iter().map(|p| KeyPattern::parse(p).unwrap()).collect(),
            overwrite_section: None,
            config_keys: vec![],
            capabilities: vec![],
        }
    }

    proptest! {
        #[test]
        fn removal_idempotent_for_arbitrary_maps(
            keys in proptest::collection::vec("[a-z_]{1,16}", 0..32),
            literals in proptest::collection::vec("[a-z_]{1,16}", 0..8),
            prefixes in proptest::collection::vec("[a-z_]{1,6}", 0..4),
        ) {
            let mut m: MetaMap = keys
                .iter()
                .map(|k| (k.clone(), json!(1)))
                .collect();
            let mut patterns: Vec<KeyPattern> = literals
                .iter()
                .map(|l| KeyPattern::literal(l.clone()))
                .collect();
            for p in &prefixes {
                patterns.push(KeyPattern::parse(&format!("/^{p}/")).unwrap());
            }

            remove_orphaned_metadata(&mut m, &patterns);
            let once = m.clone();
            let removed_again = remove_orphaned_metadata(&mut m, &patterns);
            prop_assert_eq!(removed_again, 0usize);
            prop_assert_eq!(m, once);
        }

        #[test]
        fn surviving_keys_match_no_pattern(
            keys in proptest::collection::vec("[a-z_]{1,16}", 0..32),
            literals in proptest::collection::vec("[a-z_]{1,16}", 0..8),
        ) {
            let mut m: MetaMap = keys.iter().map(|k| (k.clone(), json!(1))).collect();
            let patterns: Vec<KeyPattern> =
                literals.iter().map(|l| KeyPattern::literal(l.clone())).collect();
            remove_orphaned_metadata(&mut m, &patterns);
            for key in m.keys() {
                prop_assert!(!any_match(&patterns, key));
            }
        }
    }
}
