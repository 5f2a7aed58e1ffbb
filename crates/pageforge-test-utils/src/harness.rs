// SPDX-FileCopyrightText: 2026 Pageforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Harness driving a complete generation pass in tests.
//!
//! Assembles the built-in catalog, a configurable environment snapshot, the
//! wired hook bus, and an in-memory store, then runs the same sequence the
//! generation engine runs per page: strip orphans, resolve ignored keys,
//! decode layouts, substitute, encode layouts, persist, notify.

use std::collections::HashSet;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use pageforge_bus::{ContentEvent, FinishedEvent, GenerationHooks, IgnoredKeysEvent};
use pageforge_core::pattern::any_match;
use pageforge_core::{
    GenerationTarget, GroupSettings, MetaMap, MetadataStore, PageforgeError, PostId,
};
use pageforge_integrations::register_builtin;
use pageforge_registry::{builtin_catalog, Environment, IntegrationRegistry, ThemeInfo};
use pageforge_transcode::TranscoderSet;

use crate::memory_store::MemoryMetadataStore;

/// Builder for a [`GenerationHarness`].
pub struct GenerationHarnessBuilder {
    dependencies: Vec<(String, Option<semver::Version>)>,
    theme: Option<ThemeInfo>,
    configured_keys: HashSet<String>,
}

impl GenerationHarnessBuilder {
    fn new() -> Self {
        Self {
            dependencies: Vec::new(),
            theme: None,
            configured_keys: HashSet::new(),
        }
    }

    /// Mark a third-party dependency as detected and active.
    pub fn with_dependency(mut self, slug: &str, version: Option<semver::Version>) -> Self {
        self.dependencies.push((slug.to_string(), version));
        self
    }

    /// Set the active theme.
    pub fn with_theme(mut self, name: &str, version: Option<semver::Version>) -> Self {
        self.theme = Some(ThemeInfo {
            name: name.to_string(),
            version,
            parent: None,
        });
        self
    }

    /// Mark a credential key as configured (e.g. `providers.openai.api_key`).
    pub fn with_configured_key(mut self, key: &str) -> Self {
        self.configured_keys.insert(key.to_string());
        self
    }

    /// Build the harness and wire every built-in integration.
    pub fn build(self) -> Result<GenerationHarness, PageforgeError> {
        let mut registry = IntegrationRegistry::new();
        for manifest in builtin_catalog()? {
            registry.register(manifest);
        }

        let mut env = Environment::new();
        for (slug, version) in self.dependencies {
            env.detect(slug, true, version);
        }
        if let Some(theme) = self.theme {
            env.set_theme(theme);
        }

        let mut hooks = GenerationHooks::new();
        register_builtin(
            &mut hooks,
            &registry,
            &env,
            &self.configured_keys,
            Arc::new(TranscoderSet::builtin()),
        );

        Ok(GenerationHarness {
            registry,
            env,
            configured_keys: self.configured_keys,
            hooks,
            store: Arc::new(MemoryMetadataStore::new()),
            next_post: AtomicI64::new(1),
        })
    }
}

/// A wired generation pipeline over an in-memory store.
pub struct GenerationHarness {
    pub registry: IntegrationRegistry,
    pub env: Environment,
    pub configured_keys: HashSet<String>,
    pub hooks: GenerationHooks,
    pub store: Arc<MemoryMetadataStore>,
    next_post: AtomicI64,
}

impl GenerationHarness {
    pub fn builder() -> GenerationHarnessBuilder {
        GenerationHarnessBuilder::new()
    }

    /// True iff the named integration resolves to Active in this harness.
    pub fn is_active(&self, name: &str) -> bool {
        self.registry
            .is_active(name, &self.env, &self.configured_keys)
    }

    /// Run one generation pass and return the id the page was written under.
    ///
    /// `substitute` stands in for the keyword/spintax engine: it sees the
    /// metadata with layout blobs already decoded to plain JSON.
    pub async fn generate(
        &self,
        group: &GroupSettings,
        target: GenerationTarget,
        substitute: impl Fn(&mut MetaMap),
    ) -> Result<PostId, PageforgeError> {
        // Orphan stripping on the group's settings.
        let settings = self.hooks.group_settings.apply(group.clone());

        // Overwrite gates resolve which keys must not be written.
        let gated = self.hooks.ignored_meta_keys.apply(IgnoredKeysEvent {
            ignored_keys: vec![],
            target,
            group: settings.clone(),
        });

        // Decode, substitute, encode.
        let decoded = self.hooks.content_settings.apply(ContentEvent {
            target,
            post_meta: settings.post_meta,
        });
        let mut meta = decoded.post_meta;
        substitute(&mut meta);
        let encoded = self.hooks.content_generated.apply(ContentEvent {
            target,
            post_meta: meta,
        });

        // Persist, skipping gated keys.
        let post = match target.existing_id {
            Some(existing) => existing,
            None => PostId(self.next_post.fetch_add(1, Ordering::SeqCst)),
        };
        for (key, value) in encoded.post_meta {
            if any_match(&gated.ignored_keys, &key) {
                continue;
            }
            self.store.set_post_meta(post, &key, value).await?;
        }

        self.hooks.generation_finished.emit(&FinishedEvent {
            target,
            generated: post,
        });
        Ok(post)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pageforge_core::GroupId;
    use serde_json::json;

    fn group(meta: &[(&str, serde_json::Value)], sections: &[&str]) -> GroupSettings {
        GroupSettings {
            overwrite_sections: sections.iter().map(ToString::to_string).collect(),
            post_meta: meta
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        }
    }

    #[tokio::test]
    async fn new_pages_get_sequential_ids() {
        let harness = GenerationHarness::builder().build().unwrap();
        let g = group(&[("title", json!("a"))], &[]);

        let first = harness
            .generate(&g, GenerationTarget::new_page(GroupId(1)), |_| {})
            .await
            .unwrap();
        let second = harness
            .generate(&g, GenerationTarget::new_page(GroupId(1)), |_| {})
            .await
            .unwrap();
        assert_eq!(first, PostId(1));
        assert_eq!(second, PostId(2));
    }

    #[tokio::test]
    async fn substitution_sees_and_writes_plain_values() {
        let harness = GenerationHarness::builder().build().unwrap();
        let g = group(&[("headline", json!("Welcome to {city}"))], &[]);

        let post = harness
            .generate(&g, GenerationTarget::new_page(GroupId(1)), |meta| {
                if let Some(serde_json::Value::String(s)) = meta.get_mut("headline") {
                    *s = s.replace("{city}", "Leeds");
                }
            })
            .await
            .unwrap();

        assert_eq!(
            harness.store.get_post_meta(post, "headline").await.unwrap(),
            Some(json!("Welcome to Leeds"))
        );
    }

    #[tokio::test]
    async fn activation_reflects_builder_inputs() {
        let harness = GenerationHarness::builder()
            .with_dependency("wordpress-seo", None)
            .with_configured_key("providers.openai.api_key")
            .build()
            .unwrap();

        assert!(harness.is_active("yoast"));
        assert!(harness.is_active("openai"));
        assert!(!harness.is_active("aioseo"));
        assert!(!harness.is_active("gemini"));
    }
}
