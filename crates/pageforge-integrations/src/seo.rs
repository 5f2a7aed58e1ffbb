// SPDX-FileCopyrightText: 2026 Pageforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SEO integrations that bypass post metadata.
//!
//! Most SEO plugins keep their fields in post metadata, where the overwrite
//! gate and orphan stripping handle them generically. AIOSEO keeps a
//! dedicated row per post and Rank Math keeps per-post option records; both
//! writes go through here so the special-cased storage stays explicit.

use pageforge_core::{GenerationTarget, GroupSettings, MetadataStore, PageforgeError, PostId};
use pageforge_meta::should_overwrite;
use pageforge_registry::IntegrationManifest;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The AIOSEO fields written to its dedicated post table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AioseoRecord {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub og_title: String,
    #[serde(default)]
    pub og_description: String,
    #[serde(default)]
    pub canonical_url: String,
}

/// Write the AIOSEO record for a generated page.
///
/// Honors the overwrite-section gate: on a regenerated page whose group did
/// not choose the `aioseo` section, nothing is written. Returns whether a
/// row was written.
pub async fn update_aioseo_post_table(
    store: &dyn MetadataStore,
    target: &GenerationTarget,
    group: &GroupSettings,
    manifest: &IntegrationManifest,
    post: PostId,
    record: &AioseoRecord,
) -> Result<bool, PageforgeError> {
    if !should_overwrite(target, group, manifest) {
        debug!(post = post.0, "aioseo overwrite not chosen, skipping");
        return Ok(false);
    }
    let data = serde_json::to_value(record).map_err(|e| PageforgeError::Storage {
        source: Box::new(e),
    })?;
    store.upsert_integration_row("aioseo", post, data).await?;
    Ok(true)
}

/// Write Rank Math's per-post record to the options table.
///
/// Same gate semantics as [`update_aioseo_post_table`]; the record lands
/// under `rank_math_post_<id>`.
pub async fn update_rank_math_options(
    store: &dyn MetadataStore,
    target: &GenerationTarget,
    group: &GroupSettings,
    manifest: &IntegrationManifest,
    post: PostId,
    data: serde_json::Value,
) -> Result<bool, PageforgeError> {
    if !should_overwrite(target, group, manifest) {
        debug!(post = post.0, "rank math overwrite not chosen, skipping");
        return Ok(false);
    }
    store
        .set_option(&format!("rank_math_post_{}", post.0), data)
        .await?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pageforge_core::{GroupId, MetaMap};
    use pageforge_registry::builtin_catalog;
    use serde_json::json;
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingStore {
        rows: Mutex<BTreeMap<(String, i64), serde_json::Value>>,
        options: Mutex<BTreeMap<String, serde_json::Value>>,
    }

    #[async_trait]
    impl MetadataStore for RecordingStore {
        async fn get_post_meta(
            &self,
            _post: PostId,
            _key: &str,
        ) -> Result<Option<serde_json::Value>, PageforgeError> {
            Ok(None)
        }

        async fn set_post_meta(
            &self,
            _post: PostId,
            _key: &str,
            _value: serde_json::Value,
        ) -> Result<(), PageforgeError> {
            Ok(())
        }

        async fn delete_post_meta(&self, _post: PostId, _key: &str) -> Result<(), PageforgeError> {
            Ok(())
        }

        async fn post_meta(&self, _post: PostId) -> Result<MetaMap, PageforgeError> {
            Ok(MetaMap::new())
        }

        async fn get_option(
            &self,
            name: &str,
        ) -> Result<Option<serde_json::Value>, PageforgeError> {
            Ok(self.options.lock().unwrap().get(name).cloned())
        }

        async fn set_option(
            &self,
            name: &str,
            value: serde_json::Value,
        ) -> Result<(), PageforgeError> {
            self.options.lock().unwrap().insert(name.to_string(), value);
            Ok(())
        }

        async fn upsert_integration_row(
            &self,
            integration: &str,
            post: PostId,
            data: serde_json::Value,
        ) -> Result<(), PageforgeError> {
            self.rows
                .lock()
                .unwrap()
                .insert((integration.to_string(), post.0), data);
            Ok(())
        }

        async fn integration_row(
            &self,
            integration: &str,
            post: PostId,
        ) -> Result<Option<serde_json::Value>, PageforgeError> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .get(&(integration.to_string(), post.0))
                .cloned())
        }
    }

    fn aioseo_manifest() -> IntegrationManifest {
        builtin_catalog()
            .unwrap()
            .into_iter()
            .find(|m| m.name == "aioseo")
            .unwrap()
    }

    fn group_with(section: Option<&str>) -> GroupSettings {
        GroupSettings {
            overwrite_sections: section.iter().map(ToString::to_string).collect(),
            post_meta: MetaMap::new(),
        }
    }

    #[tokio::test]
    async fn aioseo_row_is_written_when_section_chosen_on_regeneration() {
        let store = RecordingStore::default();
        let target = GenerationTarget::regenerate(GroupId(1), PostId(5));
        let record = AioseoRecord {
            title: "Plumbers in Birmingham".to_string(),
            description: "Find a local plumber".to_string(),
            ..Default::default()
        };

        let written = update_aioseo_post_table(
            &store,
            &target,
            &group_with(Some("aioseo")),
            &aioseo_manifest(),
            PostId(5),
            &record,
        )
        .await
        .unwrap();
        assert!(written);

        let row = store.integration_row("aioseo", PostId(5)).await.unwrap().unwrap();
        assert_eq!(row["title"], "Plumbers in Birmingham");
    }

    #[tokio::test]
    async fn aioseo_row_is_skipped_when_section_not_chosen() {
        let store = RecordingStore::default();
        let target = GenerationTarget::regenerate(GroupId(1), PostId(5));

        let written = update_aioseo_post_table(
            &store,
            &target,
            &group_with(Some("yoast_seo")),
            &aioseo_manifest(),
            PostId(5),
            &AioseoRecord::default(),
        )
        .await
        .unwrap();
        assert!(!written);
        assert!(store.integration_row("aioseo", PostId(5)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn brand_new_page_always_writes() {
        let store = RecordingStore::default();
        let target = GenerationTarget::new_page(GroupId(1));

        let written = update_aioseo_post_table(
            &store,
            &target,
            &group_with(None),
            &aioseo_manifest(),
            PostId(9),
            &AioseoRecord::default(),
        )
        .await
        .unwrap();
        assert!(written);
    }

    #[tokio::test]
    async fn rank_math_record_lands_in_options() {
        let store = RecordingStore::default();
        let manifest = builtin_catalog()
            .unwrap()
            .into_iter()
            .find(|m| m.name == "rank-math")
            .unwrap();

        let written = update_rank_math_options(
            &store,
            &GenerationTarget::regenerate(GroupId(2), PostId(7)),
            &group_with(Some("rank_math")),
            &manifest,
            PostId(7),
            json!({"focus_keyword": "emergency plumber"}),
        )
        .await
        .unwrap();
        assert!(written);
        assert_eq!(
            store.get_option("rank_math_post_7").await.unwrap(),
            Some(json!({"focus_keyword": "emergency plumber"}))
        );
    }
}
