// SPDX-FileCopyrightText: 2026 Pageforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory MetadataStore/MediaStore with the same last-write-wins
//! semantics as the SQLite store.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;

use pageforge_core::{
    ImageData, MediaId, MediaStore, MetaMap, MetadataStore, PageforgeError, PostId,
};

#[derive(Default)]
struct Inner {
    post_meta: BTreeMap<(i64, String), serde_json::Value>,
    options: BTreeMap<String, serde_json::Value>,
    rows: BTreeMap<(String, i64), serde_json::Value>,
    media: Vec<(ImageData, Option<PostId>)>,
}

/// In-memory store backing harness-driven tests.
#[derive(Default)]
pub struct MemoryMetadataStore {
    inner: Mutex<Inner>,
}

impl MemoryMetadataStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Imported media, for assertions.
    pub fn media(&self) -> Vec<(ImageData, Option<PostId>)> {
        self.lock().media.clone()
    }
}

#[async_trait]
impl MetadataStore for MemoryMetadataStore {
    async fn get_post_meta(
        &self,
        post: PostId,
        key: &str,
    ) -> Result<Option<serde_json::Value>, PageforgeError> {
        Ok(self.lock().post_meta.get(&(post.0, key.to_string())).cloned())
    }

    async fn set_post_meta(
        &self,
        post: PostId,
        key: &str,
        value: serde_json::Value,
    ) -> Result<(), PageforgeError> {
        self.lock().post_meta.insert((post.0, key.to_string()), value);
        Ok(())
    }

    async fn delete_post_meta(&self, post: PostId, key: &str) -> Result<(), PageforgeError> {
        self.lock().post_meta.remove(&(post.0, key.to_string()));
        Ok(())
    }

    async fn post_meta(&self, post: PostId) -> Result<MetaMap, PageforgeError> {
        Ok(self
            .lock()
            .post_meta
            .iter()
            .filter(|((id, _), _)| *id == post.0)
            .map(|((_, key), value)| (key.clone(), value.clone()))
            .collect())
    }

    async fn get_option(&self, name: &str) -> Result<Option<serde_json::Value>, PageforgeError> {
        Ok(self.lock().options.get(name).cloned())
    }

    async fn set_option(
        &self,
        name: &str,
        value: serde_json::Value,
    ) -> Result<(), PageforgeError> {
        self.lock().options.insert(name.to_string(), value);
        Ok(())
    }

    async fn upsert_integration_row(
        &self,
        integration: &str,
        post: PostId,
        data: serde_json::Value,
    ) -> Result<(), PageforgeError> {
        self.lock().rows.insert((integration.to_string(), post.0), data);
        Ok(())
    }

    async fn integration_row(
        &self,
        integration: &str,
        post: PostId,
    ) -> Result<Option<serde_json::Value>, PageforgeError> {
        Ok(self.lock().rows.get(&(integration.to_string(), post.0)).cloned())
    }
}

#[async_trait]
impl MediaStore for MemoryMetadataStore {
    async fn import(
        &self,
        image: ImageData,
        attach_to: Option<PostId>,
    ) -> Result<MediaId, PageforgeError> {
        let mut inner = self.lock();
        inner.media.push((image, attach_to));
        Ok(MediaId(inner.media.len() as i64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn post_meta_is_scoped_per_post() {
        let store = MemoryMetadataStore::new();
        store.set_post_meta(PostId(1), "a", json!(1)).await.unwrap();
        store.set_post_meta(PostId(2), "a", json!(2)).await.unwrap();
        store.set_post_meta(PostId(1), "b", json!(3)).await.unwrap();

        let map = store.post_meta(PostId(1)).await.unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map["a"], json!(1));

        store.delete_post_meta(PostId(1), "a").await.unwrap();
        assert_eq!(store.get_post_meta(PostId(1), "a").await.unwrap(), None);
        assert_eq!(store.get_post_meta(PostId(2), "a").await.unwrap(), Some(json!(2)));
    }

    #[tokio::test]
    async fn last_write_wins_everywhere() {
        let store = MemoryMetadataStore::new();
        store.set_option("opt", json!("old")).await.unwrap();
        store.set_option("opt", json!("new")).await.unwrap();
        assert_eq!(store.get_option("opt").await.unwrap(), Some(json!("new")));

        store
            .upsert_integration_row("aioseo", PostId(1), json!({"v": 1}))
            .await
            .unwrap();
        store
            .upsert_integration_row("aioseo", PostId(1), json!({"v": 2}))
            .await
            .unwrap();
        assert_eq!(
            store.integration_row("aioseo", PostId(1)).await.unwrap(),
            Some(json!({"v": 2}))
        );
    }

    #[tokio::test]
    async fn media_ids_are_sequential() {
        let store = MemoryMetadataStore::new();
        let image = ImageData {
            bytes: vec![1],
            mime: "image/png".into(),
            file_name: "a.png".into(),
        };
        assert_eq!(store.import(image.clone(), None).await.unwrap(), MediaId(1));
        assert_eq!(
            store.import(image, Some(PostId(3))).await.unwrap(),
            MediaId(2)
        );
        assert_eq!(store.media()[1].1, Some(PostId(3)));
    }
}
