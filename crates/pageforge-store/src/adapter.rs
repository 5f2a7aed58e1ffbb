// SPDX-FileCopyrightText: 2026 Pageforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the MetadataStore and MediaStore traits.

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use pageforge_config::model::StorageConfig;
use pageforge_core::{
    GroupId, HealthStatus, ImageData, Integration, IntegrationKind, MediaId, MediaStore, MetaMap,
    MetadataStore, PageforgeError, PostId,
};

use crate::database::Database;
use crate::queries;

/// SQLite-backed metadata and media store.
///
/// Wraps a [`Database`] handle and delegates all query operations to the
/// typed query modules. The database is lazily initialized on the first
/// call to [`SqliteStore::initialize`].
pub struct SqliteStore {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteStore {
    /// Create a new SqliteStore with the given configuration.
    ///
    /// The database connection is not opened until [`initialize`] is called.
    ///
    /// [`initialize`]: SqliteStore::initialize
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    /// Open the database at the configured path and run migrations.
    pub async fn initialize(&self) -> Result<(), PageforgeError> {
        let db = Database::open(&self.config.database_path).await?;
        self.db.set(db).map_err(|_| PageforgeError::Storage {
            source: "store already initialized".into(),
        })?;
        debug!(path = %self.config.database_path, "SQLite store initialized");
        Ok(())
    }

    /// Checkpoint the WAL before shutdown.
    pub async fn close(&self) -> Result<(), PageforgeError> {
        self.db()?.checkpoint().await?;
        debug!("WAL checkpoint complete");
        Ok(())
    }

    fn db(&self) -> Result<&Database, PageforgeError> {
        self.db.get().ok_or_else(|| PageforgeError::Storage {
            source: "store not initialized -- call initialize() first".into(),
        })
    }

    // --- Page rows (the generation engine's side of the store) ---

    pub async fn insert_post(
        &self,
        group: GroupId,
        title: &str,
        content: &str,
    ) -> Result<PostId, PageforgeError> {
        queries::posts::insert_post(self.db()?, group, title, content).await
    }

    pub async fn get_post(
        &self,
        id: PostId,
    ) -> Result<Option<queries::posts::StoredPost>, PageforgeError> {
        queries::posts::get_post(self.db()?, id).await
    }

    pub async fn update_post(
        &self,
        id: PostId,
        title: &str,
        content: &str,
    ) -> Result<(), PageforgeError> {
        queries::posts::update_post(self.db()?, id, title, content).await
    }

    pub async fn list_posts_for_group(
        &self,
        group: GroupId,
    ) -> Result<Vec<PostId>, PageforgeError> {
        queries::posts::list_posts_for_group(self.db()?, group).await
    }

    pub async fn get_media(
        &self,
        id: MediaId,
    ) -> Result<Option<(ImageData, Option<PostId>)>, PageforgeError> {
        queries::media::get_media(self.db()?, id).await
    }
}

#[async_trait]
impl Integration for SqliteStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn kind(&self) -> IntegrationKind {
        IntegrationKind::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, PageforgeError> {
        let db = self.db()?;
        db.connection()
            .call(|conn| {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(crate::database::map_tr_err)?;
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl MetadataStore for SqliteStore {
    async fn get_post_meta(
        &self,
        post: PostId,
        key: &str,
    ) -> Result<Option<serde_json::Value>, PageforgeError> {
        queries::meta::get_post_meta(self.db()?, post, key).await
    }

    async fn set_post_meta(
        &self,
        post: PostId,
        key: &str,
        value: serde_json::Value,
    ) -> Result<(), PageforgeError> {
        queries::meta::set_post_meta(self.db()?, post, key, value).await
    }

    async fn delete_post_meta(&self, post: PostId, key: &str) -> Result<(), PageforgeError> {
        queries::meta::delete_post_meta(self.db()?, post, key).await
    }

    async fn post_meta(&self, post: PostId) -> Result<MetaMap, PageforgeError> {
        queries::meta::post_meta(self.db()?, post).await
    }

    async fn get_option(&self, name: &str) -> Result<Option<serde_json::Value>, PageforgeError> {
        queries::options::get_option(self.db()?, name).await
    }

    async fn set_option(
        &self,
        name: &str,
        value: serde_json::Value,
    ) -> Result<(), PageforgeError> {
        queries::options::set_option(self.db()?, name, value).await
    }

    async fn upsert_integration_row(
        &self,
        integration: &str,
        post: PostId,
        data: serde_json::Value,
    ) -> Result<(), PageforgeError> {
        queries::rows::upsert_integration_row(self.db()?, integration, post, data).await
    }

    async fn integration_row(
        &self,
        integration: &str,
        post: PostId,
    ) -> Result<Option<serde_json::Value>, PageforgeError> {
        queries::rows::integration_row(self.db()?, integration, post).await
    }
}

#[async_trait]
impl MediaStore for SqliteStore {
    async fn import(
        &self,
        image: ImageData,
        attach_to: Option<PostId>,
    ) -> Result<MediaId, PageforgeError> {
        queries::media::insert_media(self.db()?, image, attach_to).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    fn make_config(path: &std::path::Path) -> StorageConfig {
        StorageConfig {
            database_path: path.to_str().unwrap().to_string(),
        }
    }

    async fn open_store(dir: &tempfile::TempDir, name: &str) -> SqliteStore {
        let store = SqliteStore::new(make_config(&dir.path().join(name)));
        store.initialize().await.unwrap();
        store
    }

    #[tokio::test]
    async fn store_identifies_as_sqlite_storage() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir, "identity.db").await;
        assert_eq!(store.name(), "sqlite");
        assert_eq!(store.kind(), IntegrationKind::Storage);
        assert_eq!(store.health_check().await.unwrap(), HealthStatus::Healthy);
    }

    #[tokio::test]
    async fn initialize_twice_returns_error() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir, "double.db").await;
        assert!(store.initialize().await.is_err());
    }

    #[tokio::test]
    async fn operations_fail_before_initialize() {
        let dir = tempdir().unwrap();
        let store = SqliteStore::new(make_config(&dir.path().join("uninit.db")));
        assert!(store.get_post_meta(PostId(1), "k").await.is_err());
        assert!(store.health_check().await.is_err());
    }

    #[tokio::test]
    async fn post_meta_upsert_is_last_write_wins() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir, "meta.db").await;
        let post = store.insert_post(GroupId(1), "Title", "Body").await.unwrap();

        store
            .set_post_meta(post, "_yoast_wpseo_title", json!("First"))
            .await
            .unwrap();
        store
            .set_post_meta(post, "_yoast_wpseo_title", json!("Second"))
            .await
            .unwrap();

        let value = store
            .get_post_meta(post, "_yoast_wpseo_title")
            .await
            .unwrap();
        assert_eq!(value, Some(json!("Second")));
    }

    #[tokio::test]
    async fn post_meta_map_is_ordered_by_key() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir, "ordered.db").await;
        let post = store.insert_post(GroupId(1), "", "").await.unwrap();

        store.set_post_meta(post, "zeta", json!(1)).await.unwrap();
        store.set_post_meta(post, "alpha", json!(2)).await.unwrap();
        store
            .set_post_meta(post, "nested", json!({"a": [1, 2]}))
            .await
            .unwrap();

        let map = store.post_meta(post).await.unwrap();
        let keys: Vec<&String> = map.keys().collect();
        assert_eq!(keys, ["alpha", "nested", "zeta"]);
        assert_eq!(map["nested"], json!({"a": [1, 2]}));
    }

    #[tokio::test]
    async fn delete_post_meta_is_idempotent() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir, "delete.db").await;
        let post = store.insert_post(GroupId(1), "", "").await.unwrap();

        store.set_post_meta(post, "gone", json!(true)).await.unwrap();
        store.delete_post_meta(post, "gone").await.unwrap();
        store.delete_post_meta(post, "gone").await.unwrap();
        assert_eq!(store.get_post_meta(post, "gone").await.unwrap(), None);
    }

    #[tokio::test]
    async fn options_roundtrip() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir, "options.db").await;

        assert_eq!(store.get_option("rank_math_seo").await.unwrap(), None);
        store
            .set_option("rank_math_seo", json!({"redirect": "/new"}))
            .await
            .unwrap();
        store
            .set_option("rank_math_seo", json!({"redirect": "/newer"}))
            .await
            .unwrap();
        assert_eq!(
            store.get_option("rank_math_seo").await.unwrap(),
            Some(json!({"redirect": "/newer"}))
        );
    }

    #[tokio::test]
    async fn integration_rows_are_namespaced_per_integration() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir, "rows.db").await;
        let post = store.insert_post(GroupId(1), "", "").await.unwrap();

        store
            .upsert_integration_row("aioseo", post, json!({"title": "SEO Title"}))
            .await
            .unwrap();
        store
            .upsert_integration_row("rank-math", post, json!({"score": 81}))
            .await
            .unwrap();

        assert_eq!(
            store.integration_row("aioseo", post).await.unwrap(),
            Some(json!({"title": "SEO Title"}))
        );
        assert_eq!(
            store.integration_row("rank-math", post).await.unwrap(),
            Some(json!({"score": 81}))
        );
        assert_eq!(store.integration_row("aioseo", PostId(99)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn media_import_attaches_to_post() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir, "media.db").await;
        let post = store.insert_post(GroupId(1), "", "").await.unwrap();

        let image = ImageData {
            bytes: vec![0x89, b'P', b'N', b'G'],
            mime: "image/png".to_string(),
            file_name: "hero.png".to_string(),
        };
        let id = store.import(image.clone(), Some(post)).await.unwrap();

        let (stored, attached) = store.get_media(id).await.unwrap().unwrap();
        assert_eq!(stored, image);
        assert_eq!(attached, Some(post));
    }

    #[tokio::test]
    async fn posts_update_and_group_listing() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir, "posts.db").await;

        let a = store.insert_post(GroupId(3), "A", "body a").await.unwrap();
        let b = store.insert_post(GroupId(3), "B", "body b").await.unwrap();
        store.insert_post(GroupId(4), "C", "body c").await.unwrap();

        store.update_post(a, "A2", "regenerated").await.unwrap();
        let post = store.get_post(a).await.unwrap().unwrap();
        assert_eq!(post.title, "A2");
        assert_eq!(post.content, "regenerated");

        assert_eq!(store.list_posts_for_group(GroupId(3)).await.unwrap(), [a, b]);
        store.close().await.unwrap();
    }
}
