// SPDX-FileCopyrightText: 2026 Pageforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Storage adapter traits: metadata persistence and media imports.

use async_trait::async_trait;

use crate::error::PageforgeError;
use crate::types::{ImageData, MediaId, MetaMap, PostId};

/// Key-value metadata persistence for posts and global options.
///
/// Writes are last-write-wins; there are no transactions across keys. The
/// `integration_row` pair covers integrations that keep their own table
/// instead of post metadata (AIOSEO, Rank Math).
#[async_trait]
pub trait MetadataStore: Send + Sync {
    async fn get_post_meta(
        &self,
        post: PostId,
        key: &str,
    ) -> Result<Option<serde_json::Value>, PageforgeError>;

    async fn set_post_meta(
        &self,
        post: PostId,
        key: &str,
        value: serde_json::Value,
    ) -> Result<(), PageforgeError>;

    async fn delete_post_meta(&self, post: PostId, key: &str) -> Result<(), PageforgeError>;

    /// All metadata for a post, ordered by key.
    async fn post_meta(&self, post: PostId) -> Result<MetaMap, PageforgeError>;

    async fn get_option(&self, name: &str) -> Result<Option<serde_json::Value>, PageforgeError>;

    async fn set_option(
        &self,
        name: &str,
        value: serde_json::Value,
    ) -> Result<(), PageforgeError>;

    /// Upsert an integration-owned row keyed by (integration, post).
    async fn upsert_integration_row(
        &self,
        integration: &str,
        post: PostId,
        data: serde_json::Value,
    ) -> Result<(), PageforgeError>;

    async fn integration_row(
        &self,
        integration: &str,
        post: PostId,
    ) -> Result<Option<serde_json::Value>, PageforgeError>;
}

/// Media library imports.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Import image bytes, optionally attached to a post, returning the
    /// new media id. One-shot: no retries, no batching.
    async fn import(
        &self,
        image: ImageData,
        attach_to: Option<PostId>,
    ) -> Result<MediaId, PageforgeError>;
}
