// SPDX-FileCopyrightText: 2026 Pageforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration-owned rows, keyed by (integration, post).
//!
//! A handful of integrations (AIOSEO, Rank Math) keep a dedicated record
//! per post instead of post metadata. The namespaced side table keeps that
//! storage explicit.

use pageforge_core::{PageforgeError, PostId};
use rusqlite::params;

use crate::database::{map_tr_err, now_utc, Database};

/// Upsert an integration's record for a post. Last write wins.
pub async fn upsert_integration_row(
    db: &Database,
    integration: &str,
    post: PostId,
    data: serde_json::Value,
) -> Result<(), PageforgeError> {
    let integration = integration.to_string();
    let raw = serde_json::to_string(&data).map_err(|e| PageforgeError::Storage {
        source: Box::new(e),
    })?;
    let now = now_utc();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO integration_rows (integration, post_id, data, updated_at)
                 VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT (integration, post_id)
                 DO UPDATE SET data = excluded.data, updated_at = excluded.updated_at",
                params![integration, post.0, raw, now],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// Get an integration's record for a post.
pub async fn integration_row(
    db: &Database,
    integration: &str,
    post: PostId,
) -> Result<Option<serde_json::Value>, PageforgeError> {
    let integration = integration.to_string();
    let raw: Option<String> = db
        .connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT data FROM integration_rows WHERE integration = ?1 AND post_id = ?2",
            )?;
            let result = stmt.query_row(params![integration, post.0], |row| row.get(0));
            match result {
                Ok(raw) => Ok(Some(raw)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(map_tr_err)?;
    raw.map(|r| {
        serde_json::from_str(&r).map_err(|e| PageforgeError::Storage {
            source: Box::new(e),
        })
    })
    .transpose()
}
