// SPDX-FileCopyrightText: 2026 Pageforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post metadata rows: upsert last-write-wins by (post_id, meta_key).
//!
//! Values are stored as serialized JSON so nested maps and encoded layout
//! blobs round-trip without a schema change per integration.

use pageforge_core::{MetaMap, PageforgeError, PostId};
use rusqlite::params;

use crate::database::{map_tr_err, Database};

fn encode_value(value: &serde_json::Value) -> Result<String, PageforgeError> {
    serde_json::to_string(value).map_err(|e| PageforgeError::Storage {
        source: Box::new(e),
    })
}

fn decode_value(raw: &str) -> Result<serde_json::Value, PageforgeError> {
    serde_json::from_str(raw).map_err(|e| PageforgeError::Storage {
        source: Box::new(e),
    })
}

/// Upsert one metadata value. Last write wins.
pub async fn set_post_meta(
    db: &Database,
    post: PostId,
    key: &str,
    value: serde_json::Value,
) -> Result<(), PageforgeError> {
    let key = key.to_string();
    let raw = encode_value(&value)?;
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO post_meta (post_id, meta_key, meta_value) VALUES (?1, ?2, ?3)
                 ON CONFLICT (post_id, meta_key) DO UPDATE SET meta_value = excluded.meta_value",
                params![post.0, key, raw],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// Get one metadata value.
pub async fn get_post_meta(
    db: &Database,
    post: PostId,
    key: &str,
) -> Result<Option<serde_json::Value>, PageforgeError> {
    let key = key.to_string();
    let raw: Option<String> = db
        .connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT meta_value FROM post_meta WHERE post_id = ?1 AND meta_key = ?2",
            )?;
            let result = stmt.query_row(params![post.0, key], |row| row.get(0));
            match result {
                Ok(raw) => Ok(Some(raw)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(map_tr_err)?;
    raw.map(|r| decode_value(&r)).transpose()
}

/// Delete one metadata value. Deleting an absent key is a no-op.
pub async fn delete_post_meta(
    db: &Database,
    post: PostId,
    key: &str,
) -> Result<(), PageforgeError> {
    let key = key.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "DELETE FROM post_meta WHERE post_id = ?1 AND meta_key = ?2",
                params![post.0, key],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// All metadata for a post, ordered by key.
pub async fn post_meta(db: &Database, post: PostId) -> Result<MetaMap, PageforgeError> {
    let rows: Vec<(String, String)> = db
        .connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT meta_key, meta_value FROM post_meta WHERE post_id = ?1 ORDER BY meta_key",
            )?;
            let rows = stmt
                .query_map(params![post.0], |row| Ok((row.get(0)?, row.get(1)?)))?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        })
        .await
        .map_err(map_tr_err)?;

    let mut map = MetaMap::new();
    for (key, raw) in rows {
        map.insert(key, decode_value(&raw)?);
    }
    Ok(map)
}
