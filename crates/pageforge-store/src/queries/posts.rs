// SPDX-FileCopyrightText: 2026 Pageforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Generated-page rows.

use pageforge_core::{GroupId, PageforgeError, PostId};
use rusqlite::params;

use crate::database::{map_tr_err, now_utc, Database};

/// A stored generated page.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredPost {
    pub id: PostId,
    pub group: GroupId,
    pub title: String,
    pub content: String,
    pub status: String,
}

/// Insert a new generated page and return its id.
pub async fn insert_post(
    db: &Database,
    group: GroupId,
    title: &str,
    content: &str,
) -> Result<PostId, PageforgeError> {
    let title = title.to_string();
    let content = content.to_string();
    let now = now_utc();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO posts (group_id, title, content, status, created_at, updated_at)
                 VALUES (?1, ?2, ?3, 'draft', ?4, ?4)",
                params![group.0, title, content, now],
            )?;
            Ok(PostId(conn.last_insert_rowid()))
        })
        .await
        .map_err(map_tr_err)
}

/// Get a page by id.
pub async fn get_post(db: &Database, id: PostId) -> Result<Option<StoredPost>, PageforgeError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, group_id, title, content, status FROM posts WHERE id = ?1",
            )?;
            let result = stmt.query_row(params![id.0], |row| {
                Ok(StoredPost {
                    id: PostId(row.get(0)?),
                    group: GroupId(row.get(1)?),
                    title: row.get(2)?,
                    content: row.get(3)?,
                    status: row.get(4)?,
                })
            });
            match result {
                Ok(post) => Ok(Some(post)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(map_tr_err)
}

/// Overwrite a page's title and content (regeneration pass).
pub async fn update_post(
    db: &Database,
    id: PostId,
    title: &str,
    content: &str,
) -> Result<(), PageforgeError> {
    let title = title.to_string();
    let content = content.to_string();
    let now = now_utc();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "UPDATE posts SET title = ?2, content = ?3, updated_at = ?4 WHERE id = ?1",
                params![id.0, title, content, now],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// All page ids generated from a group, in insertion order.
pub async fn list_posts_for_group(
    db: &Database,
    group: GroupId,
) -> Result<Vec<PostId>, PageforgeError> {
    db.connection()
        .call(move |conn| {
            let mut stmt =
                conn.prepare("SELECT id FROM posts WHERE group_id = ?1 ORDER BY id")?;
            let rows = stmt
                .query_map(params![group.0], |row| Ok(PostId(row.get(0)?)))?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        })
        .await
        .map_err(map_tr_err)
}
