// SPDX-FileCopyrightText: 2026 Pageforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Imported media rows.

use pageforge_core::{ImageData, MediaId, PageforgeError, PostId};
use rusqlite::params;

use crate::database::{map_tr_err, now_utc, Database};

/// Insert an imported image, optionally attached to a post.
pub async fn insert_media(
    db: &Database,
    image: ImageData,
    attach_to: Option<PostId>,
) -> Result<MediaId, PageforgeError> {
    let now = now_utc();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO media (post_id, file_name, mime, bytes, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    attach_to.map(|p| p.0),
                    image.file_name,
                    image.mime,
                    image.bytes,
                    now
                ],
            )?;
            Ok(MediaId(conn.last_insert_rowid()))
        })
        .await
        .map_err(map_tr_err)
}

/// Get an imported image by id.
pub async fn get_media(
    db: &Database,
    id: MediaId,
) -> Result<Option<(ImageData, Option<PostId>)>, PageforgeError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT file_name, mime, bytes, post_id FROM media WHERE id = ?1",
            )?;
            let result = stmt.query_row(params![id.0], |row| {
                let image = ImageData {
                    file_name: row.get(0)?,
                    mime: row.get(1)?,
                    bytes: row.get(2)?,
                };
                let post: Option<i64> = row.get(3)?;
                Ok((image, post.map(PostId)))
            });
            match result {
                Ok(found) => Ok(Some(found)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(map_tr_err)
}
