// SPDX-FileCopyrightText: 2026 Pageforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Global options: a single name -> value table, last write wins.

use pageforge_core::PageforgeError;
use rusqlite::params;

use crate::database::{map_tr_err, Database};

/// Upsert one option value.
pub async fn set_option(
    db: &Database,
    name: &str,
    value: serde_json::Value,
) -> Result<(), PageforgeError> {
    let name = name.to_string();
    let raw = serde_json::to_string(&value).map_err(|e| PageforgeError::Storage {
        source: Box::new(e),
    })?;
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO options (name, value) VALUES (?1, ?2)
                 ON CONFLICT (name) DO UPDATE SET value = excluded.value",
                params![name, raw],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// Get one option value.
pub async fn get_option(
    db: &Database,
    name: &str,
) -> Result<Option<serde_json::Value>, PageforgeError> {
    let name = name.to_string();
    let raw: Option<String> = db
        .connection()
        .call(move |conn| {
            let mut stmt = conn.prepare("SELECT value FROM options WHERE name = ?1")?;
            let result = stmt.query_row(params![name], |row| row.get(0));
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
