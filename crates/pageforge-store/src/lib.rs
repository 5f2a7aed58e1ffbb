// SPDX-FileCopyrightText: 2026 Pageforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence for Pageforge generated content.
//!
//! Provides WAL-mode SQLite storage with embedded migrations, a
//! single-writer concurrency model via `tokio-rusqlite`, and the
//! [`MetadataStore`]/[`MediaStore`] implementations the generation pipeline
//! writes through. Writes are last-write-wins; the surrounding pipeline is
//! assumed to serialize per-group generation.
//!
//! [`MetadataStore`]: pageforge_core::MetadataStore
//! [`MediaStore`]: pageforge_core::MediaStore

pub mod adapter;
pub mod database;
pub mod migrations;
pub mod queries;

pub use adapter::SqliteStore;
pub use database::Database;
