// SPDX-FileCopyrightText: 2026 Pageforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query modules for CRUD operations on stored entities.

pub mod media;
pub mod meta;
pub mod options;
pub mod posts;
pub mod rows;
