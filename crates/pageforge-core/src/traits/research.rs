// SPDX-FileCopyrightText: 2026 Pageforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Research source trait for dynamic-element lookups (videos, weather, ...).

use async_trait::async_trait;

use crate::error::PageforgeError;
use crate::types::ResearchResult;

/// A lookup source whose results are substituted into generated content.
#[async_trait]
pub trait ResearchSource: Send + Sync {
    /// Registry name of this source (e.g. "youtube").
    fn name(&self) -> &str;

    /// One-shot lookup. A missing API key is a configuration error; an
    /// empty result set is a successful lookup.
    async fn lookup(&self, query: &str) -> Result<Vec<ResearchResult>, PageforgeError>;
}
