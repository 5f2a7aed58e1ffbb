// SPDX-FileCopyrightText: 2026 Pageforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Base trait that all integration adapters implement.

use async_trait::async_trait;

use crate::error::PageforgeError;
use crate::types::{HealthStatus, IntegrationKind};

/// The base trait for all Pageforge integration adapters.
///
/// Provides identity and health-check capabilities. Activation (whether the
/// third-party dependency an integration adapts is present and new enough)
/// is a registry concern, not an adapter method -- see `pageforge-registry`.
#[async_trait]
pub trait Integration: Send + Sync + 'static {
    /// Returns the registry name of this integration (e.g. "openai", "yoast").
    fn name(&self) -> &str;

    /// Returns the semantic version of this adapter.
    fn version(&self) -> semver::Version;

    /// Returns the kind of integration (provider, SEO plugin, page builder, ...).
    fn kind(&self) -> IntegrationKind;

    /// Performs a health check and returns the adapter's current status.
    async fn health_check(&self) -> Result<HealthStatus, PageforgeError>;
}
