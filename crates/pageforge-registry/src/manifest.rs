// SPDX-FileCopyrightText: 2026 Pageforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration manifest parsing from `integration.toml` content.
//!
//! A manifest describes one integration: what external dependency it adapts,
//! which metadata key namespace it owns, and which overwrite section governs
//! its fields on regeneration.

use pageforge_core::{IntegrationKind, KeyPattern, PageforgeError};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Parsed manifest describing one integration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegrationManifest {
    /// Unique name of the integration (e.g. "yoast", "openai").
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// Kind of integration this manifest describes.
    pub kind: IntegrationKind,
    /// Dependency slugs; the integration is active when at least one is.
    /// Empty when activation depends only on configuration (API providers).
    pub depends_on: Vec<String>,
    /// Theme name this integration requires as the active theme (or parent).
    pub theme: Option<String>,
    /// Minimum dependency version, checked against the detected version.
    pub min_version: Option<semver::Version>,
    /// Metadata key namespace this integration owns.
    pub meta_key_patterns: Vec<KeyPattern>,
    /// Overwrite-section key shown in per-group regeneration choices.
    pub overwrite_section: Option<String>,
    /// Config keys that must be set for the integration to be usable
    /// (e.g. `providers.openai.api_key`).
    pub config_keys: Vec<String>,
    /// Capabilities the integration provides (e.g. ["chat", "images"]).
    pub capabilities: Vec<String>,
}

/// Intermediate TOML deserialization struct for `integration.toml`.
#[derive(Debug, Deserialize)]
struct ManifestFile {
    integration: ManifestSection,
}

/// The `[integration]` section of an `integration.toml` file.
#[derive(Debug, Deserialize)]
struct ManifestSection {
    name: String,
    description: String,
    kind: String,
    #[serde(default)]
    depends_on: Vec<String>,
    theme: Option<String>,
    min_version: Option<String>,
    #[serde(default)]
    meta_key_patterns: Vec<String>,
    overwrite_section: Option<String>,
    #[serde(default)]
    config_keys: Vec<String>,
    #[serde(default)]
    capabilities: Vec<String>,
}

/// Parse an integration manifest from TOML content.
///
/// Validates that the kind is a known `IntegrationKind`, the name is
/// non-empty, and every key pattern compiles.
pub fn parse_integration_manifest(
    toml_content: &str,
) -> Result<IntegrationManifest, PageforgeError> {
    let file: ManifestFile = toml::from_str(toml_content)
        .map_err(|e| PageforgeError::Config(format!("invalid integration manifest: {e}")))?;

    let section = file.integration;

    if section.name.is_empty() {
        return Err(PageforgeError::Config(
            "integration manifest: name must not be empty".to_string(),
        ));
    }

    let kind = IntegrationKind::from_str(&section.kind).map_err(|_| {
        PageforgeError::Config(format!(
            "integration manifest: invalid kind '{}'. Expected one of: Provider, Spinner, SeoPlugin, PageBuilder, Theme, Fields, Media, Research, Storage",
            section.kind
        ))
    })?;

    let min_version = section
        .min_version
        .map(|v| {
            semver::Version::parse(&v).map_err(|e| {
                PageforgeError::Config(format!(
                    "integration manifest: invalid min_version '{v}': {e}"
                ))
            })
        })
        .transpose()?;

    let meta_key_patterns = section
        .meta_key_patterns
        .iter()
        .map(|p| KeyPattern::parse(p))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(IntegrationManifest {
        name: section.name,
        description: section.description,
        kind,
        depends_on: section.depends_on,
        theme: section.theme,
        min_version,
        meta_key_patterns,
        overwrite_section: section.overwrite_section,
        config_keys: section.config_keys,
        capabilities: section.capabilities,
    })
}
