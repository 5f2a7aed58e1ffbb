// SPDX-FileCopyrightText: 2026 Pageforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Capability registry resolving integration activation.
//!
//! The registry stores `IntegrationEntry` records keyed by integration name
//! and answers the one question the generation pipeline asks per page:
//! is this integration active right now, against this environment and
//! configuration?

use std::collections::{HashMap, HashSet};

use pageforge_core::{IntegrationKind, PageforgeError};
use tracing::debug;

use crate::environment::Environment;
use crate::manifest::IntegrationManifest;

/// Resolved status of an integration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegrationStatus {
    /// Dependency present (and new enough), config satisfied.
    Active,
    /// Dependency absent, too old, or the entry was disabled by the user.
    Inactive,
    /// Dependency satisfied but required configuration keys are missing.
    NotConfigured,
}

impl std::fmt::Display for IntegrationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IntegrationStatus::Active => write!(f, "active"),
            IntegrationStatus::Inactive => write!(f, "inactive"),
            IntegrationStatus::NotConfigured => write!(f, "not-configured"),
        }
    }
}

/// A single entry in the registry.
#[derive(Debug, Clone)]
pub struct IntegrationEntry {
    pub manifest: IntegrationManifest,
    /// User toggle; a disabled entry is always Inactive.
    pub enabled: bool,
}

/// Registry of known integrations.
pub struct IntegrationRegistry {
    entries: HashMap<String, IntegrationEntry>,
}

impl IntegrationRegistry {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Register an integration, enabled by default.
    pub fn register(&mut self, manifest: IntegrationManifest) {
        let name = manifest.name.clone();
        self.entries.insert(
            name,
            IntegrationEntry {
                manifest,
                enabled: true,
            },
        );
    }

    pub fn get(&self, name: &str) -> Option<&IntegrationEntry> {
        self.entries.get(name)
    }

    /// Resolve the status of one integration.
    ///
    /// Order of checks: disabled entry -> Inactive; environment dependency
    /// or theme unsatisfied -> Inactive (fail closed); missing config key
    /// -> NotConfigured; otherwise Active.
    pub fn status(
        &self,
        name: &str,
        env: &Environment,
        configured_keys: &HashSet<String>,
    ) -> Result<IntegrationStatus, PageforgeError> {
        let entry = self
            .entries
            .get(name)
            .ok_or_else(|| PageforgeError::IntegrationNotFound {
                kind: "unknown".to_string(),
                name: name.to_string(),
            })?;

        if !entry.enabled {
            return Ok(IntegrationStatus::Inactive);
        }

        if !dependency_satisfied(&entry.manifest, env) {
            debug!(integration = name, "dependency not satisfied");
            return Ok(IntegrationStatus::Inactive);
        }

        let missing_config = entry
            .manifest
            .config_keys
            .iter()
            .any(|key| !configured_keys.contains(key));
        if missing_config {
            return Ok(IntegrationStatus::NotConfigured);
        }

        Ok(IntegrationStatus::Active)
    }

    /// Convenience: true iff `status(...) == Active`. Unknown names are
    /// simply not active.
    pub fn is_active(
        &self,
        name: &str,
        env: &Environment,
        configured_keys: &HashSet<String>,
    ) -> bool {
        matches!(
            self.status(name, env, configured_keys),
            Ok(IntegrationStatus::Active)
        )
    }

    /// All active entries of the given kind, sorted by name.
    pub fn get_active(
        &self,
        kind: IntegrationKind,
        env: &Environment,
        configured_keys: &HashSet<String>,
    ) -> Vec<&IntegrationEntry> {
        let mut entries: Vec<&IntegrationEntry> = self
            .entries
            .values()
            .filter(|e| e.manifest.kind == kind)
            .filter(|e| self.is_active(&e.manifest.name, env, configured_keys))
            .collect();
        entries.sort_by(|a, b| a.manifest.name.cmp(&b.manifest.name));
        entries
    }

    /// All entries whose status is NOT Active, sorted by name. These are the
    /// integrations whose metadata namespaces must be stripped before
    /// generation.
    pub fn get_orphaned(
        &self,
        env: &Environment,
        configured_keys: &HashSet<String>,
    ) -> Vec<&IntegrationEntry> {
        let mut entries: Vec<&IntegrationEntry> = self
            .entries
            .values()
            .filter(|e| !self.is_active(&e.manifest.name, env, configured_keys))
            .collect();
        entries.sort_by(|a, b| a.manifest.name.cmp(&b.manifest.name));
        entries
    }

    /// List all entries, sorted by name.
    pub fn list_all(&self) -> Vec<&IntegrationEntry> {
        let mut entries: Vec<&IntegrationEntry> = self.entries.values().collect();
        entries.sort_by(|a, b| a.manifest.name.cmp(&b.manifest.name));
        entries
    }

    /// Toggle an entry's enabled flag.
    pub fn set_enabled(&mut self, name: &str, enabled: bool) -> Result<(), PageforgeError> {
        let entry = self
            .entries
            .get_mut(name)
            .ok_or_else(|| PageforgeError::IntegrationNotFound {
                kind: "unknown".to_string(),
                name: name.to_string(),
            })?;
        entry.enabled = enabled;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for IntegrationRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// True iff the manifest's environment requirements hold.
///
/// A manifest with dependencies is satisfied when at least one declared
/// dependency is active (and meets `min_version`). A manifest with a theme
/// requirement checks the active theme or its parent. A manifest with
/// neither (API providers) is satisfied by definition -- its gate is
/// configuration, not environment.
fn dependency_satisfied(manifest: &IntegrationManifest, env: &Environment) -> bool {
    let min = manifest.min_version.as_ref();

    if !manifest.depends_on.is_empty() {
        return manifest
            .depends_on
            .iter()
            .any(|slug| env.dependency_active(slug, min));
    }

    if let Some(theme) = &manifest.theme {
        return env.theme_active(theme, min);
    }

    true
}
