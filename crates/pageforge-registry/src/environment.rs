// SPDX-FileCopyrightText: 2026 Pageforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Detected third-party environment: which dependencies and theme are present.
//!
//! Detection is supplied by the host at startup; the registry only reads it.
//! Anything not detected is treated as absent (fail closed).

use std::collections::HashMap;

/// One detected dependency (plugin-equivalent) in the host environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedDependency {
    /// Whether the dependency is installed AND active.
    pub active: bool,
    /// Detected version, when the host could read one.
    pub version: Option<semver::Version>,
}

/// The active theme, with optional parent for child themes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeInfo {
    pub name: String,
    pub version: Option<semver::Version>,
    /// Parent theme name when the active theme is a child theme.
    pub parent: Option<String>,
}

/// Snapshot of the host environment the registry resolves activation against.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    dependencies: HashMap<String, DetectedDependency>,
    theme: Option<ThemeInfo>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a detected dependency.
    pub fn detect(
        &mut self,
        slug: impl Into<String>,
        active: bool,
        version: Option<semver::Version>,
    ) -> &mut Self {
        self.dependencies
            .insert(slug.into(), DetectedDependency { active, version });
        self
    }

    /// Record the active theme.
    pub fn set_theme(&mut self, theme: ThemeInfo) -> &mut Self {
        self.theme = Some(theme);
        self
    }

    pub fn dependency(&self, slug: &str) -> Option<&DetectedDependency> {
        self.dependencies.get(slug)
    }

    /// True iff the dependency is detected, active, and (when both a
    /// minimum and a detected version exist) new enough. A declared minimum
    /// with no detected version fails closed.
    pub fn dependency_active(&self, slug: &str, min_version: Option<&semver::Version>) -> bool {
        let Some(dep) = self.dependencies.get(slug) else {
            return false;
        };
        if !dep.active {
            return false;
        }
        match (min_version, &dep.version) {
            (Some(min), Some(found)) => found >= min,
            (Some(_), None) => false,
            (None, _) => true,
        }
    }

    /// True iff the active theme (or its parent, for child themes) matches
    /// the given name and satisfies the minimum version.
    pub fn theme_active(&self, name: &str, min_version: Option<&semver::Version>) -> bool {
        let Some(theme) = &self.theme else {
            return false;
        };
        let name_matches = theme.name.eq_ignore_ascii_case(name)
            || theme
                .parent
                .as_deref()
                .is_some_and(|p| p.eq_ignore_ascii_case(name));
        if !name_matches {
            return false;
        }
        match (min_version, &theme.version) {
            (Some(min), Some(found)) => found >= min,
            (Some(_), None) => false,
            (None, _) => true,
        }
    }
}
