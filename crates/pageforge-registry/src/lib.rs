// SPDX-FileCopyrightText: 2026 Pageforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration registry for the Pageforge workspace.
//!
//! Answers "is this integration active?" by combining three inputs: the
//! integration's manifest (dependencies, minimum version, config keys),
//! a snapshot of the detected host environment, and the set of configured
//! keys. Absence of a dependency is never an error -- it resolves to
//! `Inactive`, and the metadata layer strips that integration's keys.

pub mod catalog;
pub mod environment;
pub mod manifest;
pub mod registry;

pub use catalog::builtin_catalog;
pub use environment::{DetectedDependency, Environment, ThemeInfo};
pub use manifest::{parse_integration_manifest, IntegrationManifest};
pub use registry::{IntegrationEntry, IntegrationRegistry, IntegrationStatus};
