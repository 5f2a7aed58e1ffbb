// SPDX-FileCopyrightText: 2026 Pageforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `pageforge integrations list` command implementation.

use std::io::IsTerminal;

use pageforge_config::model::PageforgeConfig;
use pageforge_core::PageforgeError;
use pageforge_registry::{builtin_catalog, Environment, IntegrationRegistry, IntegrationStatus};

/// Print the catalog with a resolved status column.
pub fn run_list(config: &PageforgeConfig, plain: bool) -> Result<(), PageforgeError> {
    let mut registry = IntegrationRegistry::new();
    for manifest in builtin_catalog()? {
        registry.register(manifest);
    }

    let env = Environment::new();
    let configured = config.configured_keys();
    let use_color = !plain && std::io::stdout().is_terminal();

    println!();
    println!("  {:<18} {:<12} {:<16} description", "name", "kind", "status");
    println!("  {}", "-".repeat(78));

    for entry in registry.list_all() {
        let status = registry.status(&entry.manifest.name, &env, &configured)?;
        let status_text = if use_color {
            use colored::Colorize;
            match status {
                IntegrationStatus::Active => "active".green().to_string(),
                IntegrationStatus::NotConfigured => "not-configured".yellow().to_string(),
                IntegrationStatus::Inactive => "inactive".dimmed().to_string(),
            }
        } else {
            status.to_string()
        };

        println!(
            "  {:<18} {:<12} {:<16} {}",
            entry.manifest.name,
            entry.manifest.kind.to_string(),
            status_text,
            entry.manifest.description
        );
    }
    println!();

    Ok(())
}
