// SPDX-FileCopyrightText: 2026 Pageforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `pageforge status` command implementation.
//!
//! Summarizes the loaded configuration and the resolved status of every
//! built-in integration. Dependency detection is supplied by the host at
//! generation time, so from the CLI only configuration-gated integrations
//! (providers, spinners, research sources) can resolve to Active.

use std::io::IsTerminal;

use pageforge_config::model::PageforgeConfig;
use pageforge_core::PageforgeError;
use pageforge_registry::{builtin_catalog, Environment, IntegrationRegistry, IntegrationStatus};
use serde::Serialize;

/// Structured status output for `--json` mode.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub store_path: String,
    pub store_exists: bool,
    pub integrations_total: usize,
    pub active: usize,
    pub not_configured: usize,
    pub inactive: usize,
    pub configured_providers: Vec<String>,
}

fn collect_status(config: &PageforgeConfig) -> Result<StatusResponse, PageforgeError> {
    let mut registry = IntegrationRegistry::new();
    for manifest in builtin_catalog()? {
        registry.register(manifest);
    }

    let env = Environment::new();
    let configured = config.configured_keys();

    let mut active = 0;
    let mut not_configured = 0;
    let mut inactive = 0;
    for entry in registry.list_all() {
        match registry.status(&entry.manifest.name, &env, &configured)? {
            IntegrationStatus::Active => active += 1,
            IntegrationStatus::NotConfigured => not_configured += 1,
            IntegrationStatus::Inactive => inactive += 1,
        }
    }

    let mut configured_providers: Vec<String> = configured
        .iter()
        .filter_map(|key| key.strip_prefix("providers."))
        .filter_map(|rest| rest.strip_suffix(".api_key"))
        .map(ToString::to_string)
        .collect();
    configured_providers.sort();

    Ok(StatusResponse {
        store_path: config.storage.database_path.clone(),
        store_exists: std::path::Path::new(&config.storage.database_path).exists(),
        integrations_total: registry.len(),
        active,
        not_configured,
        inactive,
        configured_providers,
    })
}

/// Run the `pageforge status` command.
pub async fn run_status(
    config: &PageforgeConfig,
    json: bool,
    plain: bool,
) -> Result<(), PageforgeError> {
    let status = collect_status(config)?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&status).unwrap_or_else(|_| "{}".to_string())
        );
        return Ok(());
    }

    let use_color = !plain && std::io::stdout().is_terminal();

    println!();
    println!("  pageforge status");
    println!("  {}", "-".repeat(42));
    if status.store_exists {
        if use_color {
            use colored::Colorize;
            println!("    Store:        {} {}", "✓".green(), status.store_path);
        } else {
            println!("    Store:        [OK] {}", status.store_path);
        }
    } else {
        println!(
            "    Store:        {} (created on first generation)",
            status.store_path
        );
    }
    println!(
        "    Integrations: {} total ({} active, {} not configured, {} inactive)",
        status.integrations_total, status.active, status.not_configured, status.inactive
    );
    if status.configured_providers.is_empty() {
        println!("    Providers:    none configured");
    } else {
        println!("    Providers:    {}", status.configured_providers.join(", "));
    }
    println!();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_no_active_providers() {
        let status = collect_status(&PageforgeConfig::default()).unwrap();
        assert!(status.configured_providers.is_empty());
        // Only the sqlite store and the dependency-free image-url importer
        // resolve to Active without any detection or credentials.
        assert_eq!(status.active, 2);
        assert!(status.integrations_total > 30);
    }

    #[test]
    fn configured_provider_shows_up() {
        let mut config = PageforgeConfig::default();
        config.providers.gemini.api_key = "key-123".to_string();

        let status = collect_status(&config).unwrap();
        assert_eq!(status.configured_providers, vec!["gemini".to_string()]);
        assert_eq!(status.active, 3);
    }

    #[test]
    fn status_response_serializes() {
        let status = collect_status(&PageforgeConfig::default()).unwrap();
        let json = serde_json::to_string(&status).unwrap();
        assert!(json.contains("\"integrations_total\""));
        assert!(json.contains("\"store_path\""));
    }
}
