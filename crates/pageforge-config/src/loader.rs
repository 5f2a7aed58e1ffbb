// SPDX-FileCopyrightText: 2026 Pageforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports the XDG hierarchy: `./pageforge.toml` > `~/.config/pageforge/pageforge.toml`
//! > `/etc/pageforge/pageforge.toml`, with environment variable overrides
//! via the `PAGEFORGE_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::PageforgeConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/pageforge/pageforge.toml` (system-wide)
/// 3. `~/.config/pageforge/pageforge.toml` (user XDG config)
/// 4. `./pageforge.toml` (local directory)
/// 5. `PAGEFORGE_*` environment variables
pub fn load_config() -> Result<PageforgeConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env vars).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<PageforgeConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PageforgeConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<PageforgeConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PageforgeConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading (exposed for diagnostic use).
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(PageforgeConfig::default()))
        .merge(Toml::file("/etc/pageforge/pageforge.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("pageforge/pageforge.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("pageforge.toml"))
        .merge(env_provider())
}

/// Subsection names that need their trailing underscore mapped to a dot.
const SUBSECTIONS: &[&str] = &[
    "openai",
    "anthropic",
    "gemini",
    "xai",
    "mistral",
    "deepseek",
    "qwen",
    "perplexity",
    "openrouter",
    "spinrewriter",
    "wordai",
    "spinnerchief",
    "articleforge",
    "aiwriter",
    "contentbot",
    "youtube",
    "openweathermap",
];

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names
/// themselves contain underscores: `PAGEFORGE_PROVIDERS_OPENAI_API_KEY`
/// must map to `providers.openai.api_key`, not `providers.openai.api.key`.
fn env_provider() -> Env {
    Env::prefixed("PAGEFORGE_").map(|key| {
        // `key` is the lowercased env var name with the prefix stripped,
        // e.g. PAGEFORGE_PROVIDERS_OPENAI_API_KEY -> "providers_openai_api_key".
        let mut mapped = key
            .as_str()
            .replacen("generation_", "generation.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("providers_", "providers.", 1)
            .replacen("spinners_", "spinners.", 1)
            .replacen("research_", "research.", 1);
        for sub in SUBSECTIONS {
            let needle = format!(".{sub}_");
            if mapped.contains(&needle) {
                mapped = mapped.replacen(&needle, &format!(".{sub}."), 1);
                break;
            }
        }
        mapped.into()
    })
}
