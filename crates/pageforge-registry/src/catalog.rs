// SPDX-FileCopyrightText: 2026 Pageforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Built-in integration catalog.
//!
//! Returns hardcoded `IntegrationManifest` entries for every integration
//! compiled into this workspace. No network calls are made. Each entry
//! declares the metadata key namespace the integration owns; namespaces
//! must not collide (see `namespaces_do_not_collide` below).

use pageforge_core::{IntegrationKind, KeyPattern, PageforgeError};

use crate::manifest::IntegrationManifest;

struct Entry {
    name: &'static str,
    description: &'static str,
    kind: IntegrationKind,
    depends_on: &'static [&'static str],
    theme: Option<&'static str>,
    min_version: Option<&'static str>,
    meta_key_patterns: &'static [&'static str],
    overwrite_section: Option<&'static str>,
    config_keys: &'static [&'static str],
    capabilities: &'static [&'static str],
}

impl Entry {
    fn build(&self) -> Result<IntegrationManifest, PageforgeError> {
        let min_version = self
            .min_version
            .map(|v| {
                semver::Version::parse(v).map_err(|e| {
                    PageforgeError::Config(format!("catalog entry {}: bad min_version: {e}", self.name))
                })
            })
            .transpose()?;
        let meta_key_patterns = self
            .meta_key_patterns
            .iter()
            .map(|p| KeyPattern::parse(p))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(IntegrationManifest {
            name: self.name.to_string(),
            description: self.description.to_string(),
            kind: self.kind,
            depends_on: self.depends_on.iter().map(ToString::to_string).collect(),
            theme: self.theme.map(ToString::to_string),
            min_version,
            meta_key_patterns,
            overwrite_section: self.overwrite_section.map(ToString::to_string),
            config_keys: self.config_keys.iter().map(ToString::to_string).collect(),
            capabilities: self.capabilities.iter().map(ToString::to_string).collect(),
        })
    }
}

const fn provider(
    name: &'static str,
    description: &'static str,
    config_keys: &'static [&'static str],
    capabilities: &'static [&'static str],
) -> Entry {
    Entry {
        name,
        description,
        kind: IntegrationKind::Provider,
        depends_on: &[],
        theme: None,
        min_version: None,
        meta_key_patterns: &[],
        overwrite_section: None,
        config_keys,
        capabilities,
    }
}

const fn spinner(
    name: &'static str,
    description: &'static str,
    config_keys: &'static [&'static str],
) -> Entry {
    Entry {
        name,
        description,
        kind: IntegrationKind::Spinner,
        depends_on: &[],
        theme: None,
        min_version: None,
        meta_key_patterns: &[],
        overwrite_section: None,
        config_keys,
        capabilities: &["spin"],
    }
}

const CATALOG: &[Entry] = &[
    // --- SEO plugins ---
    Entry {
        name: "yoast",
        description: "Yoast SEO title, description, and schema fields",
        kind: IntegrationKind::SeoPlugin,
        depends_on: &["wordpress-seo", "wordpress-seo-premium"],
        theme: None,
        min_version: None,
        meta_key_patterns: &["/^_yoast_wpseo_/"],
        overwrite_section: Some("yoast_seo"),
        config_keys: &[],
        capabilities: &["post_meta", "term_meta"],
    },
    Entry {
        name: "aioseo",
        description: "All in One SEO post fields (dedicated table)",
        kind: IntegrationKind::SeoPlugin,
        depends_on: &["all-in-one-seo-pack", "all-in-one-seo-pack-pro"],
        theme: None,
        min_version: Some("4.0.0"),
        meta_key_patterns: &["/^_aioseo_/"],
        overwrite_section: Some("aioseo"),
        config_keys: &[],
        capabilities: &["post_meta", "post_table"],
    },
    Entry {
        name: "rank-math",
        description: "Rank Math SEO fields",
        kind: IntegrationKind::SeoPlugin,
        depends_on: &["seo-by-rank-math"],
        theme: None,
        min_version: None,
        meta_key_patterns: &["/^rank_math_/"],
        overwrite_section: Some("rank_math"),
        config_keys: &[],
        capabilities: &["post_meta", "options"],
    },
    Entry {
        name: "seopress",
        description: "SEOPress title and social fields",
        kind: IntegrationKind::SeoPlugin,
        depends_on: &["wp-seopress", "wp-seopress-pro"],
        theme: None,
        min_version: None,
        meta_key_patterns: &["/^_seopress_/"],
        overwrite_section: Some("seopress"),
        config_keys: &[],
        capabilities: &["post_meta"],
    },
    Entry {
        name: "squirrly",
        description: "Squirrly SEO fields",
        kind: IntegrationKind::SeoPlugin,
        depends_on: &["squirrly-seo"],
        theme: None,
        min_version: None,
        meta_key_patterns: &["/^_sq_/"],
        overwrite_section: Some("squirrly_seo"),
        config_keys: &[],
        capabilities: &["post_meta"],
    },
    Entry {
        name: "platinum-seo",
        description: "Platinum SEO Pack fields",
        kind: IntegrationKind::SeoPlugin,
        depends_on: &["platinum-seo-pack"],
        theme: None,
        min_version: None,
        meta_key_patterns: &["/^_techblissonline_/"],
        overwrite_section: Some("platinum_seo"),
        config_keys: &[],
        capabilities: &["post_meta"],
    },
    // --- Page builders ---
    Entry {
        name: "elementor",
        description: "Elementor layout data and page settings",
        kind: IntegrationKind::PageBuilder,
        depends_on: &["elementor", "elementor-pro"],
        theme: None,
        min_version: None,
        meta_key_patterns: &["/^_elementor_/"],
        overwrite_section: Some("elementor"),
        config_keys: &[],
        capabilities: &["layout_json"],
    },
    Entry {
        name: "beaver-builder",
        description: "Beaver Builder layout data",
        kind: IntegrationKind::PageBuilder,
        depends_on: &["beaver-builder-lite-version", "bb-plugin"],
        theme: None,
        min_version: None,
        meta_key_patterns: &["/^_fl_builder_/"],
        overwrite_section: Some("beaver_builder"),
        config_keys: &[],
        capabilities: &["layout_serialized"],
    },
    Entry {
        name: "divi",
        description: "Divi builder shortcode layouts",
        kind: IntegrationKind::PageBuilder,
        depends_on: &["divi-builder"],
        theme: Some("Divi"),
        min_version: None,
        meta_key_patterns: &["/^_et_pb_/", "/^_et_builder_/"],
        overwrite_section: Some("divi"),
        config_keys: &[],
        capabilities: &["shortcodes"],
    },
    Entry {
        name: "bricks",
        description: "Bricks theme builder content",
        kind: IntegrationKind::PageBuilder,
        depends_on: &[],
        theme: Some("bricks"),
        min_version: Some("1.5.0"),
        meta_key_patterns: &[
            "_bricks_page_content_2",
            "_bricks_page_settings",
            "_bricks_editor_mode",
        ],
        overwrite_section: Some("bricks"),
        config_keys: &[],
        capabilities: &["layout_json"],
    },
    Entry {
        name: "oxygen",
        description: "Oxygen builder shortcodes and styles",
        kind: IntegrationKind::PageBuilder,
        depends_on: &["oxygen"],
        theme: None,
        min_version: None,
        meta_key_patterns: &["/^ct_/"],
        overwrite_section: Some("oxygen"),
        config_keys: &[],
        capabilities: &["layout_json"],
    },
    Entry {
        name: "breakdance",
        description: "Breakdance builder tree data",
        kind: IntegrationKind::PageBuilder,
        depends_on: &["breakdance"],
        theme: None,
        min_version: Some("1.0.0"),
        meta_key_patterns: &["breakdance_data", "_breakdance_data"],
        overwrite_section: Some("breakdance"),
        config_keys: &[],
        capabilities: &["layout_json"],
    },
    Entry {
        name: "brizy",
        description: "Brizy builder base64 page data",
        kind: IntegrationKind::PageBuilder,
        depends_on: &["brizy"],
        theme: None,
        min_version: None,
        meta_key_patterns: &["brizy"],
        overwrite_section: Some("brizy"),
        config_keys: &[],
        capabilities: &["layout_base64"],
    },
    Entry {
        name: "zion",
        description: "Zion Builder element tree",
        kind: IntegrationKind::PageBuilder,
        depends_on: &["zionbuilder", "zionbuilder-pro"],
        theme: None,
        min_version: None,
        meta_key_patterns: &["/^_zionbuilder_/"],
        overwrite_section: Some("zion_builder"),
        config_keys: &[],
        capabilities: &["layout_json"],
    },
    Entry {
        name: "wpbakery",
        description: "WPBakery Page Builder shortcodes and settings",
        kind: IntegrationKind::PageBuilder,
        depends_on: &["js_composer"],
        theme: None,
        min_version: None,
        meta_key_patterns: &["/^_wpb_/", "_vc_post_settings"],
        overwrite_section: Some("wpbakery"),
        config_keys: &[],
        capabilities: &["shortcodes"],
    },
    Entry {
        name: "visual-composer",
        description: "Visual Composer page content",
        kind: IntegrationKind::PageBuilder,
        depends_on: &["visualcomposer"],
        theme: None,
        min_version: None,
        meta_key_patterns: &["/^vcv-/"],
        overwrite_section: Some("visual_composer"),
        config_keys: &[],
        capabilities: &["layout_json"],
    },
    Entry {
        name: "live-composer",
        description: "Live Composer page code",
        kind: IntegrationKind::PageBuilder,
        depends_on: &["live-composer-page-builder"],
        theme: None,
        min_version: None,
        meta_key_patterns: &["dslc_code"],
        overwrite_section: Some("live_composer"),
        config_keys: &[],
        capabilities: &["layout_json"],
    },
    Entry {
        name: "cornerstone",
        description: "Cornerstone builder data",
        kind: IntegrationKind::PageBuilder,
        depends_on: &["cornerstone"],
        theme: None,
        min_version: None,
        meta_key_patterns: &["_cornerstone_data", "_cornerstone_settings"],
        overwrite_section: Some("cornerstone"),
        config_keys: &[],
        capabilities: &["layout_json"],
    },
    Entry {
        name: "fusion-builder",
        description: "Avada Fusion Builder options",
        kind: IntegrationKind::PageBuilder,
        depends_on: &["fusion-builder"],
        theme: Some("Avada"),
        min_version: None,
        meta_key_patterns: &["/^_fusion/", "/^fusion_/"],
        overwrite_section: Some("fusion_builder"),
        config_keys: &[],
        capabilities: &["shortcodes"],
    },
    Entry {
        name: "hybrid-composer",
        description: "Hybrid Composer page settings",
        kind: IntegrationKind::PageBuilder,
        depends_on: &["hybrid-composer"],
        theme: None,
        min_version: None,
        meta_key_patterns: &["/^_hc_/"],
        overwrite_section: Some("hybrid_composer"),
        config_keys: &[],
        capabilities: &["layout_json"],
    },
    Entry {
        name: "seedprod",
        description: "SeedProd landing page data",
        kind: IntegrationKind::PageBuilder,
        depends_on: &["coming-soon", "seedprod-pro"],
        theme: None,
        min_version: None,
        meta_key_patterns: &["/^_seedprod_/"],
        overwrite_section: Some("seedprod"),
        config_keys: &[],
        capabilities: &["layout_json"],
    },
    // --- Themes ---
    Entry {
        name: "genesis",
        description: "Genesis Framework layout and SEO fields",
        kind: IntegrationKind::Theme,
        depends_on: &[],
        theme: Some("genesis"),
        min_version: None,
        meta_key_patterns: &["/^_genesis_/"],
        overwrite_section: Some("genesis"),
        config_keys: &[],
        capabilities: &["post_meta"],
    },
    Entry {
        name: "avia",
        description: "Enfold Avia layout builder data",
        kind: IntegrationKind::Theme,
        depends_on: &[],
        theme: Some("enfold"),
        min_version: None,
        meta_key_patterns: &["_aviaLayoutBuilderCleanData", "/^_avia_/"],
        overwrite_section: Some("avia"),
        config_keys: &[],
        capabilities: &["layout_shortcodes"],
    },
    Entry {
        name: "yootheme",
        description: "YOOtheme Pro builder source",
        kind: IntegrationKind::Theme,
        depends_on: &[],
        theme: Some("yootheme"),
        min_version: None,
        meta_key_patterns: &["/^_yootheme/"],
        overwrite_section: Some("yootheme"),
        config_keys: &[],
        capabilities: &["layout_json"],
    },
    // --- Custom fields ---
    Entry {
        name: "acf",
        description: "Advanced Custom Fields location rules and field copies",
        kind: IntegrationKind::Fields,
        depends_on: &["advanced-custom-fields", "advanced-custom-fields-pro"],
        theme: None,
        min_version: None,
        meta_key_patterns: &[],
        overwrite_section: Some("acf"),
        config_keys: &[],
        capabilities: &["location_rules"],
    },
    // --- Media ---
    Entry {
        name: "fifu",
        description: "Featured Image from URL fields",
        kind: IntegrationKind::Media,
        depends_on: &["featured-image-from-url"],
        theme: None,
        min_version: None,
        meta_key_patterns: &["/^fifu_/"],
        overwrite_section: Some("featured_image"),
        config_keys: &[],
        capabilities: &["featured_image"],
    },
    Entry {
        name: "image-url",
        description: "Featured image import from a URL",
        kind: IntegrationKind::Media,
        depends_on: &[],
        theme: None,
        min_version: None,
        meta_key_patterns: &[],
        overwrite_section: Some("featured_image"),
        config_keys: &[],
        capabilities: &["featured_image"],
    },
    // --- AI providers ---
    provider(
        "openai",
        "OpenAI chat completions",
        &["providers.openai.api_key"],
        &["chat"],
    ),
    provider(
        "anthropic",
        "Anthropic Claude messages",
        &["providers.anthropic.api_key"],
        &["chat"],
    ),
    provider(
        "gemini",
        "Google Gemini content generation",
        &["providers.gemini.api_key"],
        &["chat"],
    ),
    provider(
        "xai",
        "xAI Grok chat and image generation",
        &["providers.xai.api_key"],
        &["chat", "images"],
    ),
    provider(
        "mistral",
        "Mistral chat completions",
        &["providers.mistral.api_key"],
        &["chat"],
    ),
    provider(
        "deepseek",
        "DeepSeek chat completions",
        &["providers.deepseek.api_key"],
        &["chat"],
    ),
    provider(
        "qwen",
        "Alibaba Qwen chat completions",
        &["providers.qwen.api_key"],
        &["chat"],
    ),
    provider(
        "perplexity",
        "Perplexity chat completions",
        &["providers.perplexity.api_key"],
        &["chat"],
    ),
    provider(
        "openrouter",
        "OpenRouter multi-model gateway",
        &["providers.openrouter.api_key"],
        &["chat"],
    ),
    // --- Spinners / content services ---
    spinner(
        "spinrewriter",
        "Spin Rewriter unique variations",
        &[
            "spinners.spinrewriter.email_address",
            "spinners.spinrewriter.api_key",
        ],
    ),
    spinner(
        "wordai",
        "WordAi rewriting",
        &["spinners.wordai.email", "spinners.wordai.api_key"],
    ),
    spinner(
        "spinnerchief",
        "SpinnerChief spinning",
        &[
            "spinners.spinnerchief.api_key",
            "spinners.spinnerchief.username",
            "spinners.spinnerchief.password",
        ],
    ),
    spinner(
        "articleforge",
        "Article Forge article generation",
        &["spinners.articleforge.api_key"],
    ),
    spinner(
        "aiwriter",
        "AI Writer article research",
        &["spinners.aiwriter.api_key"],
    ),
    spinner(
        "contentbot",
        "ContentBot long-form content",
        &["spinners.contentbot.api_key"],
    ),
    // --- Research sources ---
    Entry {
        name: "youtube",
        description: "YouTube video search for dynamic elements",
        kind: IntegrationKind::Research,
        depends_on: &[],
        theme: None,
        min_version: None,
        meta_key_patterns: &[],
        overwrite_section: None,
        config_keys: &["research.youtube.api_key"],
        capabilities: &["video_search"],
    },
    Entry {
        name: "openweathermap",
        description: "OpenWeatherMap current conditions",
        kind: IntegrationKind::Research,
        depends_on: &[],
        theme: None,
        min_version: None,
        meta_key_patterns: &[],
        overwrite_section: None,
        config_keys: &["research.openweathermap.api_key"],
        capabilities: &["weather"],
    },
    // --- Storage ---
    Entry {
        name: "sqlite",
        description: "SQLite WAL-mode metadata store",
        kind: IntegrationKind::Storage,
        depends_on: &[],
        theme: None,
        min_version: None,
        meta_key_patterns: &[],
        overwrite_section: None,
        config_keys: &[],
        capabilities: &["post_meta", "options", "media"],
    },
];

/// Returns manifests for all built-in integrations.
pub fn builtin_catalog() -> Result<Vec<IntegrationManifest>, PageforgeError> {
    CATALOG.iter().map(Entry::build).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_builds_without_errors() {
        let catalog = builtin_catalog().unwrap();
        assert!(catalog.len() >= 35, "got {}", catalog.len());
    }

    #[test]
    fn catalog_names_are_unique() {
        let catalog = builtin_catalog().unwrap();
        let mut names: Vec<&str> = catalog.iter().map(|m| m.name.as_str()).collect();
        names.sort_unstable();
        let before = names.len();
        names.dedup();
        assert_eq!(before, names.len());
    }

    #[test]
    fn namespaces_do_not_collide() {
        // No integration's patterns may match a key another integration's
        // representative keys produce.
        let catalog = builtin_catalog().unwrap();
        let representatives: Vec<(&str, Vec<String>)> = catalog
            .iter()
            .map(|m| {
                let keys = m
                    .meta_key_patterns
                    .iter()
                    .map(|p| match p {
                        KeyPattern::Literal(l) => l.clone(),
                        // Representative key for an anchored prefix regex.
                        KeyPattern::Regex(r) => {
                            format!("{}sample", r.as_str().trim_start_matches('^'))
                        }
                    })
                    .collect();
                (m.name.as_str(), keys)
            })
            .collect();

        for (owner, keys) in &representatives {
            for key in keys {
                for other in &catalog {
                    if other.name == *owner {
                        continue;
                    }
                    for pattern in &other.meta_key_patterns {
                        assert!(
                            !pattern.matches(key),
                            "{}'s key {key} matched by {}'s pattern {}",
                            owner,
                            other.name,
                            pattern.as_source()
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn every_seo_and_builder_entry_declares_overwrite_section() {
        let catalog = builtin_catalog().unwrap();
        for m in catalog.iter().filter(|m| {
            matches!(
                m.kind,
                IntegrationKind::SeoPlugin | IntegrationKind::PageBuilder
            )
        }) {
            assert!(
                m.overwrite_section.is_some(),
                "{} missing overwrite_section",
                m.name
            );
        }
    }

    #[test]
    fn yoast_patterns_cover_wpseo_namespace() {
        let catalog = builtin_catalog().unwrap();
        let yoast = catalog.iter().find(|m| m.name == "yoast").unwrap();
        for key in ["_yoast_wpseo_title", "_yoast_wpseo_metadesc", "_yoast_wpseo_focuskw"] {
            assert!(yoast.meta_key_patterns.iter().any(|p| p.matches(key)));
        }
    }

    #[test]
    fn providers_require_api_key_config() {
        let catalog = builtin_catalog().unwrap();
        for m in catalog.iter().filter(|m| m.kind == IntegrationKind::Provider) {
            assert!(
                m.config_keys.iter().any(|k| k.ends_with("api_key")),
                "{} has no api_key config gate",
                m.name
            );
        }
    }
}
