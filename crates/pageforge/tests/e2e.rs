// SPDX-FileCopyrightText: 2026 Pageforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests for the wired generation pipeline.
//!
//! Each test builds an isolated GenerationHarness with its own environment
//! snapshot and in-memory store. Tests are independent and order-insensitive.

use pageforge_core::{
    ChatMessage, ChatParams, ChatProvider, GenerationTarget, GroupId, GroupSettings, MetaMap,
    MetadataStore, PostId,
};
use pageforge_integrations::{update_aioseo_post_table, AioseoRecord};
use pageforge_test_utils::{GenerationHarness, MockChatProvider};
use pageforge_transcode::TranscoderSet;
use serde_json::json;

fn group(meta: &[(&str, serde_json::Value)], sections: &[&str]) -> GroupSettings {
    GroupSettings {
        overwrite_sections: sections.iter().map(ToString::to_string).collect(),
        post_meta: meta
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect(),
    }
}

// ---- Overwrite-section gating ----

#[tokio::test]
async fn regenerating_without_yoast_section_preserves_existing_seo_fields() {
    let harness = GenerationHarness::builder()
        .with_dependency("wordpress-seo", None)
        .build()
        .unwrap();

    // An earlier pass wrote hand-tuned SEO fields onto the page.
    let page = PostId(11);
    harness
        .store
        .set_post_meta(page, "_yoast_wpseo_title", json!("Hand-tuned title"))
        .await
        .unwrap();

    // Regenerate with yoast_seo NOT among the chosen overwrite sections.
    let g = group(
        &[
            ("_yoast_wpseo_title", json!("Template title for {city}")),
            ("headline", json!("Fresh headline")),
        ],
        &["elementor"],
    );
    harness
        .generate(&g, GenerationTarget::regenerate(GroupId(1), page), |_| {})
        .await
        .unwrap();

    // The SEO field survived; everything ungated was overwritten.
    assert_eq!(
        harness
            .store
            .get_post_meta(page, "_yoast_wpseo_title")
            .await
            .unwrap(),
        Some(json!("Hand-tuned title"))
    );
    assert_eq!(
        harness.store.get_post_meta(page, "headline").await.unwrap(),
        Some(json!("Fresh headline"))
    );
}

#[tokio::test]
async fn regenerating_with_yoast_section_overwrites_seo_fields() {
    let harness = GenerationHarness::builder()
        .with_dependency("wordpress-seo", None)
        .build()
        .unwrap();

    let page = PostId(11);
    harness
        .store
        .set_post_meta(page, "_yoast_wpseo_title", json!("Hand-tuned title"))
        .await
        .unwrap();

    let g = group(&[("_yoast_wpseo_title", json!("Template title"))], &["yoast_seo"]);
    harness
        .generate(&g, GenerationTarget::regenerate(GroupId(1), page), |_| {})
        .await
        .unwrap();

    assert_eq!(
        harness
            .store
            .get_post_meta(page, "_yoast_wpseo_title")
            .await
            .unwrap(),
        Some(json!("Template title"))
    );
}

#[tokio::test]
async fn brand_new_page_writes_gated_fields_too() {
    let harness = GenerationHarness::builder()
        .with_dependency("wordpress-seo", None)
        .build()
        .unwrap();

    let g = group(&[("_yoast_wpseo_title", json!("Template title"))], &[]);
    let page = harness
        .generate(&g, GenerationTarget::new_page(GroupId(1)), |_| {})
        .await
        .unwrap();

    assert_eq!(
        harness
            .store
            .get_post_meta(page, "_yoast_wpseo_title")
            .await
            .unwrap(),
        Some(json!("Template title"))
    );
}

// ---- Orphan stripping ----

#[tokio::test]
async fn inactive_seo_namespace_never_reaches_the_generated_page() {
    // Yoast is NOT active in this environment.
    let harness = GenerationHarness::builder().build().unwrap();

    let g = group(
        &[
            ("_yoast_wpseo_title", json!("Stale field")),
            ("headline", json!("Kept")),
        ],
        &[],
    );
    let page = harness
        .generate(&g, GenerationTarget::new_page(GroupId(1)), |_| {})
        .await
        .unwrap();

    assert_eq!(
        harness
            .store
            .get_post_meta(page, "_yoast_wpseo_title")
            .await
            .unwrap(),
        None
    );
    assert_eq!(
        harness.store.get_post_meta(page, "headline").await.unwrap(),
        Some(json!("Kept"))
    );
}

// ---- Builder transcoding through the full pass ----

#[tokio::test]
async fn brizy_layout_is_decoded_for_substitution_and_stored_base64() {
    let harness = GenerationHarness::builder()
        .with_dependency("brizy", None)
        .build()
        .unwrap();

    let tree = json!({"pageData": {"items": [{"text": "Visit {city} today"}]}});
    let stored = TranscoderSet::builtin()
        .encode_or_passthrough("brizy", &tree)
        .unwrap();
    assert!(!stored.contains('{'), "brizy blobs are base64 on disk");

    let g = group(&[("brizy", json!(stored))], &[]);
    let page = harness
        .generate(&g, GenerationTarget::new_page(GroupId(1)), |meta: &mut MetaMap| {
            // The substitution pass sees the decoded tree, not the blob.
            let text = meta["brizy"]["pageData"]["items"][0]["text"]
                .as_str()
                .unwrap()
                .replace("{city}", "Bristol");
            meta.get_mut("brizy").unwrap()["pageData"]["items"][0]["text"] = json!(text);
        })
        .await
        .unwrap();

    // On disk the value is base64 again and decodes to the substituted tree.
    let written = harness.store.get_post_meta(page, "brizy").await.unwrap().unwrap();
    let raw = written.as_str().unwrap();
    assert!(!raw.contains('{'));
    let decoded = TranscoderSet::builtin()
        .decode_or_passthrough("brizy", raw)
        .unwrap();
    assert_eq!(
        decoded["pageData"]["items"][0]["text"],
        json!("Visit Bristol today")
    );
}

// ---- AIOSEO dedicated table ----

#[tokio::test]
async fn aioseo_row_is_written_when_its_section_is_chosen() {
    let harness = GenerationHarness::builder()
        .with_dependency("all-in-one-seo-pack", Some(semver::Version::new(4, 5, 0)))
        .build()
        .unwrap();
    assert!(harness.is_active("aioseo"));

    let manifest = harness.registry.get("aioseo").unwrap().manifest.clone();
    let target = GenerationTarget::regenerate(GroupId(2), PostId(30));
    let g = group(&[], &["aioseo"]);

    let record = AioseoRecord {
        title: "Electricians in Cardiff".to_string(),
        description: "24/7 callouts".to_string(),
        ..Default::default()
    };
    let written =
        update_aioseo_post_table(&*harness.store, &target, &g, &manifest, PostId(30), &record)
            .await
            .unwrap();
    assert!(written);

    let row = harness
        .store
        .integration_row("aioseo", PostId(30))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row["title"], "Electricians in Cardiff");
}

#[tokio::test]
async fn aioseo_below_minimum_version_is_inactive() {
    let harness = GenerationHarness::builder()
        .with_dependency("all-in-one-seo-pack", Some(semver::Version::new(3, 9, 0)))
        .build()
        .unwrap();
    assert!(!harness.is_active("aioseo"));
}

// ---- Provider plumbing ----

#[tokio::test]
async fn mock_provider_drives_the_chat_trait() {
    let provider = MockChatProvider::with_responses(vec!["  Ten plumbing tips  ".to_string()]);
    let chat: &dyn ChatProvider = &provider;

    let completion = chat
        .query(
            "mock-chat",
            &[ChatMessage::user("write an article title")],
            &ChatParams::default(),
        )
        .await
        .unwrap();
    assert_eq!(completion.text, "Ten plumbing tips");
    assert_eq!(chat.token_limit("mock-chat"), Some(8192));
}
