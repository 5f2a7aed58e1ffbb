// SPDX-FileCopyrightText: 2026 Pageforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across adapter traits and the Pageforge workspace.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Identifier of a generated page (or the template post it came from).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PostId(pub i64);

/// Identifier of a content group (the template many pages are generated from).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupId(pub i64);

/// Identifier of an imported media item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MediaId(pub i64);

/// Ordered mapping of namespaced metadata keys to arbitrary values.
///
/// Keys are namespaced by owning integration (e.g. `_yoast_wpseo_title`).
/// Values may be strings, nested maps, or encoded layout blobs.
pub type MetaMap = BTreeMap<String, serde_json::Value>;

/// Per-group settings carried through a generation pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupSettings {
    /// Section keys the user chose to overwrite when regenerating a page.
    #[serde(default)]
    pub overwrite_sections: BTreeSet<String>,

    /// Template metadata to be copied onto generated pages.
    #[serde(default)]
    pub post_meta: MetaMap,
}

/// The page a generation pass is writing to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationTarget {
    /// Group this page is generated from.
    pub group: GroupId,
    /// Set when regenerating an existing page; `None` for a brand-new page.
    pub existing_id: Option<PostId>,
}

impl GenerationTarget {
    /// A target with no existing page (first generation).
    pub fn new_page(group: GroupId) -> Self {
        Self {
            group,
            existing_id: None,
        }
    }

    /// A target regenerating an existing page.
    pub fn regenerate(group: GroupId, existing: PostId) -> Self {
        Self {
            group,
            existing_id: Some(existing),
        }
    }
}

/// Identifies the kind of integration in the registry.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum IntegrationKind {
    Provider,
    Spinner,
    SeoPlugin,
    PageBuilder,
    Theme,
    Fields,
    Media,
    Research,
    Storage,
}

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

// --- Chat provider types ---

/// Role of a chat message.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// A single message in a chat completion request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Caller-supplied tuning parameters for a chat completion.
///
/// Every field is optional; unset fields are omitted from the wire request.
/// Parameters a target model does not support are stripped before sending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatParams {
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
    pub frequency_penalty: Option<f32>,
    pub presence_penalty: Option<f32>,
}

/// A tuning parameter a model may decline to support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum TuningParam {
    Temperature,
    TopP,
    FrequencyPenalty,
    PresencePenalty,
}

impl ChatParams {
    /// Returns a copy with the listed parameters cleared.
    pub fn strip(mut self, unsupported: &[TuningParam]) -> Self {
        for param in unsupported {
            match param {
                TuningParam::Temperature => self.temperature = None,
                TuningParam::TopP => self.top_p = None,
                TuningParam::FrequencyPenalty => self.frequency_penalty = None,
                TuningParam::PresencePenalty => self.presence_penalty = None,
            }
        }
        self
    }
}

/// Token usage reported by a provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    #[serde(default)]
    pub input_tokens: u32,
    #[serde(default)]
    pub output_tokens: u32,
}

/// The normalized result of a single chat completion.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    /// Trimmed completion text.
    pub text: String,
    /// Model that produced the completion.
    pub model: String,
    /// Token usage, when the provider reports it.
    pub usage: Option<TokenUsage>,
}

/// Per-model ceilings and capability quirks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelSpec {
    /// Model identifier as sent on the wire.
    pub id: &'static str,
    /// Total token ceiling the input budget is computed against.
    pub token_limit: u32,
    /// Hard cap on requested output tokens.
    pub max_output_tokens: u32,
    /// Tuning parameters this model rejects.
    pub unsupported: &'static [TuningParam],
}

impl ModelSpec {
    pub const fn new(id: &'static str, token_limit: u32, max_output_tokens: u32) -> Self {
        Self {
            id,
            token_limit,
            max_output_tokens,
            unsupported: &[],
        }
    }

    pub const fn with_unsupported(mut self, unsupported: &'static [TuningParam]) -> Self {
        self.unsupported = unsupported;
        self
    }
}

/// Provider-agnostic view of a rate-limited HTTP response (429/529).
///
/// Header names are stored lowercased. The retry loop itself lives in the
/// caller; adapters only translate this into a wait duration.
#[derive(Debug, Clone, Default)]
pub struct RateLimited {
    pub status: u16,
    pub headers: BTreeMap<String, String>,
}

impl RateLimited {
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: BTreeMap::new(),
        }
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.to_string());
        self
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }
}

// --- Research types ---

/// A single normalized research result (video, weather reading, etc.).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchResult {
    pub title: String,
    pub url: Option<String>,
    pub body: String,
}

// --- Media types ---

/// Raw image bytes plus enough metadata to import them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    pub bytes: Vec<u8>,
    pub mime: String,
    pub file_name: String,
}
