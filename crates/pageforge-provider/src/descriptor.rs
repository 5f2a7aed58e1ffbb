// SPDX-FileCopyrightText: 2026 Pageforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider descriptors: the per-provider constants a chat adapter needs.

use pageforge_core::ModelSpec;

/// How a provider expects its API key on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthScheme {
    /// `Authorization: Bearer <key>`.
    Bearer,
    /// A custom header, e.g. `x-api-key`.
    Header(&'static str),
    /// A URL query parameter, e.g. `?key=<key>`.
    QueryParam(&'static str),
}

/// Static description of one chat provider's endpoint and model table.
#[derive(Debug, Clone, Copy)]
pub struct ProviderDescriptor {
    /// Registry name, also the error-message prefix.
    pub name: &'static str,
    /// Chat-completions endpoint URL.
    pub endpoint: &'static str,
    /// Auth header shape.
    pub auth: AuthScheme,
    /// Where users create an account / fetch a key.
    pub account_url: &'static str,
    /// Known models with their token ceilings.
    pub models: &'static [ModelSpec],
}

impl ProviderDescriptor {
    /// Look up a model spec by id.
    pub fn model(&self, id: &str) -> Option<&ModelSpec> {
        self.models.iter().find(|m| m.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DESC: ProviderDescriptor = ProviderDescriptor {
        name: "test",
        endpoint: "https://example.com/v1/chat/completions",
        auth: AuthScheme::Bearer,
        account_url: "https://example.com/account",
        models: &[
            ModelSpec::new("alpha", 1000, 400),
            ModelSpec::new("beta", 2000, 800),
        ],
    };

    #[test]
    fn model_lookup_by_id() {
        assert_eq!(DESC.model("alpha").unwrap().token_limit, 1000);
        assert_eq!(DESC.model("beta").unwrap().max_output_tokens, 800);
        assert!(DESC.model("gamma").is_none());
    }
}
