// SPDX-FileCopyrightText: 2026 Pageforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Metadata key patterns: exact-match literals or delimited regexes.
//!
//! Every integration declares the metadata key namespace it owns as a list
//! of patterns. A pattern string wrapped in `/` delimiters compiles to a
//! regex; anything else matches a key exactly. The tagged variant replaces
//! the old "does the pattern contain a slash" heuristic -- the decision is
//! made once, at parse time.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::PageforgeError;

/// A metadata key pattern: an exact key name or a compiled regex.
#[derive(Debug, Clone)]
pub enum KeyPattern {
    /// Matches a key exactly.
    Literal(String),
    /// Matches any key the regex finds a match in.
    Regex(regex::Regex),
}

impl KeyPattern {
    /// An exact-match pattern.
    pub fn literal(key: impl Into<String>) -> Self {
        Self::Literal(key.into())
    }

    /// A regex pattern from undelimited source (e.g. `^_yoast_wpseo_`).
    pub fn regex(source: &str) -> Result<Self, PageforgeError> {
        let compiled = regex::Regex::new(source).map_err(|e| {
            PageforgeError::Config(format!("invalid key pattern `{source}`: {e}"))
        })?;
        Ok(Self::Regex(compiled))
    }

    /// Parse a pattern string: `/delimited/` compiles to a regex,
    /// anything else is an exact-match literal.
    pub fn parse(pattern: &str) -> Result<Self, PageforgeError> {
        if pattern.len() >= 2 && pattern.starts_with('/') && pattern.ends_with('/') {
            Self::regex(&pattern[1..pattern.len() - 1])
        } else {
            Ok(Self::literal(pattern))
        }
    }

    /// Returns true if the given metadata key matches this pattern.
    pub fn matches(&self, key: &str) -> bool {
        match self {
            Self::Literal(lit) => lit == key,
            Self::Regex(re) => re.is_match(key),
        }
    }

    /// The original string form: the literal itself, or the regex source
    /// wrapped back in `/` delimiters.
    pub fn as_source(&self) -> String {
        match self {
            Self::Literal(lit) => lit.clone(),
            Self::Regex(re) => format!("/{}/", re.as_str()),
        }
    }
}

// Regexes compare by source, which is what equality means for patterns.
impl PartialEq for KeyPattern {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Literal(a), Self::Literal(b)) => a == b,
            (Self::Regex(a), Self::Regex(b)) => a.as_str() == b.as_str(),
            _ => false,
        }
    }
}

impl Eq for KeyPattern {}

impl Serialize for KeyPattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.as_source())
    }
}

impl<'de> Deserialize<'de> for KeyPattern {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let source = String::deserialize(deserializer)?;
        Self::parse(&source).map_err(D::Error::custom)
    }
}

/// Returns true if any pattern in the list matches the key.
pub fn any_match(patterns: &[KeyPattern], key: &str) -> bool {
    patterns.iter().any(|p| p.matches(key))
}
