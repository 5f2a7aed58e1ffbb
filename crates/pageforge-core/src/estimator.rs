// SPDX-FileCopyrightText: 2026 Pageforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Token estimation behind a trait seam.
//!
//! The default estimator is the ~4-characters-per-token heuristic the
//! original pipeline budgets with. It is a deliberate approximation, kept
//! behind [`TokenEstimator`] so a real tokenizer can be substituted without
//! touching any provider call site (see the `tiktoken` feature).

use crate::types::ChatMessage;

/// Estimates how many tokens a prompt will consume.
pub trait TokenEstimator: Send + Sync {
    /// Estimated token count for a single piece of text.
    fn estimate(&self, text: &str) -> u32;

    /// Estimated token count for a full message list.
    fn estimate_messages(&self, messages: &[ChatMessage]) -> u32 {
        messages.iter().map(|m| self.estimate(&m.content)).sum()
    }
}

/// Fixed characters-per-token heuristic (default: 4).
#[derive(Debug, Clone, Copy)]
pub struct HeuristicEstimator {
    chars_per_token: u32,
}

impl HeuristicEstimator {
    pub const fn new(chars_per_token: u32) -> Self {
        Self { chars_per_token }
    }
}

impl Default for HeuristicEstimator {
    fn default() -> Self {
        Self::new(4)
    }
}

impl TokenEstimator for HeuristicEstimator {
    fn estimate(&self, text: &str) -> u32 {
        let chars = text.chars().count() as u32;
        chars.div_ceil(self.chars_per_token.max(1))
    }
}

/// BPE-backed estimator using the cl100k_base vocabulary.
///
/// Substitutes for the heuristic where exact budgets matter.
#[cfg(feature = "tiktoken")]
pub struct BpeEstimator {
    bpe: tiktoken_rs::CoreBPE,
}

#[cfg(feature = "tiktoken")]
impl BpeEstimator {
    pub fn cl100k() -> Result<Self, crate::error::PageforgeError> {
        let bpe = tiktoken_rs::cl100k_base()
            .map_err(|e| crate::error::PageforgeError::Internal(format!("tokenizer init: {e}")))?;
        Ok(Self { bpe })
    }
}

#[cfg(feature = "tiktoken")]
impl TokenEstimator for BpeEstimator {
    fn estimate(&self, text: &str) -> u32 {
        self.bpe.encode_ordinary(text).len() as u32
    }
}
