// SPDX-FileCopyrightText: 2026 Pageforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Token budget arithmetic shared by every chat provider.
//!
//! `remaining = token_limit(model) - estimate(messages)`; a non-positive
//! remainder is a "prompt too long" error before any request is sent.

use pageforge_core::{ChatMessage, ModelSpec, PageforgeError, TokenEstimator};

/// Compute the output token budget for one request.
///
/// Returns the number of output tokens to ask the provider for: the
/// remaining budget under the model's token ceiling, capped by the model's
/// hard output limit.
pub fn output_budget(
    spec: &ModelSpec,
    estimator: &dyn TokenEstimator,
    messages: &[ChatMessage],
) -> Result<u32, PageforgeError> {
    let estimated = estimator.estimate_messages(messages);
    if estimated >= spec.token_limit {
        return Err(PageforgeError::PromptTooLong {
            model: spec.id.to_string(),
            estimated,
            limit: spec.token_limit,
        });
    }
    Ok((spec.token_limit - estimated).min(spec.max_output_tokens))
}
