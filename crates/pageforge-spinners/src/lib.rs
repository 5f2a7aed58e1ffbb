// SPDX-FileCopyrightText: 2026 Pageforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Article spinner and content service adapters.
//!
//! Every service here is a one-shot form-encoded or JSON POST with the
//! same normalization contract as the chat providers: missing credentials
//! are a configuration error before any I/O, transport failures and
//! service-reported errors come back provider-prefixed, and success is a
//! plain text payload.

pub mod aiwriter;
pub mod articleforge;
pub mod contentbot;
pub mod spinnerchief;
pub mod spinrewriter;
pub mod wordai;

use async_trait::async_trait;
use pageforge_core::PageforgeError;

pub use aiwriter::AiWriterClient;
pub use articleforge::ArticleForgeClient;
pub use contentbot::ContentBotClient;
pub use spinnerchief::SpinnerChiefClient;
pub use spinrewriter::SpinRewriterClient;
pub use wordai::WordAiClient;

/// A service that rewrites existing text into a unique variation.
#[async_trait]
pub trait ArticleSpinner: Send + Sync {
    fn name(&self) -> &str;

    /// Spin the given text. One blocking call, no retries.
    async fn spin(&self, text: &str) -> Result<String, PageforgeError>;
}

/// A service that writes a fresh article from a keyword.
#[async_trait]
pub trait ArticleWriter: Send + Sync {
    fn name(&self) -> &str;

    /// Generate an article for the keyword. One blocking call, no retries.
    async fn write(&self, keyword: &str) -> Result<String, PageforgeError>;
}
