// SPDX-FileCopyrightText: 2026 Pageforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared chat provider plumbing for the Pageforge workspace.
//!
//! Per-provider crates combine three pieces from here: the token budget
//! check ([`budget::output_budget`]), rate-limit backoff parsing
//! ([`backoff`]), and -- for the OpenAI-compatible majority -- the generic
//! [`CompatClient`] parameterized by a [`ProviderDescriptor`].

pub mod backoff;
pub mod budget;
pub mod compat;
pub mod descriptor;

pub use backoff::{parse_reset_duration, ratelimit_reset_backoff, retry_after_backoff};
pub use budget::output_budget;
pub use compat::CompatClient;
pub use descriptor::{AuthScheme, ProviderDescriptor};
