// SPDX-FileCopyrightText: 2026 Pageforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed event bus for the Pageforge generation pipeline.
//!
//! Integrations never call each other directly; they register handlers on
//! the hook points in [`GenerationHooks`] and communicate through the
//! mutable payloads those hooks carry.

pub mod bus;
pub mod events;

pub use bus::{ActionBus, FilterBus, DEFAULT_PRIORITY};
pub use events::{ContentEvent, FinishedEvent, GenerationHooks, IgnoredKeysEvent};
