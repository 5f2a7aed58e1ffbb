// SPDX-FileCopyrightText: 2026 Pageforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Priority-ordered filter and action buses.
//!
//! Handlers run on a single call stack in ascending priority order, and in
//! registration order within a priority. There is no cross-request ordering
//! guarantee and no concurrency -- the surrounding pipeline serializes
//! per-group generation.

use std::collections::BTreeMap;

use tracing::trace;

/// Default handler priority, matching the host convention.
pub const DEFAULT_PRIORITY: i32 = 10;

type FilterHandler<T> = Box<dyn Fn(T) -> T + Send + Sync>;
type ActionHandler<T> = Box<dyn Fn(&T) + Send + Sync>;

/// A bus whose handlers transform a payload and pass it along.
///
/// The payload type is part of the bus -- a handler with the wrong shape
/// does not compile, replacing the "silently ignored hook" failure mode of
/// convention-based callbacks.
pub struct FilterBus<T> {
    handlers: BTreeMap<i32, Vec<FilterHandler<T>>>,
}

impl<T> FilterBus<T> {
    pub fn new() -> Self {
        Self {
            handlers: BTreeMap::new(),
        }
    }

    /// Register a handler at the given priority. Lower priorities run first.
    pub fn register<F>(&mut self, priority: i32, handler: F)
    where
        F: Fn(T) -> T + Send + Sync + 'static,
    {
        self.handlers
            .entry(priority)
            .or_default()
            .push(Box::new(handler));
    }

    /// Run the payload through every handler and return the final value.
    pub fn apply(&self, payload: T) -> T {
        let mut value = payload;
        for (priority, handlers) in &self.handlers {
            trace!(priority, count = handlers.len(), "running filter handlers");
            for handler in handlers {
                value = handler(value);
            }
        }
        value
    }

    /// Total number of registered handlers.
    pub fn len(&self) -> usize {
        self.handlers.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<T> Default for FilterBus<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// A bus whose handlers observe a payload without transforming it.
pub struct ActionBus<T> {
    handlers: BTreeMap<i32, Vec<ActionHandler<T>>>,
}

impl<T> ActionBus<T> {
    pub fn new() -> Self {
        Self {
            handlers: BTreeMap::new(),
        }
    }

    pub fn register<F>(&mut self, priority: i32, handler: F)
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.handlers
            .entry(priority)
            .or_default()
            .push(Box::new(handler));
    }

    /// Notify every handler in priority order.
    pub fn emit(&self, payload: &T) {
        for handlers in self.handlers.values() {
            for handler in handlers {
                handler(payload);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.handlers.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<T> Default for ActionBus<T> {
    fn default() -> Self {
        Self::new()
    }
}
