// SPDX-FileCopyrightText: 2026 Pageforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-run cache of discovered custom field keys.
//!
//! Field discovery can be expensive (a full metadata scan), so each
//! integration's key list is computed once per generation run and reused
//! for every page in that run.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Once-per-run cache keyed by integration name.
#[derive(Default)]
pub struct FieldCache {
    cache: Mutex<HashMap<String, Arc<Vec<String>>>>,
}

impl FieldCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached field keys for an integration, running `discover`
    /// on the first call only.
    pub fn get_or_discover<F>(&self, integration: &str, discover: F) -> Arc<Vec<String>>
    where
        F: FnOnce() -> Vec<String>,
    {
        let mut cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(fields) = cache.get(integration) {
            return Arc::clone(fields);
        }
        let fields = Arc::new(discover());
        cache.insert(integration.to_string(), Arc::clone(&fields));
        fields
    }

    /// Drop all cached entries (start of a new run).
    pub fn clear(&self) {
        self.cache.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn discover_runs_once_per_integration() {
        let cache = FieldCache::new();
        let calls = AtomicUsize::new(0);

        for _ in 0..3 {
            let fields = cache.get_or_discover("acf", || {
                calls.fetch_add(1, Ordering::SeqCst);
                vec!["field_hero".to_string(), "field_cta".to_string()]
            });
            assert_eq!(fields.len(), 2);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn integrations_are_cached_independently() {
        let cache = FieldCache::new();
        cache.get_or_discover("acf", || vec!["a".to_string()]);
        let other = cache.get_or_discover("toolset", || vec!["b".to_string()]);
        assert_eq!(other.as_slice(), ["b".to_string()]);
    }

    #[test]
    fn clear_forces_rediscovery() {
        let cache = FieldCache::new();
        let calls = AtomicUsize::new(0);
        let mut discover = || {
            calls.fetch_add(1, Ordering::SeqCst);
            vec![]
        };
        cache.get_or_discover("acf", &mut discover);
        cache.clear();
        cache.get_or_discover("acf", &mut discover);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
