//! Check-then-populate cache for on-demand result details.
//!
//! Every lookup takes a fresh [`RequestToken`]. A response that arrives after
//! a newer lookup started is still cached, but [`DetailCache::complete`]
//! reports it as superseded so the caller does not display it.

use std::collections::HashMap;
use std::hash::Hash;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(u64);

#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<V> {
    Cached(V),
    Pending(RequestToken),
}

#[derive(Debug)]
pub struct DetailCache<K, V> {
    entries: HashMap<K, V>,
    current: u64,
}

impl<K, V> Default for DetailCache<K, V> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            current: 0,
        }
    }
}

impl<K: Eq + Hash, V: Clone> DetailCache<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a lookup for `key`, superseding any lookup still in flight.
    pub fn begin(&mut self, key: &K) -> Lookup<V> {
        self.current += 1;
        match self.entries.get(key) {
            Some(v) => Lookup::Cached(v.clone()),
            None => Lookup::Pending(RequestToken(self.current)),
        }
    }

    /// Store a fetched value. Returns `true` if `token` is still the latest
    /// lookup and the value should be shown.
    pub fn complete(&mut self, token: RequestToken, key: K, value: V) -> bool {
        self.entries.insert(key, value);
        let current = token.0 == self.current;
        if !current {
            tracing::debug!(token = token.0, latest = self.current, "Discarding superseded detail");
        }
        current
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry and invalidate outstanding tokens.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.current += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_lookup_hits_cache() {
        let mut cache = DetailCache::new();
        let Lookup::Pending(token) = cache.begin(&"h1") else {
            panic!("expected miss");
        };
        assert!(cache.complete(token, "h1", 5));
        assert_eq!(cache.begin(&"h1"), Lookup::Cached(5));
    }

    #[test]
    fn superseded_result_is_cached_but_not_applied() {
        let mut cache = DetailCache::new();
        let Lookup::Pending(first) = cache.begin(&"a") else {
            panic!("expected miss");
        };
        let Lookup::Pending(second) = cache.begin(&"b") else {
            panic!("expected miss");
        };

        assert!(!cache.complete(first, "a", 1));
        assert_eq!(cache.get(&"a"), Some(&1));
        assert!(cache.complete(second, "b", 2));
    }

    #[test]
    fn clear_invalidates_in_flight_tokens() {
        let mut cache = DetailCache::new();
        let Lookup::Pending(token) = cache.begin(&"a") else {
            panic!("expected miss");
        };
        cache.clear();
        assert!(!cache.complete(token, "a", 1));
        cache.clear();
        assert!(cache.is_empty());
    }
}
