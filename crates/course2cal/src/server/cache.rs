//! TTL-based caching of parse results, keyed by the pasted text.

use dashmap::DashMap;
use sha2::{Digest, Sha256};
use std::time::{Duration, Instant};

use crate::schedule::CourseSession;

/// Hash of a pasted buffer, used as the cache key.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
pub struct InputKey(String);

impl InputKey {
    /// Hashes the raw text so the cache never holds a second copy of it.
    pub fn from_text(text: &str) -> Self {
        let digest = Sha256::digest(text.as_bytes());
        Self(hex::encode(&digest[..16]))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for InputKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}...", &self.0[..8.min(self.0.len())])
    }
}

#[derive(Clone)]
struct CachedParse {
    sessions: Vec<CourseSession>,
    cached_at: Instant,
}

/// Thread-safe cache of parse results.
pub struct ParseCache {
    entries: DashMap<InputKey, CachedParse>,
    ttl: Duration,
}

impl ParseCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    /// Returns a copy of the cached sessions if the entry is still fresh.
    pub fn get(&self, key: &InputKey) -> Option<Vec<CourseSession>> {
        self.entries.get(key).and_then(|entry| {
            if entry.cached_at.elapsed() < self.ttl {
                Some(entry.sessions.clone())
            } else {
                drop(entry);
                self.entries.remove(key);
                None
            }
        })
    }

    pub fn insert(&self, key: InputKey, sessions: Vec<CourseSession>) {
        self.entries.insert(
            key,
            CachedParse {
                sessions,
                cached_at: Instant::now(),
            },
        );
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every expired entry.
    pub fn cleanup_expired(&self) {
        let ttl = self.ttl;
        self.entries.retain(|_, entry| entry.cached_at.elapsed() < ttl);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::parse_courses;

    #[test]
    fn test_input_key_hashing() {
        let a = InputKey::from_text("微積分");
        assert_eq!(a, InputKey::from_text("微積分"));
        assert_ne!(a, InputKey::from_text("微積分 "));
        assert_eq!(a.as_str().len(), 32);
        assert_eq!(a.to_string().len(), 11);
        assert_eq!(InputKey::from_text("").as_str(), "e3b0c44298fc1c149afbf4c8996fb924");
    }

    #[test]
    fn test_get_and_insert() {
        let cache = ParseCache::new(Duration::from_secs(60));
        let text = "資料結構\n陳老師\n二 3,4\n資104\n";
        let key = InputKey::from_text(text);

        assert!(cache.get(&key).is_none());
        cache.insert(key.clone(), parse_courses(text));
        assert_eq!(cache.get(&key).unwrap().len(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_expired_entries_are_dropped() {
        let cache = ParseCache::new(Duration::ZERO);
        let key = InputKey::from_text("x");
        cache.insert(key.clone(), Vec::new());

        assert!(cache.get(&key).is_none());
        assert!(cache.is_empty());

        cache.insert(key, Vec::new());
        cache.cleanup_expired();
        assert!(cache.is_empty());
    }
}
