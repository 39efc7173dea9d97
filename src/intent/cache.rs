//! Bounded LRU memo of normalized text → intent.

use std::num::NonZeroUsize;
use std::sync::{Mutex, MutexGuard, PoisonError};

use lru::LruCache;
use tracing::{debug, info};

use super::Intent;

pub struct IntentCache {
    entries: Mutex<LruCache<String, Intent>>,
}

impl IntentCache {
    /// `capacity == 0` keeps every entry for the life of the cache.
    pub fn new(capacity: usize) -> Self {
        let entries = match NonZeroUsize::new(capacity) {
            Some(cap) => LruCache::new(cap),
            None => LruCache::unbounded(),
        };

        Self {
            entries: Mutex::new(entries),
        }
    }

    fn lock(&self) -> MutexGuard<'_, LruCache<String, Intent>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get(&self, key: &str) -> Option<Intent> {
        let hit = self.lock().get(key).cloned();
        if hit.is_some() {
            debug!(key = key, "Cache hit");
        }
        hit
    }

    /// Last write wins for concurrent inserts of the same key.
    pub fn insert(&self, key: String, intent: Intent) {
        let mut entries = self.lock();
        if let Some((evicted, _)) = entries.push(key.clone(), intent) {
            if evicted != key {
                debug!(key = %evicted, "Cache entry evicted");
            }
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
        info!("Intent cache cleared");
    }
}
