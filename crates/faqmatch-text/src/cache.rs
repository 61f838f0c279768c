//! Bounded LRU memoization of normalizer output keyed by `xxh64(text)`.
//!
//! A miss simply recomputes; the cache never changes results.

use std::hash::Hasher;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};

use lru::LruCache;
use parking_lot::Mutex;
use twox_hash::XxHash64;

use faqmatch_core::traits::Normalizer;
use faqmatch_core::types::NormalizedText;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub len: usize,
    pub capacity: usize,
}

pub struct NormalizationCache {
    entries: Mutex<LruCache<u64, NormalizedText>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

pub fn hash_key(text: &str) -> u64 {
    let mut hasher = XxHash64::with_seed(0);
    hasher.write(text.as_bytes());
    hasher.finish()
}

impl NormalizationCache {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self { entries: Mutex::new(LruCache::new(capacity)), hits: AtomicU64::new(0), misses: AtomicU64::new(0) }
    }

    /// Return the cached value for `text`, or compute, store and return it.
    ///
    /// The lock is not held while `compute` runs.
    pub fn get_or_compute<F>(&self, text: &str, compute: F) -> NormalizedText
    where
        F: FnOnce(&str) -> NormalizedText,
    {
        let key = hash_key(text);
        if let Some(found) = self.entries.lock().get(&key).cloned() {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return found;
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        let value = compute(text);
        self.entries.lock().put(key, value.clone());
        value
    }

    pub fn stats(&self) -> CacheStats {
        let entries = self.entries.lock();
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            len: entries.len(),
            capacity: entries.cap().get(),
        }
    }
}

/// A normalizer whose results go through a [`NormalizationCache`].
pub struct CachedNormalizer<N> {
    inner: N,
    cache: NormalizationCache,
}

impl<N: Normalizer> CachedNormalizer<N> {
    pub fn new(inner: N, capacity: usize) -> Self { Self { inner, cache: NormalizationCache::new(capacity) } }

    pub fn cache_stats(&self) -> CacheStats { self.cache.stats() }
}

impl<N: Normalizer> Normalizer for CachedNormalizer<N> {
    fn name(&self) -> &'static str { self.inner.name() }

    fn normalize(&self, text: &str) -> NormalizedText {
        self.cache.get_or_compute(text, |t| self.inner.normalize(t))
    }
}
