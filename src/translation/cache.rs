/*!
 * Translation caching functionality.
 *
 * This module provides caching of translations keyed by the exact source
 * text and the language pair, so repeated OCR frames showing the same text
 * never reach a translation session twice. The cache is bounded: once
 * `max_entries` is reached the oldest insertion is evicted, and an optional
 * TTL turns stale entries into misses.
 */

use log::debug;
use parking_lot::RwLock;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use crate::app_config::CacheConfig;

/// Default maximum number of entries
const DEFAULT_MAX_ENTRIES: usize = 1000;

/// Cache key combining source text, source language, and target language
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    /// Source text exactly as received
    source_text: String,

    /// Source language code
    source_language: String,

    /// Target language code
    target_language: String,
}

impl CacheKey {
    /// Create a new cache key
    fn new(source_text: &str, source_language: &str, target_language: &str) -> Self {
        Self {
            source_text: source_text.to_string(),
            source_language: source_language.to_string(),
            target_language: target_language.to_string(),
        }
    }
}

/// A cached translation
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    /// Translated text
    pub translation: String,

    /// When the current value was stored
    pub inserted_at: Instant,
}

/// Cache hit/miss statistics
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
    pub entries: usize,
    pub hit_rate: f64,
}

#[derive(Debug, Default)]
struct CacheState {
    entries: HashMap<CacheKey, CacheEntry>,
    /// Insertion order used for eviction
    order: VecDeque<CacheKey>,
}

impl CacheState {
    fn remove(&mut self, key: &CacheKey) {
        if self.entries.remove(key).is_some() {
            self.order.retain(|k| k != key);
        }
    }
}

/// Translation cache for storing and retrieving translations
#[derive(Debug)]
pub struct TranslationCache {
    /// Internal cache storage
    state: Arc<RwLock<CacheState>>,

    /// Cache hit counter
    hits: Arc<AtomicUsize>,

    /// Cache miss counter
    misses: Arc<AtomicUsize>,

    /// Whether caching is enabled
    enabled: bool,

    /// Maximum number of entries kept
    max_entries: usize,

    /// Optional entry lifetime
    ttl: Option<Duration>,
}

impl TranslationCache {
    /// Create a new translation cache
    pub fn new(enabled: bool) -> Self {
        Self {
            state: Arc::new(RwLock::new(CacheState::default())),
            hits: Arc::new(AtomicUsize::new(0)),
            misses: Arc::new(AtomicUsize::new(0)),
            enabled,
            max_entries: DEFAULT_MAX_ENTRIES,
            ttl: None,
        }
    }

    /// Create a cache from configuration
    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(config.enabled)
            .with_max_entries(config.max_entries)
            .with_ttl(config.ttl_secs.map(Duration::from_secs))
    }

    /// Set the maximum number of entries (at least one)
    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = max_entries.max(1);
        self
    }

    /// Set the entry lifetime
    pub fn with_ttl(mut self, ttl: Option<Duration>) -> Self {
        self.ttl = ttl;
        self
    }

    fn is_cacheable(text: &str) -> bool {
        !text.trim().is_empty()
    }

    fn is_expired(&self, entry: &CacheEntry) -> bool {
        self.ttl.is_some_and(|ttl| entry.inserted_at.elapsed() >= ttl)
    }

    /// Get a translation from the cache
    pub fn lookup(&self, source_text: &str, source_language: &str, target_language: &str) -> Option<String> {
        self.entry(source_text, source_language, target_language)
            .map(|entry| entry.translation)
    }

    /// Get the full cache entry, counting a hit or a miss
    pub fn entry(&self, source_text: &str, source_language: &str, target_language: &str) -> Option<CacheEntry> {
        if !self.enabled || !Self::is_cacheable(source_text) {
            return None;
        }

        let key = CacheKey::new(source_text, source_language, target_language);
        let found = self.state.read().entries.get(&key).cloned();

        match found {
            Some(entry) if !self.is_expired(&entry) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                debug!("Cache hit for '{}' ({} -> {})",
                       truncate_text(source_text, 30),
                       source_language,
                       target_language);
                Some(entry)
            }
            Some(_) => {
                if let Some(entry) = self.remove_if_expired(&key) {
                    self.hits.fetch_add(1, Ordering::Relaxed);
                    return Some(entry);
                }
                self.misses.fetch_add(1, Ordering::Relaxed);
                debug!("Cache entry for '{}' expired", truncate_text(source_text, 30));
                None
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                debug!("Cache miss for '{}' ({} -> {})",
                       truncate_text(source_text, 30),
                       source_language,
                       target_language);
                None
            }
        }
    }

    /// Remove `key` if it is still expired under the write lock
    ///
    /// Returns the entry when an insert refreshed it after the read.
    fn remove_if_expired(&self, key: &CacheKey) -> Option<CacheEntry> {
        let mut state = self.state.write();
        let expired = match state.entries.get(key) {
            Some(current) if !self.is_expired(current) => return Some(current.clone()),
            Some(_) => true,
            None => false,
        };
        if expired {
            state.remove(key);
        }
        None
    }

    /// Store a translation in the cache
    ///
    /// Storing the same value twice is a no-op; a different value for an
    /// existing key replaces it. Blank source text is never stored.
    pub fn insert(&self, source_text: &str, source_language: &str, target_language: &str, translation: &str) {
        if !self.enabled || !Self::is_cacheable(source_text) {
            return;
        }

        let key = CacheKey::new(source_text, source_language, target_language);
        let mut state = self.state.write();

        if let Some(existing) = state.entries.get_mut(&key) {
            if existing.translation != translation {
                existing.translation = translation.to_string();
                existing.inserted_at = Instant::now();
                debug!("Replaced cached translation for '{}'", truncate_text(source_text, 30));
            }
            return;
        }

        while state.entries.len() >= self.max_entries {
            match state.order.pop_front() {
                Some(oldest) => {
                    state.entries.remove(&oldest);
                }
                None => break,
            }
        }

        state.order.push_back(key.clone());
        state.entries.insert(key, CacheEntry {
            translation: translation.to_string(),
            inserted_at: Instant::now(),
        });

        debug!("Cached translation for '{}' ({} -> {})",
               truncate_text(source_text, 30),
               source_language,
               target_language);
    }

    /// Remove every expired entry
    pub fn purge_expired(&self) -> usize {
        let Some(ttl) = self.ttl else {
            return 0;
        };

        let mut state = self.state.write();
        let before = state.entries.len();
        state.entries.retain(|_, entry| entry.inserted_at.elapsed() < ttl);
        let CacheState { entries, order } = &mut *state;
        order.retain(|key| entries.contains_key(key));

        before - state.entries.len()
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;

        let hit_rate = if total > 0 {
            hits as f64 / total as f64
        } else {
            0.0
        };

        CacheStats {
            hits,
            misses,
            entries: self.len(),
            hit_rate,
        }
    }

    /// Clear the cache
    pub fn clear(&self) {
        let mut state = self.state.write();
        state.entries.clear();
        state.order.clear();

        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);

        debug!("Translation cache cleared");
    }

    /// Get the number of entries in the cache
    pub fn len(&self) -> usize {
        self.state.read().entries.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.state.read().entries.is_empty()
    }

    /// Check if the cache is enabled
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Maximum number of entries kept
    pub fn max_entries(&self) -> usize {
        self.max_entries
    }
}

impl Default for TranslationCache {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Clone for TranslationCache {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            hits: self.hits.clone(),
            misses: self.misses.clone(),
            enabled: self.enabled,
            max_entries: self.max_entries,
            ttl: self.ttl,
        }
    }
}

/// Truncate text to a maximum number of characters with ellipsis
fn truncate_text(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
