/*!
 * Tests for translation cache functionality
 */

use std::time::Duration;
use viewlingo::app_config::CacheConfig;
use viewlingo::translation::cache::TranslationCache;

#[test]
fn test_cache_new_withDisabled_shouldNeverStore() {
    let cache = TranslationCache::new(false);
    cache.insert("hello", "en", "fr", "bonjour");

    assert!(cache.lookup("hello", "en", "fr").is_none());
    assert!(cache.is_empty());
    assert!(!cache.is_enabled());
}

#[test]
fn test_cache_insert_withEnabledCache_shouldStoreTranslation() {
    let cache = TranslationCache::new(true);
    cache.insert("hello", "en", "fr", "bonjour");

    assert_eq!(cache.lookup("hello", "en", "fr"), Some("bonjour".to_string()));
}

#[test]
fn test_cache_lookup_withMissingKey_shouldReturnNone() {
    let cache = TranslationCache::new(true);
    assert!(cache.lookup("nonexistent", "en", "fr").is_none());
}

#[test]
fn test_cache_lookup_withDifferentLanguages_shouldReturnNone() {
    let cache = TranslationCache::new(true);
    cache.insert("hello", "en", "fr", "bonjour");

    assert!(cache.lookup("hello", "de", "fr").is_none());
    assert!(cache.lookup("hello", "en", "es").is_none());
}

#[test]
fn test_cache_lookup_shouldUseExactText() {
    let cache = TranslationCache::new(true);
    cache.insert("Hello", "en", "ko", "안녕하세요");

    assert!(cache.lookup("hello", "en", "ko").is_none());
    assert!(cache.lookup("Hello ", "en", "ko").is_none());
    assert!(cache.lookup("Hello", "en", "ko").is_some());
}

#[test]
fn test_cache_insert_withBlankText_shouldBeIgnored() {
    let cache = TranslationCache::new(true);
    cache.insert("", "en", "ko", "x");
    cache.insert("   \t", "en", "ko", "x");

    assert!(cache.is_empty());
    assert!(cache.lookup("", "en", "ko").is_none());
}

#[test]
fn test_cache_insert_sameValueTwice_shouldBeIdempotent() {
    let cache = TranslationCache::new(true);
    cache.insert("Cache test", "en", "ko", "캐시 테스트");
    let first = cache.entry("Cache test", "en", "ko").unwrap();

    cache.insert("Cache test", "en", "ko", "캐시 테스트");
    let second = cache.entry("Cache test", "en", "ko").unwrap();

    assert_eq!(cache.len(), 1);
    assert_eq!(first, second);
}

#[test]
fn test_cache_insert_differentValue_lastWriteShouldWin() {
    let cache = TranslationCache::new(true);
    cache.insert("Test", "en", "es", "Prueba");
    cache.insert("Test", "en", "es", "Examen");

    assert_eq!(cache.lookup("Test", "en", "es").as_deref(), Some("Examen"));
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_cache_atCapacity_shouldEvictOldestEntry() {
    let cache = TranslationCache::new(true).with_max_entries(2);
    cache.insert("one", "en", "es", "uno");
    cache.insert("two", "en", "es", "dos");
    cache.insert("three", "en", "es", "tres");

    assert_eq!(cache.len(), 2);
    assert!(cache.lookup("one", "en", "es").is_none());
    assert!(cache.lookup("two", "en", "es").is_some());
    assert!(cache.lookup("three", "en", "es").is_some());
}

#[test]
fn test_cache_withTtl_shouldExpireEntries() {
    let cache = TranslationCache::new(true).with_ttl(Some(Duration::from_millis(20)));
    cache.insert("Hello", "en", "es", "Hola");
    assert!(cache.lookup("Hello", "en", "es").is_some());

    std::thread::sleep(Duration::from_millis(40));
    assert!(cache.lookup("Hello", "en", "es").is_none());
    assert!(cache.is_empty());
}

#[test]
fn test_cache_purgeExpired_shouldRemoveOnlyStaleEntries() {
    let cache = TranslationCache::new(true).with_ttl(Some(Duration::from_millis(30)));
    cache.insert("old", "en", "es", "viejo");
    std::thread::sleep(Duration::from_millis(50));
    cache.insert("new", "en", "es", "nuevo");

    assert_eq!(cache.purge_expired(), 1);
    assert_eq!(cache.len(), 1);
    assert!(cache.lookup("new", "en", "es").is_some());
}

#[test]
fn test_cache_stats_shouldCountHitsAndMisses() {
    let cache = TranslationCache::new(true);
    cache.insert("hello", "en", "fr", "bonjour");

    cache.lookup("hello", "en", "fr");
    cache.lookup("hello", "en", "fr");
    cache.lookup("goodbye", "en", "fr");

    let stats = cache.stats();
    assert_eq!(stats.hits, 2);
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.entries, 1);
    assert!((stats.hit_rate - 2.0 / 3.0).abs() < 1e-9);

    cache.clear();
    let stats = cache.stats();
    assert_eq!(stats.hits, 0);
    assert_eq!(stats.entries, 0);
    assert_eq!(stats.hit_rate, 0.0);
}

#[test]
fn test_cache_clone_shouldShareStorage() {
    let cache = TranslationCache::new(true);
    let cloned = cache.clone();
    cloned.insert("World", "en", "es", "Mundo");

    assert_eq!(cache.lookup("World", "en", "es").as_deref(), Some("Mundo"));
}

#[test]
fn test_cache_fromConfig_shouldApplySettings() {
    let cache = TranslationCache::from_config(&CacheConfig {
        enabled: true,
        max_entries: 3,
        ttl_secs: None,
    });
    assert_eq!(cache.max_entries(), 3);
    assert!(cache.is_enabled());
}

#[tokio::test]
async fn test_cache_concurrentAccess_shouldNotLoseEntries() {
    let cache = TranslationCache::new(true);
    let mut handles = Vec::new();

    for worker in 0..8 {
        let cache = cache.clone();
        handles.push(tokio::spawn(async move {
            for i in 0..25 {
                let text = format!("text {} {}", worker, i);
                cache.insert(&text, "en", "ko", &format!("번역 {}", i));
                assert!(cache.lookup(&text, "en", "ko").is_some());
            }
        }));
    }

    for handle in handles {
        handle.await.unwrap();
    }
    assert_eq!(cache.len(), 200);
}
