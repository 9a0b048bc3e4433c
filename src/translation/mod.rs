/*!
 * Translation coordination.
 *
 * This module turns recognized text into translations without ever asking a
 * session twice for the same thing. It is split into several submodules:
 *
 * - `cache`: Bounded translation cache keyed by text and language pair
 * - `session`: Registry of active sessions, one per language pair
 * - `detection`: Best-effort source language detection
 * - `orchestrator`: Filtering, cache lookup and per-pair dispatch
 */

// Re-export main types for easier usage
pub use self::cache::{CacheEntry, CacheStats, TranslationCache};
pub use self::detection::{LanguageDetector, ScriptDetector};
pub use self::orchestrator::{BatchReport, TranslationOrchestrator};
pub use self::session::SessionRegistry;

// Submodules
pub mod cache;
pub mod detection;
pub mod orchestrator;
pub mod session;
