/*!
 * # ViewLingo - camera translation core
 *
 * A Rust library coordinating on-device translation of text recognized in
 * camera frames.
 *
 * ## Features
 *
 * - Throttled ingestion of text recognition results
 * - Language pack feasibility tracking per language pair
 * - Bounded translation cache with optional expiry
 * - One reusable translation session per language pair
 * - Batched, per-pair dispatch of uncached texts
 * - Best-effort source language detection
 * - ISO 639-1 and ISO 639-2 language code support
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `recognition`: Recognized spans and the throttled result buffer
 * - `packs`: Language pairs and pack availability
 * - `providers`: Translation session interfaces and mock sessions
 * - `translation`: Translation coordination:
 *   - `translation::cache`: Caching of translations
 *   - `translation::session`: Session registry
 *   - `translation::detection`: Language detection
 *   - `translation::orchestrator`: Batch orchestration
 * - `language_utils`: ISO language code utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod errors;
pub mod language_utils;
pub mod packs;
pub mod providers;
pub mod recognition;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use errors::{AppError, PackError, RecognitionError, SessionError};
pub use language_utils::{get_language_name, language_codes_match, normalize_to_part1};
pub use packs::{LanguagePackRegistry, LanguagePair, PackStatus};
pub use recognition::{RecognitionBuffer, RecognizedSpan};
pub use translation::{BatchReport, TranslationCache, TranslationOrchestrator};
