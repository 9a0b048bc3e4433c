/*!
 * Translation orchestration.
 *
 * The orchestrator turns a list of recognized texts into a text→translation
 * mapping. Each call walks the same steps:
 *
 * - blank texts are dropped
 * - the source language is taken from the caller or detected per text
 * - the cache answers what it can
 * - the remaining texts are grouped per language pair and each group is
 *   dispatched as one sub-batch to the session registered for that pair
 * - successful translations are cached before they are returned
 *
 * A sub-batch is all-or-nothing: a session error or a result count that
 * does not match the request drops every text of that pair. Nothing in this
 * module returns an error to the caller; skipped and failed texts are simply
 * absent from the mapping and counted in the `BatchReport`.
 */

use futures::stream::{self, StreamExt};
use log::{debug, info, warn};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use crate::app_config::Config;
use crate::errors::SessionError;
use crate::packs::{LanguagePackRegistry, LanguagePair};
use crate::providers::{SessionHandle, SessionProvider};
use crate::recognition::RecognitionBuffer;

use super::cache::TranslationCache;
use super::detection::{LanguageDetector, ScriptDetector};
use super::session::SessionRegistry;

/// Default number of pair sub-batches dispatched at once
const DEFAULT_MAX_CONCURRENT_SESSIONS: usize = 4;

/// Per-call accounting of what happened to each input text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    /// Texts passed in
    pub received: usize,
    /// Empty or whitespace-only texts
    pub skipped_empty: usize,
    /// Repeats of a text already seen in the same call
    pub duplicates: usize,
    /// Texts whose language could not be detected
    pub skipped_undetected: usize,
    /// Texts already in the target language
    pub skipped_same_language: usize,
    /// Texts answered by the cache
    pub cache_hits: usize,
    /// Texts sent to a session
    pub dispatched: usize,
    /// Texts whose pair had no registered session
    pub skipped_no_session: usize,
    /// Dispatched texts lost to a failed sub-batch
    pub failed: usize,
    /// Texts translated by a session during this call
    pub translated: usize,
}

impl BatchReport {
    /// Texts present in the returned mapping
    pub fn resolved(&self) -> usize {
        self.cache_hits + self.translated
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} received, {} cached, {} translated, {} failed, skipped: {} empty, {} duplicate, {} undetected, {} same language, {} without session",
            self.received,
            self.cache_hits,
            self.translated,
            self.failed,
            self.skipped_empty,
            self.duplicates,
            self.skipped_undetected,
            self.skipped_same_language,
            self.skipped_no_session
        )
    }
}

/// Outcome of one pair's sub-batch
struct SubBatchOutcome {
    pair: LanguagePair,
    requested: usize,
    result: Result<Vec<(String, String)>, SessionError>,
}

/// Coordinates detection, caching and per-pair session dispatch
#[derive(Debug)]
pub struct TranslationOrchestrator {
    /// Pack feasibility, consulted when preparing sessions
    packs: Arc<LanguagePackRegistry>,

    /// Shared translation cache
    cache: TranslationCache,

    /// Registered sessions, one per pair
    sessions: SessionRegistry,

    /// Source language detection
    detector: Arc<dyn LanguageDetector>,

    /// Session factory used by `prepare_session`
    provider: Option<Arc<dyn SessionProvider>>,

    /// Maximum number of sub-batches in flight
    max_concurrent_sessions: usize,
}

impl TranslationOrchestrator {
    /// Create an orchestrator with script-based detection and no session provider
    pub fn new(packs: Arc<LanguagePackRegistry>, cache: TranslationCache) -> Self {
        Self {
            packs,
            cache,
            sessions: SessionRegistry::new(),
            detector: Arc::new(ScriptDetector::new()),
            provider: None,
            max_concurrent_sessions: DEFAULT_MAX_CONCURRENT_SESSIONS,
        }
    }

    /// Create an orchestrator from configuration
    pub fn from_config(config: &Config, packs: Arc<LanguagePackRegistry>) -> Self {
        Self::new(packs, TranslationCache::from_config(&config.cache))
            .with_max_concurrent_sessions(config.orchestrator.max_concurrent_sessions)
    }

    /// Use a different language detector
    pub fn with_detector(mut self, detector: Arc<dyn LanguageDetector>) -> Self {
        self.detector = detector;
        self
    }

    /// Set the provider used to build sessions
    pub fn with_provider(mut self, provider: Arc<dyn SessionProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Share an existing session registry
    pub fn with_session_registry(mut self, sessions: SessionRegistry) -> Self {
        self.sessions = sessions;
        self
    }

    /// Bound the number of sub-batches in flight (at least one)
    pub fn with_max_concurrent_sessions(mut self, max: usize) -> Self {
        self.max_concurrent_sessions = max.max(1);
        self
    }

    /// The translation cache
    pub fn cache(&self) -> &TranslationCache {
        &self.cache
    }

    /// The session registry
    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }

    /// The language pack registry
    pub fn packs(&self) -> &Arc<LanguagePackRegistry> {
        &self.packs
    }

    /// Best-effort language detection, `None` when not confident
    pub fn detect_language(&self, text: &str) -> Option<String> {
        if text.trim().is_empty() {
            return None;
        }
        self.detector.detect(text)
    }

    /// Register a session handle for a pair
    pub fn register_session(&self, handle: SessionHandle, source: &str, target: &str) -> bool {
        self.sessions.register(handle, source, target)
    }

    /// Make sure a session exists for a pair
    ///
    /// Returns `false` when the pair is not translatable, no provider is
    /// configured, or the provider fails to build the session. An already
    /// registered session is reused.
    pub async fn prepare_session(&self, source: &str, target: &str) -> bool {
        if !self.packs.can_translate(source, target) {
            debug!("Cannot prepare session {}->{}: pair not available", source, target);
            return false;
        }

        if self.sessions.contains(source, target) {
            return true;
        }

        let Some(provider) = &self.provider else {
            warn!("No session provider configured, cannot prepare {}->{}", source, target);
            return false;
        };

        let pair = LanguagePair::new(source, target);
        match provider.create_session(&pair).await {
            Ok(handle) => {
                self.sessions.register(handle, source, target);
                true
            }
            Err(e) => {
                warn!("Failed to create translation session for {}: {}", pair, e);
                false
            }
        }
    }

    /// Translate texts into `target`
    ///
    /// # Arguments
    /// * `texts` - Texts to translate, typically the detected OCR spans
    /// * `target` - Target language code
    /// * `source` - Source language code, detected per text when `None`
    ///
    /// # Returns
    /// * `HashMap<String, String>` - Translations for the texts that were
    ///   served from the cache or translated by a session
    pub async fn translate_texts<S: AsRef<str>>(
        &self,
        texts: &[S],
        target: &str,
        source: Option<&str>,
    ) -> HashMap<String, String> {
        self.translate_texts_with_report(texts, target, source).await.0
    }

    /// Translate texts into `target` and report what happened to each one
    pub async fn translate_texts_with_report<S: AsRef<str>>(
        &self,
        texts: &[S],
        target: &str,
        source: Option<&str>,
    ) -> (HashMap<String, String>, BatchReport) {
        let mut report = BatchReport {
            received: texts.len(),
            ..BatchReport::default()
        };
        let mut results: HashMap<String, String> = HashMap::new();
        let mut pending: HashMap<LanguagePair, Vec<String>> = HashMap::new();
        let mut seen: HashSet<&str> = HashSet::new();

        for text in texts {
            let text = text.as_ref();
            if text.trim().is_empty() {
                report.skipped_empty += 1;
                continue;
            }

            // Each distinct text is resolved once per call
            if !seen.insert(text) {
                report.duplicates += 1;
                continue;
            }

            let source_language = match source {
                Some(code) => code.to_string(),
                None => match self.detector.detect(text) {
                    Some(code) => code,
                    None => {
                        debug!("Could not detect language of '{}', skipping", text);
                        report.skipped_undetected += 1;
                        continue;
                    }
                },
            };

            let pair = LanguagePair::new(source_language, target);
            if pair.is_same_language() {
                report.skipped_same_language += 1;
                continue;
            }

            match self.cache.lookup(text, &pair.source, &pair.target) {
                Some(translation) => {
                    report.cache_hits += 1;
                    results.insert(text.to_string(), translation);
                }
                None => pending.entry(pair).or_default().push(text.to_string()),
            }
        }

        let mut jobs: Vec<(LanguagePair, Vec<String>, SessionHandle)> = Vec::new();
        for (pair, batch) in pending {
            match self.sessions.get(&pair.source, &pair.target) {
                Some(session) => {
                    report.dispatched += batch.len();
                    jobs.push((pair, batch, session));
                }
                None => {
                    warn!(
                        "No translation session registered for {}, skipping {} texts",
                        pair,
                        batch.len()
                    );
                    report.skipped_no_session += batch.len();
                }
            }
        }

        if !jobs.is_empty() {
            let outcomes: Vec<SubBatchOutcome> = stream::iter(jobs)
                .map(|(pair, batch, session)| {
                    let requested = batch.len();
                    // Spawned so an abandoned call still fills the cache
                    let task = tokio::spawn(dispatch_sub_batch(
                        session,
                        pair.clone(),
                        batch,
                        self.cache.clone(),
                    ));
                    async move {
                        let result = match task.await {
                            Ok(result) => result,
                            Err(e) => Err(SessionError::Unavailable(format!("dispatch task failed: {}", e))),
                        };
                        SubBatchOutcome { pair, requested, result }
                    }
                })
                .boxed()
                .buffer_unordered(self.max_concurrent_sessions)
                .collect()
                .await;

            for outcome in outcomes {
                match outcome.result {
                    Ok(translated) => {
                        report.translated += translated.len();
                        results.extend(translated);
                    }
                    Err(e) => {
                        warn!(
                            "Translation of {} texts for {} failed: {}",
                            outcome.requested, outcome.pair, e
                        );
                        report.failed += outcome.requested;
                    }
                }
            }
        }

        info!("Translated batch into {}: {}", target, report);
        (results, report)
    }

    /// Translate the detected spans currently held by a recognition buffer
    pub async fn translate_recognized(
        &self,
        buffer: &RecognitionBuffer,
        target: &str,
        source: Option<&str>,
    ) -> HashMap<String, String> {
        let texts = buffer.detected_texts();
        self.translate_texts(texts.as_slice(), target, source).await
    }
}

/// Send one pair's texts to its session and cache the results
async fn dispatch_sub_batch(
    session: SessionHandle,
    pair: LanguagePair,
    texts: Vec<String>,
    cache: TranslationCache,
) -> Result<Vec<(String, String)>, SessionError> {
    debug!("Dispatching {} texts to session {} ({})", texts.len(), session.id(), pair);
    let translations = session.translate_batch(&texts).await?;

    if translations.len() != texts.len() {
        return Err(SessionError::ResultCountMismatch {
            expected: texts.len(),
            actual: translations.len(),
        });
    }

    // Matching counts mean the whole sub-batch succeeded, empty values included
    let translated: Vec<(String, String)> = texts.into_iter().zip(translations).collect();
    for (text, translation) in &translated {
        cache.insert(text, &pair.source, &pair.target, translation);
    }

    Ok(translated)
}
