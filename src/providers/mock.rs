/*!
 * Mock session implementations for testing.
 *
 * This module provides mock sessions that simulate different behaviors:
 * - `MockBehavior::Working` - Always succeeds with translated text
 * - `MockBehavior::Failing` - Always fails with an error
 * - `MockBehavior::Slow` - Succeeds after a delay
 * - `MockBehavior::Mismatched` - Returns one result too few
 */

use async_trait::async_trait;
use log::debug;
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::LazyLock;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use uuid::Uuid;

use crate::errors::SessionError;
use crate::packs::LanguagePair;

use super::{SessionHandle, SessionProvider, TranslationSession};

/// Known phrase translations per pair
static PHRASEBOOK: LazyLock<HashMap<&'static str, HashMap<&'static str, &'static str>>> =
    LazyLock::new(|| {
        let mut book = HashMap::new();
        book.insert(
            "en->es",
            HashMap::from([
                ("Hello", "Hola"),
                ("World", "Mundo"),
                ("Welcome", "Bienvenido"),
                ("Test", "Prueba"),
            ]),
        );
        book.insert(
            "en->ja",
            HashMap::from([
                ("Good morning", "おはようございます"),
                ("How are you?", "お元気ですか？"),
                ("Thank you", "ありがとうございます"),
            ]),
        );
        book.insert(
            "en->ko",
            HashMap::from([
                ("Hello, world!", "안녕하세요, 세계!"),
                ("Cache test", "캐시 테스트"),
                ("Welcome to ViewLingo", "ViewLingo에 오신 것을 환영합니다"),
            ]),
        );
        book.insert("ko->en", HashMap::from([("안녕하세요", "Hello")]));
        book
    });

/// Behavior mode for the mock session
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds with a proper translation
    Working,
    /// Always fails with an error
    Failing,
    /// Returns an empty string for every text
    Empty,
    /// Returns one translation fewer than requested
    Mismatched,
    /// Simulates a slow on-device model
    Slow { delay_ms: u64 },
}

/// Mock session for testing orchestration behavior
#[derive(Debug, Clone)]
pub struct MockSession {
    id: String,
    pair: LanguagePair,
    behavior: MockBehavior,
    /// Number of translate_batch calls, shared between clones
    calls: Arc<AtomicUsize>,
    /// Number of texts received, shared between clones
    texts_received: Arc<AtomicUsize>,
}

impl MockSession {
    /// Create a mock session for a pair
    pub fn new(pair: LanguagePair, behavior: MockBehavior) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            pair,
            behavior,
            calls: Arc::new(AtomicUsize::new(0)),
            texts_received: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a working session
    pub fn working(source: &str, target: &str) -> Self {
        Self::new(LanguagePair::new(source, target), MockBehavior::Working)
    }

    /// Create a session that always fails
    pub fn failing(source: &str, target: &str) -> Self {
        Self::new(LanguagePair::new(source, target), MockBehavior::Failing)
    }

    /// Create a session that answers after `delay_ms`
    pub fn slow(source: &str, target: &str, delay_ms: u64) -> Self {
        Self::new(LanguagePair::new(source, target), MockBehavior::Slow { delay_ms })
    }

    /// Number of batches dispatched to this session
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Number of texts received across all batches
    pub fn texts_received(&self) -> usize {
        self.texts_received.load(Ordering::SeqCst)
    }

    /// Translate one text using the phrasebook, falling back to a tagged copy
    pub fn translate_one(pair: &LanguagePair, text: &str) -> String {
        PHRASEBOOK
            .get(pair.to_string().as_str())
            .and_then(|phrases| phrases.get(text))
            .map(|translated| translated.to_string())
            .unwrap_or_else(|| format!("[{}] {}", pair.target, text))
    }
}

#[async_trait]
impl TranslationSession for MockSession {
    fn id(&self) -> &str {
        &self.id
    }

    fn pair(&self) -> &LanguagePair {
        &self.pair
    }

    async fn translate_batch(&self, texts: &[String]) -> Result<Vec<String>, SessionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.texts_received.fetch_add(texts.len(), Ordering::SeqCst);
        debug!("Mock session {} received {} texts", &self.id[..8], texts.len());

        match self.behavior {
            MockBehavior::Working => Ok(texts.iter().map(|t| Self::translate_one(&self.pair, t)).collect()),

            MockBehavior::Failing => Err(SessionError::TranslationFailed(
                "Simulated session failure".to_string(),
            )),

            MockBehavior::Empty => Ok(vec![String::new(); texts.len()]),

            MockBehavior::Mismatched => Ok(texts
                .iter()
                .skip(1)
                .map(|t| Self::translate_one(&self.pair, t))
                .collect()),

            MockBehavior::Slow { delay_ms } => {
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                Ok(texts.iter().map(|t| Self::translate_one(&self.pair, t)).collect())
            }
        }
    }
}

/// Mock provider building `MockSession`s
#[derive(Debug, Clone)]
pub struct MockSessionProvider {
    behavior: MockBehavior,
    /// Pairs the provider refuses to build
    rejected: Arc<RwLock<HashSet<LanguagePair>>>,
    /// Number of sessions created, shared between clones
    created: Arc<AtomicUsize>,
}

impl MockSessionProvider {
    /// Create a provider whose sessions use `behavior`
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            rejected: Arc::new(RwLock::new(HashSet::new())),
            created: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a provider building working sessions
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Refuse to build sessions for a pair
    pub fn reject(self, source: &str, target: &str) -> Self {
        self.rejected.write().insert(LanguagePair::new(source, target));
        self
    }

    /// Number of sessions built so far
    pub fn created_count(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }
}

impl Default for MockSessionProvider {
    fn default() -> Self {
        Self::working()
    }
}

#[async_trait]
impl SessionProvider for MockSessionProvider {
    async fn create_session(&self, pair: &LanguagePair) -> Result<SessionHandle, SessionError> {
        if pair.is_same_language() || self.rejected.read().contains(pair) {
            return Err(SessionError::UnsupportedPair {
                source_language: pair.source.clone(),
                target_language: pair.target.clone(),
            });
        }

        self.created.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(MockSession::new(pair.clone(), self.behavior)))
    }
}
