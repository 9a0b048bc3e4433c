/*!
 * Integration tests for translation orchestration
 */

use std::sync::Arc;
use std::time::{Duration, Instant};

use viewlingo::packs::LanguagePair;
use viewlingo::providers::{MockBehavior, MockSession, MockSessionProvider};
use viewlingo::translation::{TranslationCache, TranslationOrchestrator};

use crate::common;

#[tokio::test]
async fn test_translateTexts_japaneseScenario_shouldTranslateAllThree() {
    let orchestrator = common::orchestrator();
    common::register_working(&orchestrator, "en", "ja");

    let texts = common::texts(&["Good morning", "How are you?", "Thank you"]);
    let result = orchestrator.translate_texts(&texts, "ja", Some("en")).await;

    assert_eq!(result.len(), 3);
    assert_eq!(result["Good morning"], "おはようございます");
    for (text, translation) in &result {
        assert!(!translation.is_empty());
        assert_ne!(text, translation);
    }
}

#[tokio::test]
async fn test_translateTexts_withPrepopulatedCache_shouldNeverInvokeSession() {
    let orchestrator = common::orchestrator();
    orchestrator.cache().insert("Cache test", "en", "ko", "캐시 테스트");
    let session = common::register_working(&orchestrator, "en", "ko");

    let result = orchestrator.translate_texts(&["Cache test"], "ko", Some("en")).await;

    assert_eq!(result["Cache test"], "캐시 테스트");
    assert_eq!(session.call_count(), 0);
}

#[tokio::test]
async fn test_translateTexts_withEmpties_shouldReturnAtMostNonEmptyCount() {
    let orchestrator = common::orchestrator();
    common::register_working(&orchestrator, "en", "es");

    let texts = common::texts(&["Hello", "", "World", "   ", "Welcome", "\t\n"]);
    let (result, report) = orchestrator.translate_texts_with_report(&texts, "es", Some("en")).await;

    assert!(result.len() <= texts.len() - 3);
    assert_eq!(result.len(), 3);
    assert_eq!(report.received, 6);
    assert_eq!(report.skipped_empty, 3);
    assert_eq!(report.resolved(), 3);
}

#[tokio::test]
async fn test_translateTexts_withNoSession_shouldReturnEmptyMapping() {
    let orchestrator = common::orchestrator();
    let result = orchestrator
        .translate_texts(&["Hello", "World"], "ko", Some("en"))
        .await;
    assert!(result.is_empty());
}

#[tokio::test]
async fn test_translateTexts_repeated_shouldBeIdenticalAndFaster() {
    let orchestrator = common::orchestrator();
    let session = Arc::new(MockSession::slow("en", "ko", 30));
    orchestrator.register_session(session.clone(), "en", "ko");

    let start = Instant::now();
    let first = orchestrator.translate_texts(&["Welcome to ViewLingo"], "ko", Some("en")).await;
    let miss = start.elapsed();

    let start = Instant::now();
    let second = orchestrator.translate_texts(&["Welcome to ViewLingo"], "ko", Some("en")).await;
    let hit = start.elapsed();

    assert_eq!(first, second);
    assert!(hit < miss);
    assert_eq!(session.call_count(), 1);
}

#[tokio::test]
async fn test_translateTexts_mixedPairs_shouldIsolateFailures() {
    let orchestrator = common::orchestrator();
    common::register_working(&orchestrator, "ko", "en");
    orchestrator.register_session(Arc::new(MockSession::failing("ja", "en")), "ja", "en");

    let (result, report) = orchestrator
        .translate_texts_with_report(&["안녕하세요", "こんにちは", "ありがとう"], "en", None)
        .await;

    assert_eq!(result.len(), 1);
    assert_eq!(result["안녕하세요"], "Hello");
    assert_eq!(report.dispatched, 3);
    assert_eq!(report.failed, 2);
    assert_eq!(report.translated, 1);
}

#[tokio::test]
async fn test_translateTexts_withSingleSessionSlot_shouldStillTranslateEveryPair() {
    let orchestrator = common::orchestrator().with_max_concurrent_sessions(1);
    for source in ["ko", "ja", "es"] {
        orchestrator.register_session(Arc::new(MockSession::slow(source, "en", 10)), source, "en");
    }

    let result = orchestrator
        .translate_texts(&["안녕하세요", "こんにちは", "Hola"], "en", None)
        .await;

    assert_eq!(result.len(), 3);
}

#[tokio::test]
async fn test_translateTexts_concurrentCallers_shouldAgreeOnTranslations() {
    let orchestrator = Arc::new(common::orchestrator());
    common::register_working(&orchestrator, "en", "es");

    let mut handles = Vec::new();
    for _ in 0..4 {
        let orchestrator = orchestrator.clone();
        handles.push(tokio::spawn(async move {
            orchestrator.translate_texts(&["Hello", "World"], "es", Some("en")).await
        }));
    }

    for handle in handles {
        let result = handle.await.unwrap();
        assert_eq!(result["Hello"], "Hola");
        assert_eq!(result["World"], "Mundo");
    }
    assert_eq!(orchestrator.cache().len(), 2);
}

#[tokio::test]
async fn test_translateTexts_abandonedByCaller_shouldStillPopulateCache() {
    let orchestrator = common::orchestrator();
    orchestrator.register_session(Arc::new(MockSession::slow("en", "ja", 80)), "en", "ja");

    let result = tokio::time::timeout(
        Duration::from_millis(10),
        orchestrator.translate_texts(&["Thank you"], "ja", Some("en")),
    )
    .await;
    assert!(result.is_err());

    tokio::time::sleep(Duration::from_millis(150)).await;
    assert_eq!(
        orchestrator.cache().lookup("Thank you", "en", "ja").as_deref(),
        Some("ありがとうございます")
    );
}

#[tokio::test]
async fn test_prepareSession_thenTranslate_shouldUseProviderSession() {
    let provider = MockSessionProvider::working();
    let orchestrator = common::orchestrator_from_default_config().with_provider(Arc::new(provider.clone()));
    orchestrator.packs().check_all_statuses().await;

    assert!(orchestrator.prepare_session("en", "ko").await);
    assert!(!orchestrator.prepare_session("en", "xyz").await);
    assert!(!orchestrator.prepare_session("ko", "ko").await);
    // zh packs are not downloaded by default
    assert!(!orchestrator.prepare_session("en", "zh").await);
    assert_eq!(provider.created_count(), 1);

    let result = orchestrator.translate_texts(&["Hello, world!"], "ko", Some("en")).await;
    assert_eq!(result["Hello, world!"], "안녕하세요, 세계!");
}

#[tokio::test]
async fn test_registerSession_replacingHandle_shouldUseLatestSession() {
    let orchestrator = common::orchestrator();
    let failing = MockSession::new(LanguagePair::new("en", "es"), MockBehavior::Failing);
    orchestrator.register_session(Arc::new(failing), "en", "es");
    assert!(orchestrator.translate_texts(&["Hello"], "es", Some("en")).await.is_empty());

    let working = common::register_working(&orchestrator, "en", "es");
    let result = orchestrator.translate_texts(&["Hello"], "es", Some("en")).await;

    assert_eq!(result["Hello"], "Hola");
    assert_eq!(working.call_count(), 1);
    assert_eq!(orchestrator.sessions().len(), 1);
}

#[tokio::test]
async fn test_translateTexts_withDisabledCache_shouldDispatchEveryCall() {
    let orchestrator = TranslationOrchestrator::new(
        common::registry_with(&["en", "es"]),
        TranslationCache::new(false),
    );
    let session = common::register_working(&orchestrator, "en", "es");

    orchestrator.translate_texts(&["Hello"], "es", Some("en")).await;
    orchestrator.translate_texts(&["Hello"], "es", Some("en")).await;

    assert_eq!(session.call_count(), 2);
}
