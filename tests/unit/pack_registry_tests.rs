/*!
 * Tests for the language pack registry
 */

use std::sync::Arc;
use viewlingo::app_config::Config;
use viewlingo::packs::{InstalledPackSource, LanguagePackRegistry, LanguagePair, PackStatus};

use crate::common;

#[tokio::test]
async fn test_canTranslate_sameLanguage_shouldBeFalseForEverySupportedCode() {
    let registry = common::registry_with(&["en", "ko", "ja", "es"]);
    registry.check_all_statuses().await;

    for code in registry.supported_languages() {
        assert!(!registry.can_translate(code, code));
    }
}

#[tokio::test]
async fn test_canTranslate_withUnsupportedTarget_shouldBeFalse() {
    let registry = common::registry_with(&["en", "ko"]);
    registry.check_all_statuses().await;

    for unsupported in ["xyz", "fr", "", "english"] {
        assert!(!registry.can_translate("en", unsupported));
    }
    assert!(registry.can_translate("en", "ko"));
}

#[tokio::test]
async fn test_fromConfig_shouldFollowDownloadedLanguages() {
    let config = Config::default();
    let (registry, installed) = LanguagePackRegistry::from_config(&config);
    registry.check_all_statuses().await;

    // zh is supported but not downloaded by default
    assert!(registry.can_translate("en", "ko"));
    assert!(!registry.can_translate("en", "zh"));
    assert_eq!(registry.status("zh", "en"), PackStatus::Unavailable);

    installed.mark_language_downloaded("zh");
    registry.check_all_statuses().await;
    assert!(registry.can_translate("en", "zh"));
}

#[tokio::test]
async fn test_removeLanguage_thenRefresh_shouldMakePairsUnavailable() {
    let installed = InstalledPackSource::new(["en", "ko", "ja"]);
    let registry = LanguagePackRegistry::new(["en", "ko", "ja"], Arc::new(installed.clone()));
    registry.check_all_statuses().await;
    assert!(registry.can_translate("ja", "en"));

    installed.remove_language("ja");
    assert!(!installed.is_language_downloaded("ja"));

    // Statuses stay stale until the next refresh
    assert!(registry.can_translate("ja", "en"));
    registry.check_all_statuses().await;
    assert!(!registry.can_translate("ja", "en"));
    assert!(registry.can_translate("ko", "en"));
}

#[tokio::test]
async fn test_packStatuses_afterRefresh_shouldCoverEveryOrderedPair() {
    let registry = common::registry_with(&["en", "ko", "ja"]);
    registry.check_all_statuses().await;

    let statuses = registry.pack_statuses();
    assert_eq!(statuses.len(), 6);
    assert_eq!(statuses.get(&LanguagePair::new("ko", "ja")), Some(&PackStatus::Available));
    assert!(!statuses.contains_key(&LanguagePair::new("en", "en")));
}
