/*!
 * Language pack registry.
 *
 * Tracks a `PackStatus` per ordered pair of supported languages. Queries are
 * pure reads of the current map; `check_all_statuses` refreshes every pair
 * through the pack source and may run concurrently with queries.
 */

use futures::stream::{self, StreamExt};
use log::{debug, info, warn};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use crate::app_config::Config;
use crate::language_utils;

use super::{InstalledPackSource, LanguagePair, PackStatus, PackStatusSource};

/// Number of pack source queries in flight during a refresh
const MAX_CONCURRENT_CHECKS: usize = 8;

/// Per-pair feasibility registry
#[derive(Debug)]
pub struct LanguagePackRegistry {
    /// Supported language codes, validated and deduplicated
    supported: Vec<String>,
    /// Installation subsystem
    source: Arc<dyn PackStatusSource>,
    /// Last known status per pair
    statuses: RwLock<HashMap<LanguagePair, PackStatus>>,
}

impl LanguagePackRegistry {
    /// Create a registry for the given languages
    ///
    /// Codes that are not valid ISO 639 codes are dropped with a warning.
    pub fn new<I, S>(supported: I, source: Arc<dyn PackStatusSource>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut languages: Vec<String> = Vec::new();
        for code in supported {
            let code: String = code.into();
            let code = code.trim().to_lowercase();
            if !language_utils::is_valid_language_code(&code) {
                warn!("Ignoring unknown language code '{}'", code);
                continue;
            }
            if !languages.contains(&code) {
                languages.push(code);
            }
        }

        Self {
            supported: languages,
            source,
            statuses: RwLock::new(HashMap::new()),
        }
    }

    /// Create a registry from configuration, backed by the downloaded-language list
    pub fn from_config(config: &Config) -> (Self, InstalledPackSource) {
        let source = InstalledPackSource::new(config.downloaded_languages.iter().cloned());
        let registry = Self::new(config.supported_languages.iter().cloned(), Arc::new(source.clone()));
        (registry, source)
    }

    /// Whether a code is one of the supported languages
    pub fn is_supported(&self, code: &str) -> bool {
        self.supported.iter().any(|supported| supported == code)
    }

    /// Supported language codes
    pub fn supported_languages(&self) -> &[String] {
        &self.supported
    }

    /// Every ordered pair of distinct supported languages
    pub fn supported_pairs(&self) -> Vec<LanguagePair> {
        let mut pairs = Vec::with_capacity(self.supported.len() * self.supported.len().saturating_sub(1));
        for source in &self.supported {
            for target in &self.supported {
                if source != target {
                    pairs.push(LanguagePair::new(source.clone(), target.clone()));
                }
            }
        }
        pairs
    }

    /// Whether text can currently be translated from `source` to `target`
    ///
    /// Never triggers a status check; unknown codes and unchecked pairs
    /// answer `false`.
    pub fn can_translate(&self, source: &str, target: &str) -> bool {
        self.status(source, target) == PackStatus::Available
    }

    /// Current status of a pair
    pub fn status(&self, source: &str, target: &str) -> PackStatus {
        let pair = LanguagePair::new(source, target);
        if pair.is_same_language() || !self.is_supported(source) || !self.is_supported(target) {
            return PackStatus::Unavailable;
        }

        self.statuses.read().get(&pair).copied().unwrap_or_default()
    }

    /// Snapshot of all known statuses
    pub fn pack_statuses(&self) -> HashMap<LanguagePair, PackStatus> {
        self.statuses.read().clone()
    }

    /// Override the status of a pair, e.g. after a pack download finishes
    pub fn set_status(&self, pair: LanguagePair, status: PackStatus) {
        debug!("Pack status for {} set to {}", pair, status);
        self.statuses.write().insert(pair, status);
    }

    /// Refresh the status of every supported pair
    pub async fn check_all_statuses(&self) {
        let pairs = self.supported_pairs();

        {
            let mut statuses = self.statuses.write();
            for pair in &pairs {
                statuses.insert(pair.clone(), PackStatus::Checking);
            }
        }

        info!("Checking language pack status for {} pairs", pairs.len());

        let results: Vec<(LanguagePair, PackStatus)> = stream::iter(pairs)
            .map(|pair| {
                let source = self.source.clone();
                async move {
                    let status = match source.status(&pair).await {
                        Ok(status) => status,
                        Err(e) => {
                            warn!("Pack status check for {} failed: {}", pair, e);
                            PackStatus::Unavailable
                        }
                    };
                    self.statuses.write().insert(pair.clone(), status);
                    (pair, status)
                }
            })
            .buffer_unordered(MAX_CONCURRENT_CHECKS)
            .collect()
            .await;

        let available = results
            .iter()
            .filter(|(_, status)| *status == PackStatus::Available)
            .count();
        info!("Language pack check complete: {}/{} pairs available", available, results.len());
    }
}
