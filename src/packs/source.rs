/*!
 * In-memory pack status source backed by a set of downloaded languages.
 */

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashSet;
use std::sync::Arc;

use crate::errors::PackError;

use super::{LanguagePair, PackStatus, PackStatusSource};

/// Pack source that treats a pair as available when both languages are downloaded
#[derive(Debug, Clone, Default)]
pub struct InstalledPackSource {
    downloaded: Arc<RwLock<HashSet<String>>>,
}

impl InstalledPackSource {
    /// Create a source with the given downloaded languages
    pub fn new<I, S>(languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            downloaded: Arc::new(RwLock::new(languages.into_iter().map(Into::into).collect())),
        }
    }

    /// Whether the pack for a language is installed
    pub fn is_language_downloaded(&self, language: &str) -> bool {
        self.downloaded.read().contains(language)
    }

    /// Record a finished pack download
    pub fn mark_language_downloaded(&self, language: &str) {
        self.downloaded.write().insert(language.to_string());
    }

    /// Record a pack removal
    pub fn remove_language(&self, language: &str) {
        self.downloaded.write().remove(language);
    }
}

#[async_trait]
impl PackStatusSource for InstalledPackSource {
    async fn status(&self, pair: &LanguagePair) -> Result<PackStatus, PackError> {
        let downloaded = self.downloaded.read();
        if downloaded.contains(&pair.source) && downloaded.contains(&pair.target) {
            Ok(PackStatus::Available)
        } else {
            Ok(PackStatus::Unavailable)
        }
    }
}
