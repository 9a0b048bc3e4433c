/*!
 * Language pack feasibility tracking.
 *
 * A translation pair is only usable once the on-device packs for it are
 * installed. The installation subsystem is external; it is reached through
 * the `PackStatusSource` trait and its answers are cached per pair in the
 * `LanguagePackRegistry`.
 */

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};

use crate::errors::PackError;
use crate::language_utils;

pub mod registry;
pub mod source;

pub use registry::LanguagePackRegistry;
pub use source::InstalledPackSource;

/// Ordered (source, target) language code tuple
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LanguagePair {
    /// Source language code
    pub source: String,
    /// Target language code
    pub target: String,
}

impl LanguagePair {
    /// Create a new pair
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    /// Whether both sides name the same language, in any code form
    pub fn is_same_language(&self) -> bool {
        self.source == self.target || language_utils::language_codes_match(&self.source, &self.target)
    }
}

impl fmt::Display for LanguagePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.source, self.target)
    }
}

/// Installation status of the packs for a pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PackStatus {
    /// Never checked
    #[default]
    Unknown,
    /// A status refresh is running
    Checking,
    /// Packs are installed and the pair can be translated
    Available,
    /// Packs are missing or the pair is unsupported
    Unavailable,
}

impl fmt::Display for PackStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Unknown => "unknown",
            Self::Checking => "checking",
            Self::Available => "available",
            Self::Unavailable => "unavailable",
        };
        write!(f, "{}", label)
    }
}

/// The language pack installation subsystem
#[async_trait]
pub trait PackStatusSource: Send + Sync + Debug {
    /// Query the current status of the packs for a pair
    async fn status(&self, pair: &LanguagePair) -> Result<PackStatus, PackError>;
}
