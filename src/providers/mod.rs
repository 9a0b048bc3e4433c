/*!
 * Translation session interfaces.
 *
 * A session is a stateful handle bound to exactly one language pair through
 * which batched translation requests are issued. Sessions are built by a
 * `SessionProvider` (the on-device translation framework in the app) and
 * registered with the orchestrator for reuse.
 */

use async_trait::async_trait;
use std::fmt::Debug;
use std::sync::Arc;

use crate::errors::SessionError;
use crate::packs::LanguagePair;

pub mod mock;

pub use mock::{MockBehavior, MockSession, MockSessionProvider};

/// Shared handle to a registered session
pub type SessionHandle = Arc<dyn TranslationSession>;

/// A translation channel bound to one language pair
#[async_trait]
pub trait TranslationSession: Send + Sync + Debug {
    /// Identifier used in logs
    fn id(&self) -> &str;

    /// The pair this session translates
    fn pair(&self) -> &LanguagePair;

    /// Translate a batch of texts
    ///
    /// # Arguments
    /// * `texts` - Texts in the session's source language
    ///
    /// # Returns
    /// * `Result<Vec<String>, SessionError>` - One translation per input, in input order
    async fn translate_batch(&self, texts: &[String]) -> Result<Vec<String>, SessionError>;
}

/// Builds sessions for validated language pairs
#[async_trait]
pub trait SessionProvider: Send + Sync + Debug {
    /// Create a session for a pair
    ///
    /// Construction may fail for unsupported pairs; callers treat a failure
    /// as "pair unavailable".
    async fn create_session(&self, pair: &LanguagePair) -> Result<SessionHandle, SessionError>;
}
