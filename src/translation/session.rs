/*!
 * Registry of active translation sessions, one per language pair.
 */

use log::{debug, info};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use crate::packs::LanguagePair;
use crate::providers::{SessionHandle, TranslationSession};

/// Holds at most one session handle per language pair
///
/// The registry never creates sessions. Registering a handle for a pair
/// that already has one replaces the reference; the old handle is released
/// when its last owner drops it.
#[derive(Debug, Default, Clone)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<LanguagePair, SessionHandle>>>,
}

impl SessionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the handle for a pair, returning true if one was replaced
    pub fn register(&self, handle: SessionHandle, source: &str, target: &str) -> bool {
        let pair = LanguagePair::new(source, target);
        if handle.pair() != &pair {
            debug!(
                "Registering session {} built for {} under {}",
                handle.id(),
                handle.pair(),
                pair
            );
        }

        let previous = self.sessions.write().insert(pair.clone(), handle);
        match previous {
            Some(old) => {
                info!("Replaced translation session {} for {}", old.id(), pair);
                true
            }
            None => {
                info!("Registered translation session for {}", pair);
                false
            }
        }
    }

    /// Get the handle registered for a pair
    pub fn get(&self, source: &str, target: &str) -> Option<SessionHandle> {
        self.sessions
            .read()
            .get(&LanguagePair::new(source, target))
            .cloned()
    }

    /// Remove and return the handle for a pair
    pub fn remove(&self, source: &str, target: &str) -> Option<SessionHandle> {
        self.sessions.write().remove(&LanguagePair::new(source, target))
    }

    /// Whether a handle is registered for a pair
    pub fn contains(&self, source: &str, target: &str) -> bool {
        self.sessions.read().contains_key(&LanguagePair::new(source, target))
    }

    /// Pairs with a registered session
    pub fn pairs(&self) -> Vec<LanguagePair> {
        let mut pairs: Vec<LanguagePair> = self.sessions.read().keys().cloned().collect();
        pairs.sort();
        pairs
    }

    /// Drop every registered handle
    pub fn clear(&self) {
        let mut sessions = self.sessions.write();
        debug!("Tearing down {} translation sessions", sessions.len());
        sessions.clear();
    }

    /// Number of registered sessions
    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    /// Whether no session is registered
    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }
}
