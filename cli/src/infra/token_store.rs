//! Process-local session token store.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::application::ports::{SessionTokenEntry, TokenStore};

/// `TokenStore` backed by a mutex-guarded map. Last writer wins.
#[derive(Debug, Default)]
pub struct InMemoryTokenStore {
    entries: Mutex<HashMap<String, SessionTokenEntry>>,
}

impl InMemoryTokenStore {
    fn entries(&self) -> MutexGuard<'_, HashMap<String, SessionTokenEntry>> {
        // A panic while holding the lock cannot leave a half-written entry.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TokenStore for InMemoryTokenStore {
    fn get(&self, identity: &str) -> Option<SessionTokenEntry> {
        self.entries().get(identity).cloned()
    }

    fn put(&self, entry: SessionTokenEntry) {
        self.entries().insert(entry.identity.clone(), entry);
    }
}
