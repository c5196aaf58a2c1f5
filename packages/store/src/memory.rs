use std::sync::{Arc, Mutex};

use crate::session::Session;
use crate::CredentialStore;

/// In-memory CredentialStore for testing and as a fallback when no persistent
/// storage is available.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    session: Arc<Mutex<Option<Session>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for MemoryStore {
    fn load(&self) -> Option<Session> {
        self.session.lock().ok()?.clone()
    }

    fn save(&self, session: &Session) {
        if let Ok(mut guard) = self.session.lock() {
            *guard = Some(session.clone());
        }
    }

    fn clear(&self) {
        if let Ok(mut guard) = self.session.lock() {
            *guard = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::IssuedVia;

    #[test]
    fn save_replaces_previous_session() {
        let store = MemoryStore::new();
        assert!(store.load().is_none());

        store.save(&Session::new("first", IssuedVia::Password));
        store.save(&Session::new("second", IssuedVia::UsernamePassword));

        let loaded = store.load().unwrap();
        assert_eq!(loaded.token, "second");
        assert_eq!(loaded.issued_via, IssuedVia::UsernamePassword);
    }

    #[test]
    fn clear_removes_session() {
        let store = MemoryStore::new();
        store.save(&Session::new("tok", IssuedVia::Password));
        store.clear();
        assert!(store.load().is_none());
    }

    #[test]
    fn clones_share_the_same_session() {
        let store = MemoryStore::new();
        let other = store.clone();
        store.save(&Session::new("shared", IssuedVia::Password));
        assert_eq!(other.load().unwrap().token, "shared");
    }
}
