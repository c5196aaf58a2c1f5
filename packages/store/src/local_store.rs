//! # localStorage-backed credential store
//!
//! [`LocalStore`] keeps the session under a single `localStorage` key so it
//! survives page reloads. Tabs on the same origin share the key;
//! the last writer wins, which is the behavior the session layer expects.

use crate::session::Session;
use crate::CredentialStore;

const STORAGE_KEY: &str = "callvault.session";

/// Browser localStorage CredentialStore.
#[derive(Clone, Debug, Default)]
pub struct LocalStore;

impl LocalStore {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

impl CredentialStore for LocalStore {
    fn load(&self) -> Option<Session> {
        let raw = Self::storage()?.get_item(STORAGE_KEY).ok()??;
        serde_json::from_str(&raw).ok()
    }

    fn save(&self, session: &Session) {
        let Some(storage) = Self::storage() else {
            return;
        };
        if let Ok(raw) = serde_json::to_string(session) {
            let _ = storage.set_item(STORAGE_KEY, &raw);
        }
    }

    fn clear(&self) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(STORAGE_KEY);
        }
    }
}
