//! # Filesystem-backed credential store
//!
//! [`FileStore`] persists the session as a single JSON file so the login
//! survives app restarts on desktop platforms.
//!
//! Use [`FileStore::in_data_dir`] to obtain a platform-appropriate location
//! via [`dirs::data_dir()`]:
//!
//! | Platform | Path |
//! |----------|------|
//! | macOS | `~/Library/Application Support/callvault/session.json` |
//! | Linux | `~/.local/share/callvault/session.json` |
//! | Windows | `C:\Users\<user>\AppData\Roaming\callvault\session.json` |

use std::path::PathBuf;

use crate::session::Session;
use crate::CredentialStore;

const SESSION_FILE: &str = "session.json";

/// Filesystem-backed CredentialStore for native targets.
#[derive(Clone, Debug)]
pub struct FileStore {
    base: PathBuf,
}

impl FileStore {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    /// Store under the platform data directory.
    pub fn in_data_dir() -> Self {
        let base = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("callvault");
        Self::new(base)
    }

    fn session_path(&self) -> PathBuf {
        self.base.join(SESSION_FILE)
    }
}

impl CredentialStore for FileStore {
    fn load(&self) -> Option<Session> {
        let raw = std::fs::read_to_string(self.session_path()).ok()?;
        serde_json::from_str(&raw).ok()
    }

    fn save(&self, session: &Session) {
        let path = self.session_path();
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        if let Ok(raw) = serde_json::to_string(session) {
            let _ = std::fs::write(path, raw);
        }
    }

    fn clear(&self) {
        let _ = std::fs::remove_file(self.session_path());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::IssuedVia;

    fn temp_store(tag: &str) -> (FileStore, PathBuf) {
        let dir = std::env::temp_dir().join(format!("callvault_test_{tag}_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        (FileStore::new(dir.clone()), dir)
    }

    #[test]
    fn roundtrip_across_reopen() {
        let (store, dir) = temp_store("roundtrip");
        store.save(&Session::new("persisted", IssuedVia::Password));

        // Re-open from the same directory.
        let store2 = FileStore::new(dir.clone());
        let loaded = store2.load().unwrap();
        assert_eq!(loaded.token, "persisted");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn clear_deletes_the_file() {
        let (store, dir) = temp_store("clear");
        store.save(&Session::new("tok", IssuedVia::UsernamePassword));
        store.clear();
        assert!(store.load().is_none());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn corrupt_file_reads_as_no_session() {
        let (store, dir) = temp_store("corrupt");
        let _ = std::fs::create_dir_all(&dir);
        let _ = std::fs::write(dir.join(SESSION_FILE), "not json");
        assert!(store.load().is_none());
        let _ = std::fs::remove_dir_all(&dir);
    }
}
