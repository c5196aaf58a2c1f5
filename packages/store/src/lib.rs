pub mod session;

mod memory;
pub use memory::MemoryStore;

#[cfg(not(target_arch = "wasm32"))]
mod file_store;
#[cfg(not(target_arch = "wasm32"))]
pub use file_store::FileStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local_store;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local_store::LocalStore;

pub use session::{IssuedVia, Session};

/// Persistent home of the single session credential.
///
/// At most one [`Session`] is stored at a time: `save` replaces whatever was
/// there, and an absent session means the client is unauthenticated. No expiry
/// is tracked here; a stale token is only discovered when the server rejects
/// it. Concurrent tabs sharing the same backing storage observe last-writer-wins.
pub trait CredentialStore {
    fn load(&self) -> Option<Session>;
    fn save(&self, session: &Session);
    fn clear(&self);
}
