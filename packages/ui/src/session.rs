//! Session lifecycle: who is signed in, how they signed in, and the single
//! place that writes the credential store.
//!
//! [`SessionProvider`] builds the platform credential store and the shared
//! [`api::ApiClient`], wires the client's eviction handler to a full app
//! reload, and hydrates the signed-in user when a stored token exists. Every
//! view reads the session through [`use_session`].

use std::sync::Arc;

use dioxus::prelude::*;

use api::{ApiClient, ApiError, User};
use store::{CredentialStore, IssuedVia, Session};

use crate::platform::reload_app;

/// Where the session currently stands, as rendered state.
#[derive(Clone, PartialEq)]
pub enum SessionState {
    /// A token is stored and the user record is being fetched.
    Resuming,
    SignedOut,
    SignedIn(User),
}

impl SessionState {
    pub fn user(&self) -> Option<&User> {
        match self {
            SessionState::SignedIn(user) => Some(user),
            _ => None,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.user().is_some_and(|user| user.is_admin)
    }
}

/// Handle every view uses to read the session and drive auth flows.
#[derive(Clone, Copy)]
pub struct SessionHandle {
    client: Signal<ApiClient>,
    state: Signal<SessionState>,
}

impl SessionHandle {
    pub fn client(&self) -> ApiClient {
        (self.client)()
    }

    pub fn state(&self) -> SessionState {
        (self.state)()
    }

    /// Legacy single-password sign-in.
    pub async fn login_password(&mut self, password: &str) -> Result<(), ApiError> {
        let client = self.client();
        let token = client.login_password(password).await?;
        self.adopt_token(token, IssuedVia::Password).await
    }

    /// Username/password sign-in.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<(), ApiError> {
        let client = self.client();
        let token = client.login(username, password).await?;
        self.adopt_token(token, IssuedVia::UsernamePassword).await
    }

    /// Create an account. Leaves the session signed out; callers chain a
    /// [`Self::login`] with the same credentials on success.
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        name: &str,
    ) -> Result<(), ApiError> {
        self.client().register(username, password, name).await
    }

    /// Store the fresh token, then resolve the user behind it.
    async fn adopt_token(&mut self, token: String, via: IssuedVia) -> Result<(), ApiError> {
        let client = self.client();
        client.store_session(&Session::new(token, via));
        match client.current_user().await {
            Ok(user) => {
                self.state.set(SessionState::SignedIn(user));
                Ok(())
            }
            Err(err) => {
                self.state.set(SessionState::SignedOut);
                Err(err)
            }
        }
    }

    /// Replace the cached user record, e.g. after a profile edit.
    pub fn refresh_user(&mut self, user: User) {
        self.state.set(SessionState::SignedIn(user));
    }

    /// Voluntary sign-out: drop the credential and restart from a clean slate.
    pub fn logout(&mut self) {
        self.client().clear_session();
        self.state.set(SessionState::SignedOut);
        reload_app();
    }
}

pub fn use_session() -> SessionHandle {
    use_context::<SessionHandle>()
}

fn platform_store() -> Arc<dyn CredentialStore + Send + Sync> {
    #[cfg(not(target_arch = "wasm32"))]
    {
        Arc::new(store::FileStore::in_data_dir())
    }
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        Arc::new(store::LocalStore)
    }
    #[cfg(all(target_arch = "wasm32", not(feature = "web")))]
    {
        Arc::new(store::MemoryStore::new())
    }
}

/// Owns the [`ApiClient`] and session state for the whole app.
#[component]
pub fn SessionProvider(base_url: String, children: Element) -> Element {
    let credentials = use_hook(platform_store);
    let has_stored_token = credentials.load().is_some();

    let client = use_signal({
        let credentials = credentials.clone();
        move || {
            ApiClient::new(base_url.clone(), credentials)
                .with_session_evicted_handler(reload_app)
        }
    });
    let state = use_signal(|| {
        if has_stored_token {
            SessionState::Resuming
        } else {
            SessionState::SignedOut
        }
    });

    let handle = use_context_provider(|| SessionHandle { client, state });

    // Resume a persisted session by re-fetching the user behind the token. A
    // rejected token goes through the eviction path inside the client.
    use_future(move || async move {
        let mut handle = handle;
        if !matches!(handle.state(), SessionState::Resuming) {
            return;
        }
        match handle.client().current_user().await {
            Ok(user) => handle.state.set(SessionState::SignedIn(user)),
            Err(err) => {
                tracing::warn!("could not resume session: {err}");
                handle.state.set(SessionState::SignedOut);
            }
        }
    });

    rsx! {
        {children}
    }
}
