//! # Authenticated transport
//!
//! One [`ApiClient`] is built at app start and injected into every consumer;
//! no component constructs its own HTTP client. Every outbound request is
//! augmented with the stored credential (as both the bearer header and the
//! legacy `x-token` header), and every non-success response goes through a
//! single classification point. A 401 anywhere outside the login endpoints
//! clears the credential store and fires the eviction handler, which the web
//! shell wires to a full page reload into the signed-out view. The login
//! endpoints themselves are exempt so a wrong password surfaces as an inline
//! error instead of a reload loop.

use std::sync::Arc;

use reqwest::{header, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use store::{CredentialStore, Session};

use crate::error::ApiError;

/// Header the pre-bearer auth scheme reads the raw token from. Sent alongside
/// `Authorization` on every request; the server may honor either.
pub const LEGACY_TOKEN_HEADER: &str = "x-token";

/// Entry points that must never evict the session on 401.
const AUTH_EXEMPT_PATHS: [&str; 3] = ["/login", "/token", "/register"];

/// Whether a 401 on `path` reports bad login input rather than a dead session.
pub fn is_auth_exempt(path: &str) -> bool {
    AUTH_EXEMPT_PATHS.contains(&path)
}

/// The single shared HTTP client for the CallVault API.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    credentials: Arc<dyn CredentialStore + Send + Sync>,
    on_session_evicted: Arc<dyn Fn() + Send + Sync>,
}

impl ApiClient {
    pub fn new(
        base_url: impl Into<String>,
        credentials: Arc<dyn CredentialStore + Send + Sync>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
            credentials,
            on_session_evicted: Arc::new(|| {}),
        }
    }

    /// Install the reaction to a rejected session. Runs after the credential
    /// store has been cleared.
    pub fn with_session_evicted_handler(
        mut self,
        handler: impl Fn() + Send + Sync + 'static,
    ) -> Self {
        self.on_session_evicted = Arc::new(handler);
        self
    }

    /// The currently stored token, if any.
    pub fn token(&self) -> Option<String> {
        self.credentials.load().map(|session| session.token)
    }

    /// Persist a freshly issued credential.
    pub fn store_session(&self, session: &Session) {
        self.credentials.save(session);
    }

    /// Drop the stored credential without firing the eviction handler. Used
    /// for voluntary sign-out; the transport path uses [`Self::evict_session`].
    pub fn clear_session(&self) {
        self.credentials.clear();
    }

    /// Drop the stored credential and notify the shell. Called by the
    /// transport itself on 401 and never by ordinary consumers.
    pub fn evict_session(&self) {
        tracing::warn!("session rejected by the server, clearing credential");
        self.credentials.clear();
        (self.on_session_evicted)();
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut builder = self.http.request(method, format!("{}{path}", self.base_url));
        if let Some(token) = self.token() {
            builder = builder
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .header(LEGACY_TOKEN_HEADER, token);
        }
        builder
    }

    /// Classify a non-success response, evicting the session when warranted.
    fn failure(&self, path: &str, status: StatusCode, detail: String) -> ApiError {
        if status == StatusCode::UNAUTHORIZED && !is_auth_exempt(path) {
            self.evict_session();
            return ApiError::AuthRejected;
        }
        if is_auth_exempt(path) && status.is_client_error() {
            return ApiError::AuthFailed(detail);
        }
        if status == StatusCode::CONFLICT || detail.to_lowercase().contains("already") {
            return ApiError::Duplicate(detail);
        }
        ApiError::Api {
            status: status.as_u16(),
            detail,
        }
    }

    async fn execute(&self, path: &str, builder: RequestBuilder) -> Result<Response, ApiError> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let detail = read_detail(response).await;
        tracing::debug!("{path} failed with {status}: {detail}");
        Err(self.failure(path, status, detail))
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.execute(path, self.request(Method::GET, path)).await?;
        Ok(response.json().await?)
    }

    pub(crate) async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let builder = self.request(Method::POST, path).json(body);
        let response = self.execute(path, builder).await?;
        Ok(response.json().await?)
    }

    pub(crate) async fn post_form<T: DeserializeOwned>(
        &self,
        path: &str,
        form: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let builder = self.request(Method::POST, path).form(form);
        let response = self.execute(path, builder).await?;
        Ok(response.json().await?)
    }

    pub(crate) async fn patch_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let builder = self.request(Method::PATCH, path).json(body);
        let response = self.execute(path, builder).await?;
        Ok(response.json().await?)
    }

    pub(crate) async fn put_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let builder = self.request(Method::PUT, path).json(body);
        let response = self.execute(path, builder).await?;
        Ok(response.json().await?)
    }

    pub(crate) async fn delete_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self
            .execute(path, self.request(Method::DELETE, path))
            .await?;
        Ok(response.json().await?)
    }

    pub(crate) async fn get_bytes(&self, path: &str) -> Result<Vec<u8>, ApiError> {
        let response = self.execute(path, self.request(Method::GET, path)).await?;
        Ok(response.bytes().await?.to_vec())
    }

    pub(crate) async fn get_text(&self, path: &str) -> Result<String, ApiError> {
        let response = self.execute(path, self.request(Method::GET, path)).await?;
        Ok(response.text().await?)
    }
}

/// Pull the FastAPI-style `{"detail": ...}` message out of an error body,
/// falling back to the status line when the body is not in that shape.
async fn read_detail(response: Response) -> String {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        detail: String,
    }

    let status = response.status();
    match response.json::<ErrorBody>().await {
        Ok(body) => body.detail,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use store::{IssuedVia, MemoryStore, Session};

    fn client_with_token(token: &str) -> (ApiClient, MemoryStore, Arc<AtomicBool>) {
        let store = MemoryStore::new();
        store.save(&Session::new(token, IssuedVia::UsernamePassword));
        let evicted = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&evicted);
        let client = ApiClient::new("http://localhost:8000", Arc::new(store.clone()))
            .with_session_evicted_handler(move || flag.store(true, Ordering::SeqCst));
        (client, store, evicted)
    }

    #[test]
    fn login_endpoints_are_exempt() {
        assert!(is_auth_exempt("/login"));
        assert!(is_auth_exempt("/token"));
        assert!(is_auth_exempt("/register"));
        assert!(!is_auth_exempt("/recordings/"));
        assert!(!is_auth_exempt("/users/me"));
    }

    #[test]
    fn both_auth_headers_carry_the_same_token() {
        let (client, _store, _evicted) = client_with_token("tok-abc");
        let request = client
            .request(Method::GET, "/recordings/")
            .build()
            .unwrap();

        let bearer = request.headers().get(header::AUTHORIZATION).unwrap();
        assert_eq!(bearer.to_str().unwrap(), "Bearer tok-abc");
        let legacy = request.headers().get(LEGACY_TOKEN_HEADER).unwrap();
        assert_eq!(legacy.to_str().unwrap(), "tok-abc");
    }

    #[test]
    fn unauthenticated_requests_carry_no_auth_headers() {
        let client = ApiClient::new("http://localhost:8000", Arc::new(MemoryStore::new()));
        let request = client.request(Method::GET, "/recorder_state").build().unwrap();
        assert!(request.headers().get(header::AUTHORIZATION).is_none());
        assert!(request.headers().get(LEGACY_TOKEN_HEADER).is_none());
    }

    #[test]
    fn unauthorized_outside_exempt_paths_evicts_the_session() {
        let (client, store, evicted) = client_with_token("stale");

        let err = client.failure(
            "/recordings/",
            StatusCode::UNAUTHORIZED,
            "Not authenticated".into(),
        );

        assert_eq!(err, ApiError::AuthRejected);
        assert!(store.load().is_none());
        assert!(evicted.load(Ordering::SeqCst));
    }

    #[test]
    fn unauthorized_on_token_endpoint_leaves_the_session_alone() {
        let (client, store, evicted) = client_with_token("still-good");

        let err = client.failure(
            "/token",
            StatusCode::UNAUTHORIZED,
            "Incorrect password".into(),
        );

        assert_eq!(err, ApiError::AuthFailed("Incorrect password".into()));
        assert_eq!(store.load().unwrap().token, "still-good");
        assert!(!evicted.load(Ordering::SeqCst));
    }

    #[test]
    fn duplicates_are_distinguished_from_generic_failures() {
        let (client, _store, _evicted) = client_with_token("tok");

        let err = client.failure(
            "/permissions/users/3",
            StatusCode::BAD_REQUEST,
            "Permission already exists for this group".into(),
        );
        assert!(matches!(err, ApiError::Duplicate(_)));

        let err = client.failure("/permissions/users/3", StatusCode::CONFLICT, "exists".into());
        assert!(matches!(err, ApiError::Duplicate(_)));

        let err = client.failure(
            "/permissions/users/3",
            StatusCode::NOT_FOUND,
            "User not found".into(),
        );
        assert!(matches!(err, ApiError::Api { status: 404, .. }));
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let client = ApiClient::new("http://localhost:8000/", Arc::new(MemoryStore::new()));
        let request = client.request(Method::GET, "/recordings/").build().unwrap();
        assert_eq!(request.url().as_str(), "http://localhost:8000/recordings/");
    }
}
