//! Login and registration endpoints. All three are exempt from session
//! eviction, and none of them stores the returned token: the session
//! lifecycle controller owns credential writes.

use serde::Serialize;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{LoginResponse, TokenResponse};

#[derive(Serialize)]
struct LoginRequest<'a> {
    password: &'a str,
}

#[derive(Serialize)]
struct RegisterRequest<'a> {
    username: &'a str,
    password: &'a str,
    name: &'a str,
}

impl ApiClient {
    /// Legacy single-password login (`POST /login`). Returns the opaque token.
    pub async fn login_password(&self, password: &str) -> Result<String, ApiError> {
        let response: LoginResponse = self
            .post_json("/login", &LoginRequest { password })
            .await?;
        Ok(response.token)
    }

    /// Username/password login (`POST /token`, form-encoded). Returns the
    /// opaque access token.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, ApiError> {
        let response: TokenResponse = self
            .post_form("/token", &[("username", username), ("password", password)])
            .await?;
        Ok(response.access_token)
    }

    /// Create an account (`POST /register`). Succeeds without a session; the
    /// caller must log in afterwards.
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        name: &str,
    ) -> Result<(), ApiError> {
        let _: serde_json::Value = self
            .post_json(
                "/register",
                &RegisterRequest {
                    username,
                    password,
                    name,
                },
            )
            .await?;
        Ok(())
    }
}
