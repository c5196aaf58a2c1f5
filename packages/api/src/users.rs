//! Current-user profile plus the admin-only user management surface.

use serde::Serialize;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::User;

#[derive(Serialize)]
struct UpdateNameRequest<'a> {
    name: &'a str,
}

#[derive(Serialize)]
struct SetAdminRequest {
    is_admin: bool,
}

impl ApiClient {
    /// The signed-in user with their permissions (`GET /users/me`).
    pub async fn current_user(&self) -> Result<User, ApiError> {
        self.get_json("/users/me").await
    }

    /// Change the signed-in user's display name (`PATCH /users/me/name`).
    pub async fn update_my_name(&self, name: &str) -> Result<User, ApiError> {
        self.patch_json("/users/me/name", &UpdateNameRequest { name })
            .await
    }

    /// Admin: every registered user (`GET /users`).
    pub async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        self.get_json("/users").await
    }

    /// Admin: promote or demote a user (`PATCH /users/{id}/admin`).
    pub async fn set_admin(&self, user_id: i64, is_admin: bool) -> Result<User, ApiError> {
        self.patch_json(&format!("/users/{user_id}/admin"), &SetAdminRequest { is_admin })
            .await
    }
}
