//! Per-user group permissions and the admin grant/update/revoke surface.
//!
//! Administrative mutations are request-then-invalidate, never optimistic:
//! every caller refreshes the affected cached collection after a success.
//! Granting a group the user already has comes back as
//! [`ApiError::Duplicate`] so the UI can show the specific message.

use serde::Serialize;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{DeleteResponse, Permission};

#[derive(Serialize)]
struct PermissionRequest<'a> {
    group_name: &'a str,
    can_edit: bool,
}

impl ApiClient {
    /// The signed-in user's grants (`GET /permissions/my`).
    pub async fn my_permissions(&self) -> Result<Vec<Permission>, ApiError> {
        self.get_json("/permissions/my").await
    }

    /// Admin: every group name seen across recordings (`GET /recordings/groups`).
    pub async fn list_groups(&self) -> Result<Vec<String>, ApiError> {
        self.get_json("/recordings/groups").await
    }

    /// Admin: grant a user access to a group (`POST /permissions/users/{id}`).
    pub async fn grant_permission(
        &self,
        user_id: i64,
        group_name: &str,
        can_edit: bool,
    ) -> Result<Permission, ApiError> {
        self.post_json(
            &format!("/permissions/users/{user_id}"),
            &PermissionRequest {
                group_name,
                can_edit,
            },
        )
        .await
    }

    /// Admin: rewrite an existing grant (`PUT /permissions/{id}`).
    pub async fn update_permission(
        &self,
        permission_id: i64,
        group_name: &str,
        can_edit: bool,
    ) -> Result<Permission, ApiError> {
        self.put_json(
            &format!("/permissions/{permission_id}"),
            &PermissionRequest {
                group_name,
                can_edit,
            },
        )
        .await
    }

    /// Admin: revoke a grant (`DELETE /permissions/{id}`).
    pub async fn revoke_permission(&self, permission_id: i64) -> Result<DeleteResponse, ApiError> {
        self.delete_json(&format!("/permissions/{permission_id}")).await
    }
}
