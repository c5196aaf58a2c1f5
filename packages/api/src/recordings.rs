//! Recordings collection and per-recording payloads.
//!
//! Audio and transcript downloads go through the authenticated transport
//! rather than plain anchor links: the resources require the auth headers, so
//! the bytes are fetched here and handed to a platform save helper by the UI.
//! Their failures are re-tagged as [`ApiError::Download`] so they surface only
//! at the triggering action, never as a view-wide error.

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{DeleteResponse, Recording};

impl ApiClient {
    /// All recordings the signed-in user may see (`GET /recordings/`).
    pub async fn list_recordings(&self) -> Result<Vec<Recording>, ApiError> {
        self.get_json("/recordings/").await
    }

    /// One recording with its full transcript (`GET /recordings/{id}`).
    pub async fn get_recording(&self, id: i64) -> Result<Recording, ApiError> {
        self.get_json(&format!("/recordings/{id}")).await
    }

    /// Delete a recording. The caller is responsible for invalidating the
    /// recordings cache key afterwards.
    pub async fn delete_recording(&self, id: i64) -> Result<DeleteResponse, ApiError> {
        self.delete_json(&format!("/recordings/{id}")).await
    }

    /// The recording's audio bytes (`GET /recordings/{id}/audio`).
    pub async fn download_audio(&self, id: i64) -> Result<Vec<u8>, ApiError> {
        self.get_bytes(&format!("/recordings/{id}/audio"))
            .await
            .map_err(ApiError::into_download)
    }

    /// The recording's transcript as plain text (`GET /recordings/{id}/transcript`).
    pub async fn download_transcript(&self, id: i64) -> Result<String, ApiError> {
        self.get_text(&format!("/recordings/{id}/transcript"))
            .await
            .map_err(ApiError::into_download)
    }
}
