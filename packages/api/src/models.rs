//! # Wire models
//!
//! Client-side projections of what the server sends. Everything here is
//! `Serialize + Deserialize + PartialEq` so it can live inside cache entries
//! and be compared in tests; fields the server only sometimes includes are
//! `Option` with a serde default so older payloads still deserialize.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A signed-in user as reported by `GET /users/me` (with permissions) or the
/// admin `GET /users` listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub permissions: Vec<Permission>,
}

impl User {
    /// Display name, falling back to the username if no name is set.
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => &self.username,
        }
    }
}

/// A (group, edit capability) grant held by one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    pub id: i64,
    pub group_name: String,
    pub can_edit: bool,
}

/// Where a recording came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordingSource {
    GoogleMeet,
    Slack,
}

impl RecordingSource {
    pub fn label(&self) -> &'static str {
        match self {
            RecordingSource::GoogleMeet => "Google Meet",
            RecordingSource::Slack => "Slack",
        }
    }
}

/// One diarized transcript segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    #[serde(default)]
    pub speaker: Option<String>,
    pub text: String,
}

/// A call participant with accumulated speaking time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Speaker {
    pub name: String,
    #[serde(default)]
    pub profile_pic: Option<String>,
    #[serde(default)]
    pub duration: f64,
}

/// A finished call recording. Created by the server-side recording pipeline;
/// the client only reads and deletes these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recording {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub source: RecordingSource,
    pub filename: String,
    #[serde(default)]
    pub transcript: Option<String>,
    #[serde(default)]
    pub diarized_transcript: Option<Vec<TranscriptSegment>>,
    #[serde(default)]
    pub speakers: Option<HashMap<String, Speaker>>,
    #[serde(default)]
    pub meeting_name: Option<String>,
    #[serde(default)]
    pub duration_seconds: Option<f64>,
}

impl Recording {
    /// Speakers sorted by speaking time, longest first.
    pub fn speakers_by_duration(&self) -> Vec<&Speaker> {
        let mut speakers: Vec<&Speaker> = self
            .speakers
            .as_ref()
            .map(|m| m.values().collect())
            .unwrap_or_default();
        speakers.sort_by(|a, b| b.duration.total_cmp(&a.duration));
        speakers
    }
}

/// Stage of the shared recorder bot, polled via `GET /recorder_state`.
///
/// This is the one authoritative enum for what the original UI checked with
/// scattered string comparisons. `ready` is the only stage that accepts a new
/// recording request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecorderState {
    Initializing,
    Ready,
    Waiting,
    Joining,
    Recording,
    Processing,
    Unavailable,
}

impl RecorderState {
    /// Map the server-reported status string onto the enum. Unknown strings
    /// degrade to [`RecorderState::Unavailable`] rather than erroring: an
    /// unrecognized stage means this client cannot offer the feature.
    pub fn from_label(label: &str) -> Self {
        match label {
            "initializing" => RecorderState::Initializing,
            "ready" => RecorderState::Ready,
            "waiting" => RecorderState::Waiting,
            "joining" => RecorderState::Joining,
            "recording" => RecorderState::Recording,
            "processing" => RecorderState::Processing,
            "unavailable" => RecorderState::Unavailable,
            other => {
                tracing::warn!("unknown recorder state {other:?}, treating as unavailable");
                RecorderState::Unavailable
            }
        }
    }

    /// Whether a new recording request may be submitted right now.
    pub fn accepts_submission(&self) -> bool {
        matches!(self, RecorderState::Ready)
    }
}

/// Raw `GET /recorder_state` payload. The optional `error` field is the only
/// place a request that failed after acceptance surfaces directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecorderStatus {
    pub state: String,
    #[serde(default)]
    pub error: Option<String>,
}

/// Generic `{"message": ...}` acknowledgement for deletes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub message: String,
}

/// `POST /login` response (legacy single-password flow).
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

/// `POST /token` response (username/password flow).
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_deserializes_from_server_payload() {
        let json = r#"{
            "id": 7,
            "created_at": "2024-03-05T14:30:00Z",
            "source": "google_meet",
            "filename": "meet_recording_20240305.wav",
            "transcript": "hello",
            "diarized_transcript": [
                {"speaker": "Alice", "text": "hello"},
                {"text": "hi there"}
            ],
            "speakers": {
                "Alice": {"name": "Alice", "profile_pic": "https://example.com/a.png", "duration": 42.5},
                "Bob": {"name": "Bob", "duration": 120.0}
            }
        }"#;
        let recording: Recording = serde_json::from_str(json).unwrap();
        assert_eq!(recording.source, RecordingSource::GoogleMeet);
        assert_eq!(recording.diarized_transcript.as_ref().unwrap().len(), 2);
        assert!(recording.meeting_name.is_none());

        let speakers = recording.speakers_by_duration();
        assert_eq!(speakers[0].name, "Bob");
        assert_eq!(speakers[1].name, "Alice");
    }

    #[test]
    fn minimal_recording_payload_still_deserializes() {
        let json = r#"{
            "id": 1,
            "created_at": "2024-01-01T00:00:00Z",
            "source": "slack",
            "filename": "huddle.wav"
        }"#;
        let recording: Recording = serde_json::from_str(json).unwrap();
        assert_eq!(recording.source.label(), "Slack");
        assert!(recording.transcript.is_none());
        assert!(recording.speakers_by_duration().is_empty());
    }

    #[test]
    fn user_display_name_falls_back_to_username() {
        let mut user: User = serde_json::from_str(
            r#"{"id": 1, "username": "alice", "is_admin": false}"#,
        )
        .unwrap();
        assert_eq!(user.display_name(), "alice");
        user.name = Some("Alice A.".into());
        assert_eq!(user.display_name(), "Alice A.");
        user.name = Some(String::new());
        assert_eq!(user.display_name(), "alice");
    }

    #[test]
    fn recorder_state_labels_map_onto_the_enum() {
        assert_eq!(RecorderState::from_label("ready"), RecorderState::Ready);
        assert_eq!(RecorderState::from_label("joining"), RecorderState::Joining);
        assert_eq!(
            RecorderState::from_label("totally-new-stage"),
            RecorderState::Unavailable
        );
        assert!(RecorderState::Ready.accepts_submission());
        assert!(!RecorderState::Processing.accepts_submission());
    }
}
