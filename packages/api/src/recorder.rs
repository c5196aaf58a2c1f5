//! Recorder status and recording requests.
//!
//! `start_recording` deliberately does not confirm anything beyond acceptance:
//! the bot's progress is observed only through subsequent `recorder_state`
//! polls, which are a different resource than the submission response.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{RecorderState, RecorderStatus};

/// Accepted meeting link shape: `https://meet.google.com/<meeting-code>`.
static MEET_URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^https://meet\.google\.com/[a-z0-9-]+$").unwrap());

/// Validate a Google Meet link locally. A mismatch is rejected before any
/// network call is made.
pub fn validate_meet_url(url: &str) -> Result<(), ApiError> {
    if MEET_URL_RE.is_match(url) {
        Ok(())
    } else {
        Err(ApiError::Validation(
            "Please enter a valid Google Meet link".to_string(),
        ))
    }
}

#[derive(Serialize)]
struct StartRecordingRequest<'a> {
    meet_url: &'a str,
}

impl ApiClient {
    /// Current stage of the shared recorder bot (`GET /recorder_state`).
    pub async fn recorder_state(&self) -> Result<RecorderState, ApiError> {
        let status: RecorderStatus = self.get_json("/recorder_state").await?;
        if let Some(error) = &status.error {
            tracing::warn!("recorder reported an error: {error}");
        }
        Ok(RecorderState::from_label(&status.state))
    }

    /// Ask the bot to join and record a call (`POST /start_recording`).
    ///
    /// The link is validated locally first; on success the request is merely
    /// accepted, not confirmed.
    pub async fn start_recording(&self, meet_url: &str) -> Result<(), ApiError> {
        validate_meet_url(meet_url)?;
        let _: serde_json::Value = self
            .post_json("/start_recording", &StartRecordingRequest { meet_url })
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_formed_meet_links_pass() {
        assert!(validate_meet_url("https://meet.google.com/abc-defg-hij").is_ok());
        assert!(validate_meet_url("https://meet.google.com/abc").is_ok());
        // Scheme and host are matched case-insensitively, like the original.
        assert!(validate_meet_url("HTTPS://MEET.GOOGLE.COM/ABC-DEFG").is_ok());
    }

    #[test]
    fn wrong_scheme_is_rejected() {
        let err = validate_meet_url("http://meet.google.com/abc").unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn foreign_hosts_are_rejected() {
        assert!(validate_meet_url("https://zoom.us/j/123").is_err());
        assert!(validate_meet_url("https://meet.google.com.evil.example/abc").is_err());
    }

    #[test]
    fn trailing_paths_and_queries_are_rejected() {
        assert!(validate_meet_url("https://meet.google.com/abc/extra").is_err());
        assert!(validate_meet_url("https://meet.google.com/abc?x=1").is_err());
        assert!(validate_meet_url("").is_err());
    }
}
