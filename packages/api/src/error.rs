use thiserror::Error;

/// Every failure the client layer can surface.
///
/// The enum is `Clone + PartialEq` on purpose: polled-resource errors are held
/// inside cache entries and re-read by many subscribers, and tests compare
/// variants directly. Transport failures are therefore carried as strings
/// rather than as the underlying `reqwest::Error`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Malformed input rejected locally; no request was sent.
    #[error("{0}")]
    Validation(String),

    /// The server rejected the stored credential outside the login endpoints.
    /// The session has already been cleared by the time this is returned.
    #[error("session rejected by the server")]
    AuthRejected,

    /// Login or registration failed; the stored session (if any) is untouched
    /// and the message is meant for inline display next to the form.
    #[error("{0}")]
    AuthFailed(String),

    /// The server refused to create something that already exists,
    /// e.g. a second permission for the same group.
    #[error("{0}")]
    Duplicate(String),

    /// Any other non-success response.
    #[error("server error ({status}): {detail}")]
    Api { status: u16, detail: String },

    /// Network-level failure or an unreadable response body.
    #[error("request failed: {0}")]
    Transport(String),

    /// A binary/text payload fetch failed; surfaced only to the triggering
    /// action, never to the whole view.
    #[error("download failed: {0}")]
    Download(String),
}

impl ApiError {
    /// Re-tag a fetch failure as a download failure, keeping session eviction
    /// intact: an [`ApiError::AuthRejected`] must still propagate as itself.
    pub fn into_download(self) -> ApiError {
        match self {
            ApiError::AuthRejected => self,
            other => ApiError::Download(other.to_string()),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn into_download_preserves_auth_rejection() {
        assert_eq!(ApiError::AuthRejected.into_download(), ApiError::AuthRejected);
    }

    #[test]
    fn into_download_wraps_other_failures() {
        let err = ApiError::Api {
            status: 500,
            detail: "boom".into(),
        };
        match err.into_download() {
            ApiError::Download(msg) => assert!(msg.contains("boom")),
            other => panic!("expected Download, got {other:?}"),
        }
    }
}
