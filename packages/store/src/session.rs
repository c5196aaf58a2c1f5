use serde::{Deserialize, Serialize};

/// The single persisted credential: an opaque server-issued token plus the
/// auth scheme it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub issued_via: IssuedVia,
}

impl Session {
    pub fn new(token: impl Into<String>, issued_via: IssuedVia) -> Self {
        Self {
            token: token.into(),
            issued_via,
        }
    }
}

/// Which login flow produced the token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssuedVia {
    /// Legacy shared-password login (`POST /login`).
    Password,
    /// Per-user credentials (`POST /token`).
    UsernamePassword,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_roundtrips_as_json() {
        let session = Session::new("tok-123", IssuedVia::UsernamePassword);
        let json = serde_json::to_string(&session).unwrap();
        assert!(json.contains("username_password"));
        let back: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(back, session);
    }
}
