//! This crate contains all shared UI for the workspace: the session and
//! polling infrastructure plus the components every shell renders.

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub mod components;

mod platform;

pub mod poll;
pub use poll::{keys, use_poll, use_poll_cache, PollCache, PollOptions, PollProvider, PollState};

mod session;
pub use session::{use_session, SessionHandle, SessionProvider, SessionState};

mod access;
pub use access::{has_any_access, recordings_placeholder, AccessMode, RecordingsPlaceholder};

mod status;
pub use status::{status_copy, StatusPill};

mod record_call;
pub use record_call::{RecordCallDialog, RecordCallForm};

mod download;
pub use download::save_file;

mod recording_card;
pub use recording_card::RecordingCard;

mod profile;
pub use profile::UserProfileDialog;

mod admin;
pub use admin::AdminPanel;
