mod login;
pub use login::Login;

mod register;
pub use register::Register;

mod recordings;
pub use recordings::Recordings;

mod recording_detail;
pub use recording_detail::RecordingDetail;

mod admin;
pub use admin::Admin;

use dioxus::prelude::*;
use ui::{use_session, SessionState};

use crate::Route;

/// Redirect to the login view unless a user is signed in. Returns the user
/// to render for, or `None` while redirecting or resuming.
pub(crate) fn require_session() -> Option<api::User> {
    let session = use_session();
    let nav = use_navigator();
    match session.state() {
        SessionState::SignedIn(user) => Some(user),
        SessionState::Resuming => None,
        SessionState::SignedOut => {
            nav.replace(Route::Login {});
            None
        }
    }
}
