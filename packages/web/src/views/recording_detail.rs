//! Full-page view of a single recording with the complete transcript.

use dioxus::prelude::*;

use ui::components::{Button, ButtonVariant, ErrorNotice};
use ui::{use_session, RecordingCard};

use crate::views::require_session;
use crate::Route;

#[component]
pub fn RecordingDetail(id: i64) -> Element {
    match require_session() {
        Some(_) => rsx! {
            RecordingDetailBody { id }
        },
        None => rsx! {},
    }
}

#[component]
fn RecordingDetailBody(id: i64) -> Element {
    let session = use_session();
    let nav = use_navigator();

    // A single recording is not a polled collection; one fetch on mount is
    // enough, and the card handles downloads and deletion itself.
    let recording = use_resource(move || {
        let client = session.client();
        async move { client.get_recording(id).await }
    });

    rsx! {
        div {
            class: "max-w-3xl mx-auto p-6",

            Button {
                variant: ButtonVariant::Outline,
                class: "mb-4".to_string(),
                onclick: move |_| {
                    nav.push(Route::Recordings {});
                },
                "Back to recordings"
            }

            match recording() {
                Some(Ok(recording)) => rsx! {
                    RecordingCard { recording }
                },
                Some(Err(err)) => rsx! {
                    ErrorNotice { message: err.to_string() }
                },
                None => rsx! {
                    p { class: "text-sm text-neutral-500", "Loading recording..." }
                },
            }
        }
    }
}
