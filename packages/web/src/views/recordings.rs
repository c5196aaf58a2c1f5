//! Main view: the recordings list, refreshed every ten seconds.

use dioxus::prelude::*;

use api::User;
use ui::components::{Button, ButtonVariant, ErrorNotice};
use ui::{
    keys, recordings_placeholder, use_poll, use_session, PollOptions, RecordCallDialog,
    RecordingCard, RecordingsPlaceholder, UserProfileDialog,
};

use crate::views::require_session;
use crate::Route;

#[component]
pub fn Recordings() -> Element {
    // The signed-in body is mounted only once a user is known, so its poll
    // subscriptions never run unauthenticated.
    match require_session() {
        Some(user) => rsx! {
            RecordingsBody { user }
        },
        None => rsx! {},
    }
}

#[component]
fn RecordingsBody(user: User) -> Element {
    let session = use_session();
    let nav = use_navigator();
    let mut show_record_dialog = use_signal(|| false);
    let mut show_profile = use_signal(|| false);

    let recordings = use_poll(
        Some(keys::RECORDINGS),
        PollOptions::interval(keys::RECORDINGS_INTERVAL_MS),
        {
            let client = session.client();
            move || {
                let client = client.clone();
                async move { client.list_recordings().await }
            }
        },
    );

    let list = recordings.data.as_deref().cloned().unwrap_or_default();
    let placeholder = recordings_placeholder(&user, list.len());

    rsx! {
        div {
            class: "max-w-3xl mx-auto p-6",

            header {
                class: "flex items-center justify-between mb-6",
                h1 { class: "m-0 text-xl font-bold text-neutral-800", "CallVault" }
                div {
                    class: "flex gap-2",
                    if user.is_admin {
                        Button {
                            variant: ButtonVariant::Outline,
                            onclick: move |_| {
                                nav.push(Route::Admin {});
                            },
                            "Admin"
                        }
                    }
                    Button {
                        variant: ButtonVariant::Outline,
                        onclick: move |_| show_profile.set(true),
                        "{user.display_name()}"
                    }
                    Button {
                        variant: ButtonVariant::Primary,
                        onclick: move |_| show_record_dialog.set(true),
                        "Record a call"
                    }
                }
            }

            if let Some(error) = &recordings.error {
                div { class: "mb-4", ErrorNotice { message: error.to_string() } }
            }

            match placeholder {
                Some(RecordingsPlaceholder::NoAccess) => rsx! {
                    div {
                        class: "text-center py-16 text-neutral-500",
                        p { class: "text-base m-0", "You don't have access to any recordings yet." }
                        p { class: "text-sm mt-2", "Ask an administrator to grant you a recording group." }
                    }
                },
                Some(RecordingsPlaceholder::NoRecordings) => rsx! {
                    div {
                        class: "text-center py-16 text-neutral-500",
                        if recordings.is_loading {
                            p { class: "text-base m-0", "Loading recordings..." }
                        } else {
                            p { class: "text-base m-0", "No recordings yet." }
                            p { class: "text-sm mt-2", "Start one with the button above." }
                        }
                    }
                },
                None => rsx! {
                    div {
                        for recording in list {
                            RecordingCard { key: "{recording.id}", recording }
                        }
                    }
                },
            }

            if show_record_dialog() {
                RecordCallDialog { on_dismiss: move |_| show_record_dialog.set(false) }
            }
            if show_profile() {
                UserProfileDialog { on_dismiss: move |_| show_profile.set(false) }
            }
        }
    }
}
