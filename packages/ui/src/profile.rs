//! Profile dialog: identity, display name, grants, sign-out.

use dioxus::prelude::*;

use api::{Permission, User};

use crate::access::has_any_access;
use crate::components::{Button, ButtonVariant, Dialog, ErrorNotice, Input, Label};
use crate::poll::{keys, use_poll, use_poll_cache, PollOptions};
use crate::session::use_session;

#[component]
pub fn UserProfileDialog(on_dismiss: EventHandler<()>) -> Element {
    let mut session = use_session();
    let cache = use_poll_cache();

    let me = use_poll(Some(keys::ME), PollOptions::once(), {
        let client = session.client();
        move || {
            let client = client.clone();
            async move { client.current_user().await }
        }
    });
    let permissions = use_poll(Some(keys::MY_PERMISSIONS), PollOptions::once(), {
        let client = session.client();
        move || {
            let client = client.clone();
            async move { client.my_permissions().await }
        }
    });

    let mut name_draft = use_signal(|| None::<String>);
    let mut save_error = use_signal(|| None::<String>);
    let mut saving = use_signal(|| false);

    let user: Option<&User> = me.data.as_deref();

    let save_name = {
        let cache = cache.clone();
        move |_| {
            let Some(draft) = name_draft() else { return };
            let draft = draft.trim().to_string();
            if draft.is_empty() || saving() {
                return;
            }
            saving.set(true);
            save_error.set(None);
            let client = session.client();
            let cache = cache.clone();
            spawn(async move {
                match client.update_my_name(&draft).await {
                    Ok(user) => {
                        cache.invalidate(keys::ME);
                        session.refresh_user(user);
                        name_draft.set(None);
                    }
                    Err(err) => save_error.set(Some(err.to_string())),
                }
                saving.set(false);
            });
        }
    };

    rsx! {
        Dialog {
            on_dismiss,
            div {
                class: "p-6",
                h2 { class: "m-0 mb-5 text-lg font-semibold text-neutral-800", "Your profile" }

                if let Some(user) = user {
                    div {
                        class: "mb-4",
                        Label { html_for: "profile-username", "Username" }
                        p { id: "profile-username", class: "m-0 mt-1.5 text-sm text-neutral-600", "{user.username}" }
                    }

                    div {
                        class: "mb-4",
                        Label { html_for: "profile-name", "Display name" }
                        div {
                            class: "flex gap-2 mt-1.5",
                            Input {
                                id: "profile-name",
                                class: "flex-1",
                                value: name_draft().unwrap_or_else(|| user.display_name().to_string()),
                                oninput: move |evt: FormEvent| name_draft.set(Some(evt.value())),
                            }
                            Button {
                                variant: ButtonVariant::Primary,
                                disabled: saving() || name_draft().is_none(),
                                onclick: save_name,
                                "Save"
                            }
                        }
                    }

                    if let Some(error) = save_error() {
                        div { class: "mb-4", ErrorNotice { message: error } }
                    }

                    div {
                        class: "mb-4",
                        Label { html_for: "profile-groups", "Access" }
                        if user.is_admin {
                            p { class: "m-0 mt-1.5 text-sm text-neutral-600", "Administrator: access to all recordings." }
                        } else if let Some(grants) = permissions.data.as_deref() {
                            if grants.is_empty() {
                                p {
                                    class: "m-0 mt-1.5 text-sm text-neutral-500",
                                    "No recording groups yet. Ask an administrator for access."
                                }
                            } else {
                                div {
                                    id: "profile-groups",
                                    class: "flex flex-wrap gap-1.5 mt-1.5",
                                    for grant in grants {
                                        PermissionBadge { key: "{grant.id}", grant: grant.clone() }
                                    }
                                }
                            }
                        } else if !has_any_access(user) {
                            p {
                                class: "m-0 mt-1.5 text-sm text-neutral-500",
                                "No recording groups yet. Ask an administrator for access."
                            }
                        }
                    }
                } else if me.is_loading {
                    p { class: "text-sm text-neutral-500", "Loading profile..." }
                } else if let Some(error) = &me.error {
                    ErrorNotice { message: error.to_string() }
                }

                div {
                    class: "flex justify-between mt-5",
                    Button {
                        variant: ButtonVariant::Outline,
                        onclick: move |_| on_dismiss.call(()),
                        "Close"
                    }
                    Button {
                        variant: ButtonVariant::Danger,
                        onclick: move |_| session.logout(),
                        "Sign out"
                    }
                }
            }
        }
    }
}

#[component]
fn PermissionBadge(grant: Permission) -> Element {
    rsx! {
        span {
            class: "inline-flex items-center gap-1 bg-primary-50 text-primary-700 rounded-full px-2.5 py-0.5 text-xs",
            "{grant.group_name}"
            if grant.can_edit {
                span { class: "text-primary-500 font-medium", "edit" }
            }
        }
    }
}
