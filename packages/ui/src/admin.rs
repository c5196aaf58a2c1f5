//! Admin panel: user management and permission grants.
//!
//! This component is only mounted for admins, which is also what keeps the
//! admin-only resources out of the poll cache for everyone else. Every
//! mutation re-fetches the affected collection instead of patching local
//! state, so the panel always reflects what the server accepted.

use dioxus::prelude::*;

use api::{ApiError, Permission, User};

use crate::components::{Button, ButtonVariant, ErrorNotice, Input, Label};
use crate::poll::{keys, use_poll, use_poll_cache, PollOptions};
use crate::session::use_session;

#[component]
pub fn AdminPanel() -> Element {
    let session = use_session();

    let users = use_poll(Some(keys::USERS), PollOptions::once(), {
        let client = session.client();
        move || {
            let client = client.clone();
            async move { client.list_users().await }
        }
    });
    let groups = use_poll(Some(keys::GROUPS), PollOptions::once(), {
        let client = session.client();
        move || {
            let client = client.clone();
            async move { client.list_groups().await }
        }
    });

    let my_id = session.state().user().map(|user| user.id);

    rsx! {
        div {
            class: "bg-white border border-neutral-200 rounded-lg p-4",
            h2 { class: "m-0 mb-4 text-lg font-semibold text-neutral-800", "User management" }

            if let Some(error) = &users.error {
                div { class: "mb-4", ErrorNotice { message: error.to_string() } }
            }

            if let Some(list) = users.data.as_deref() {
                for user in list {
                    UserRow {
                        key: "{user.id}",
                        user: user.clone(),
                        groups: groups.data.as_deref().cloned().unwrap_or_default(),
                        is_self: Some(user.id) == my_id,
                    }
                }
            } else if users.is_loading {
                p { class: "text-sm text-neutral-500", "Loading users..." }
            }
        }
    }
}

#[component]
fn UserRow(user: User, groups: Vec<String>, is_self: bool) -> Element {
    let session = use_session();
    let cache = use_poll_cache();
    let mut error = use_signal(|| None::<String>);
    let mut busy = use_signal(|| false);

    let mut grant_group = use_signal(String::new);
    let mut grant_can_edit = use_signal(|| false);

    let run = {
        let cache = cache.clone();
        move |action: AdminAction| {
            if busy() {
                return;
            }
            busy.set(true);
            error.set(None);
            let client = session.client();
            let cache = cache.clone();
            spawn(async move {
                let result = match action {
                    AdminAction::SetAdmin(id, is_admin) => {
                        client.set_admin(id, is_admin).await.map(|_| ())
                    }
                    AdminAction::Grant {
                        user_id,
                        group,
                        can_edit,
                    } => client
                        .grant_permission(user_id, &group, can_edit)
                        .await
                        .map(|_| ()),
                    AdminAction::ToggleEdit(grant) => client
                        .update_permission(grant.id, &grant.group_name, !grant.can_edit)
                        .await
                        .map(|_| ()),
                    AdminAction::Revoke(id) => client.revoke_permission(id).await.map(|_| ()),
                };
                match result {
                    Ok(()) => {
                        cache.invalidate(keys::USERS);
                        cache.invalidate(keys::GROUPS);
                    }
                    // Duplicate grants get their own copy so the admin knows
                    // nothing is broken, just redundant.
                    Err(ApiError::Duplicate(_)) => {
                        error.set(Some("That user already has access to this group.".into()))
                    }
                    Err(err) => error.set(Some(err.to_string())),
                }
                busy.set(false);
            });
        }
    };

    let grant = {
        let mut run = run.clone();
        let user_id = user.id;
        move |_| {
            let group = grant_group().trim().to_string();
            if group.is_empty() {
                return;
            }
            run(AdminAction::Grant {
                user_id,
                group,
                can_edit: grant_can_edit(),
            });
            grant_group.set(String::new());
            grant_can_edit.set(false);
        }
    };

    let toggle_admin = {
        let mut run = run.clone();
        let id = user.id;
        let is_admin = user.is_admin;
        move |_| run(AdminAction::SetAdmin(id, !is_admin))
    };

    rsx! {
        div {
            class: "border-t border-neutral-100 py-3 first:border-t-0",
            div {
                class: "flex items-center justify-between",
                div {
                    span { class: "text-sm font-medium text-neutral-800", "{user.display_name()}" }
                    span { class: "text-xs text-neutral-500 ml-2", "@{user.username}" }
                    if user.is_admin {
                        span { class: "bg-amber-100 text-amber-800 rounded-full px-2 py-0.5 text-xs ml-2", "admin" }
                    }
                }
                if !is_self {
                    Button {
                        variant: ButtonVariant::Outline,
                        disabled: busy(),
                        onclick: toggle_admin,
                        if user.is_admin { "Demote" } else { "Make admin" }
                    }
                }
            }

            if let Some(message) = error() {
                div { class: "mt-2", ErrorNotice { message } }
            }

            if !user.permissions.is_empty() {
                div {
                    class: "flex flex-wrap gap-1.5 mt-2",
                    for grant in user.permissions.clone() {
                        GrantChip {
                            key: "{grant.id}",
                            grant: grant.clone(),
                            busy: busy(),
                            on_toggle_edit: {
                                let mut run = run.clone();
                                let grant = grant.clone();
                                move |_| run(AdminAction::ToggleEdit(grant.clone()))
                            },
                            on_revoke: {
                                let mut run = run.clone();
                                let id = grant.id;
                                move |_| run(AdminAction::Revoke(id))
                            },
                        }
                    }
                }
            }

            div {
                class: "flex items-end gap-2 mt-2",
                div {
                    Label { html_for: "grant-group-{user.id}", "Grant group" }
                    Input {
                        id: "grant-group-{user.id}",
                        class: "mt-1",
                        placeholder: "group name",
                        value: grant_group(),
                        oninput: move |evt: FormEvent| grant_group.set(evt.value()),
                    }
                }
                if !groups.is_empty() {
                    select {
                        class: "bg-white border border-neutral-300 rounded px-2 py-2 text-sm text-neutral-600",
                        onchange: move |evt| grant_group.set(evt.value()),
                        option { value: "", "known groups" }
                        for group in &groups {
                            option { key: "{group}", value: "{group}", "{group}" }
                        }
                    }
                }
                label {
                    class: "flex items-center gap-1 text-sm text-neutral-600 pb-2",
                    input {
                        r#type: "checkbox",
                        checked: grant_can_edit(),
                        onchange: move |evt: FormEvent| grant_can_edit.set(evt.checked()),
                    }
                    "can edit"
                }
                Button {
                    variant: ButtonVariant::Primary,
                    disabled: busy(),
                    onclick: grant,
                    "Grant"
                }
            }
        }
    }
}

#[derive(Clone)]
enum AdminAction {
    SetAdmin(i64, bool),
    Grant {
        user_id: i64,
        group: String,
        can_edit: bool,
    },
    ToggleEdit(Permission),
    Revoke(i64),
}

#[component]
fn GrantChip(
    grant: Permission,
    busy: bool,
    on_toggle_edit: EventHandler<()>,
    on_revoke: EventHandler<()>,
) -> Element {
    rsx! {
        span {
            class: "inline-flex items-center gap-1.5 bg-neutral-100 rounded-full pl-2.5 pr-1 py-0.5 text-xs text-neutral-700",
            "{grant.group_name}"
            button {
                class: "rounded-full px-1.5 py-0.5 cursor-pointer border-0 text-xs",
                class: if grant.can_edit { "bg-primary-100 text-primary-700" } else { "bg-neutral-200 text-neutral-500" },
                disabled: busy,
                title: "Toggle edit access",
                onclick: move |_| on_toggle_edit.call(()),
                "edit"
            }
            button {
                class: "rounded-full px-1.5 py-0.5 cursor-pointer border-0 text-xs bg-neutral-200 text-neutral-500 hover:bg-red-100 hover:text-red-700",
                disabled: busy,
                title: "Revoke access",
                onclick: move |_| on_revoke.call(()),
                "×"
            }
        }
    }
}
