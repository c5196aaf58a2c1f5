//! Sign-in page: username/password plus the legacy shared-password flow.

use dioxus::prelude::*;
use ui::components::{Button, ButtonVariant, Input};
use ui::{use_session, SessionState};

use crate::Route;

#[component]
pub fn Login() -> Element {
    let session = use_session();
    let nav = use_navigator();
    let mut username = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut legacy_password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    if matches!(session.state(), SessionState::SignedIn(_)) {
        nav.replace(Route::Recordings {});
    }

    let handle_login = move |evt: FormEvent| {
        evt.prevent_default();
        let mut session = session;
        spawn(async move {
            error.set(None);
            let u = username().trim().to_string();
            let p = password();
            if u.is_empty() || p.is_empty() {
                error.set(Some("Username and password are required".to_string()));
                return;
            }
            loading.set(true);
            match session.login(&u, &p).await {
                Ok(()) => {
                    nav.replace(Route::Recordings {});
                }
                Err(e) => {
                    loading.set(false);
                    error.set(Some(e.to_string()));
                }
            }
        });
    };

    let handle_legacy_login = move |evt: FormEvent| {
        evt.prevent_default();
        let mut session = session;
        spawn(async move {
            error.set(None);
            let p = legacy_password();
            if p.is_empty() {
                error.set(Some("Password is required".to_string()));
                return;
            }
            loading.set(true);
            match session.login_password(&p).await {
                Ok(()) => {
                    nav.replace(Route::Recordings {});
                }
                Err(e) => {
                    loading.set(false);
                    error.set(Some(e.to_string()));
                }
            }
        });
    };

    rsx! {
        div {
            class: "flex flex-col items-center justify-center min-h-screen p-8 bg-white",

            h1 {
                class: "mb-2 text-neutral-800 font-bold text-[1.75rem]",
                "CallVault"
            }

            p {
                class: "mb-8 text-neutral-600 text-[0.9375rem]",
                "Sign in to browse your call recordings"
            }

            form {
                onsubmit: handle_login,
                class: "flex flex-col gap-3 w-full max-w-[320px]",

                if let Some(err) = error() {
                    div {
                        class: "px-2.5 py-2.5 bg-red-50 border border-red-200 rounded text-red-600 text-[0.8125rem]",
                        "{err}"
                    }
                }

                Input {
                    class: "w-full",
                    r#type: "text",
                    placeholder: "Username",
                    value: username(),
                    oninput: move |evt: FormEvent| username.set(evt.value()),
                }

                Input {
                    class: "w-full",
                    r#type: "password",
                    placeholder: "Password",
                    value: password(),
                    oninput: move |evt: FormEvent| password.set(evt.value()),
                }

                Button {
                    variant: ButtonVariant::Primary,
                    class: "w-full text-[0.9375rem] font-medium",
                    r#type: "submit",
                    disabled: loading(),
                    if loading() { "Signing in..." } else { "Sign in" }
                }
            }

            div {
                class: "flex items-center gap-3 w-full max-w-[320px] my-6 text-neutral-400 text-xs",
                div { class: "flex-1 h-px bg-neutral-200" }
                "or use the team password"
                div { class: "flex-1 h-px bg-neutral-200" }
            }

            form {
                onsubmit: handle_legacy_login,
                class: "flex flex-col gap-3 w-full max-w-[320px]",

                Input {
                    class: "w-full",
                    r#type: "password",
                    placeholder: "Team password",
                    value: legacy_password(),
                    oninput: move |evt: FormEvent| legacy_password.set(evt.value()),
                }

                Button {
                    variant: ButtonVariant::Outline,
                    class: "w-full text-[0.9375rem] font-medium",
                    r#type: "submit",
                    disabled: loading(),
                    "Sign in with team password"
                }
            }

            p {
                class: "mt-8 text-neutral-600 text-[0.8125rem]",
                "No account? "
                Link {
                    to: Route::Register {},
                    class: "text-primary-600 hover:underline",
                    "Create one"
                }
            }
        }
    }
}
