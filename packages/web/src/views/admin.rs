//! Admin-only page. Non-admins are bounced back to the recordings list
//! before the admin panel (and its subscriptions) ever mounts.

use dioxus::prelude::*;

use ui::components::{Button, ButtonVariant};
use ui::AdminPanel;

use crate::views::require_session;
use crate::Route;

#[component]
pub fn Admin() -> Element {
    let nav = use_navigator();
    match require_session() {
        Some(user) if user.is_admin => rsx! {
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
                AdminPanel {}
            }
        },
        Some(_) => {
            nav.replace(Route::Recordings {});
            rsx! {}
        }
        None => rsx! {},
    }
}
