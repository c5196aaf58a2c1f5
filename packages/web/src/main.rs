use dioxus::prelude::*;

use ui::{PollProvider, SessionProvider};
use views::{Admin, Login, RecordingDetail, Recordings, Register};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Root {},
    #[route("/login")]
    Login {},
    #[route("/register")]
    Register {},
    #[route("/recordings")]
    Recordings {},
    #[route("/recordings/:id")]
    RecordingDetail { id: i64 },
    #[route("/admin")]
    Admin {},
}

const FAVICON: Asset = asset!("/assets/favicon.ico");
const MAIN_CSS: Asset = asset!("/assets/main.css");
const TAILWIND_CSS: Asset = asset!("/assets/tailwind.css");

/// API server location, fixed at build time.
fn api_base_url() -> &'static str {
    option_env!("CALLVAULT_API_BASE").unwrap_or("http://localhost:8000")
}

fn main() {
    dioxus::logger::initialize_default();
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Link { rel: "icon", href: FAVICON }
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        document::Link { rel: "stylesheet", href: TAILWIND_CSS }
        SessionProvider {
            base_url: api_base_url().to_string(),
            PollProvider {
                Router::<Route> {}
            }
        }
    }
}

#[component]
fn Root() -> Element {
    let nav = use_navigator();
    use_effect(move || {
        nav.replace(Route::Recordings {});
    });
    rsx! {}
}
