use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};

use crate::routes::Route;

/// Shown on pages that need a session while nobody is signed in.
#[component]
pub fn SignInRequired() -> Element {
    let navigator = use_navigator();
    use_effect(move || {
        let _ = navigator.replace(Route::Login {});
    });

    rsx! {
        div { class: "page",
            p { "Please sign in to continue." }
            Link { to: Route::Login {}, "Sign in" }
        }
    }
}
