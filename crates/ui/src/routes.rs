use dioxus::prelude::*;
use dioxus_router::{Outlet, Routable, use_navigator, use_route};

use crate::context::{AppContext, AppState};
use crate::views::{AuthView, Header, LearnView, ProgressView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", LearnView)] Learn {},
        #[route("/progress", ProgressView)] Progress {},
        #[route("/login", AuthView)] Login {},
}

#[component]
fn Layout() -> Element {
    let ctx = use_context::<AppContext>();
    let state = use_context::<AppState>();
    let navigator = use_navigator();
    let route = use_route::<Route>();

    let username = state
        .session
        .read()
        .as_ref()
        .map(|session| session.user().username.clone());
    let stats = *state.live_stats.read();

    let on_logout = move |()| {
        let ctx = ctx.clone();
        spawn(async move {
            if let Some(auth) = ctx.auth() {
                if let Err(err) = auth.logout().await {
                    log::warn!("logout: {err}");
                }
            }
            state.sign_out(&ctx);
            let _ = navigator.replace(Route::Login {});
        });
    };

    rsx! {
        div { class: "app",
            Header {
                show_session_stats: matches!(route, Route::Learn {}),
                stats,
                username,
                on_logout,
            }
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}
