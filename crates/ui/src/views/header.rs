use dioxus::prelude::*;
use dioxus_router::Link;
use vocab_core::model::SessionStats;

use crate::routes::Route;
use crate::vm::map_session_stats;

/// Top bar. `show_session_stats` is set by the page that owns a running quiz.
#[component]
pub fn Header(
    show_session_stats: bool,
    stats: SessionStats,
    username: Option<String>,
    on_logout: EventHandler<()>,
) -> Element {
    let stats_vm = map_session_stats(stats);

    rsx! {
        header { class: "app-header",
            div { class: "header-content",
                div { class: "logo", "Zubroslov" }
                nav { class: "nav-links",
                    Link { class: "nav-link", to: Route::Learn {}, "Learn" }
                    Link { class: "nav-link", to: Route::Progress {}, "Progress" }
                }
                if show_session_stats {
                    div { class: "session-stats",
                        div { class: "stat correct-stat", "{stats_vm.correct_label}" }
                        div { class: "stat incorrect-stat", "{stats_vm.incorrect_label}" }
                    }
                }
                div { class: "user-section",
                    if let Some(name) = username {
                        span { class: "username", "{name}" }
                        button {
                            class: "logout-button",
                            r#type: "button",
                            onclick: move |_| on_logout.call(()),
                            "Log out"
                        }
                    }
                }
            }
        }
    }
}
