use std::sync::Arc;

use dioxus::prelude::*;
use dioxus_router::use_navigator;
use services::{PlaybackCoordinator, QuizSession, QuizSnapshot, SessionExpiryReporter};
use tokio::sync::watch;

use crate::audio::use_webview_audio;
use crate::context::{AppContext, AppState, StorageHandle};
use crate::routes::Route;
use crate::views::SignInRequired;
use crate::vm::{QuizVm, map_quiz};

#[component]
pub fn LearnView() -> Element {
    let state = use_context::<AppState>();
    let storage = state.storage.read().clone();

    match storage {
        Some(storage) => rsx! {
            QuizPanel { storage: StorageHandle(storage) }
        },
        None => rsx! { SignInRequired {} },
    }
}

#[component]
fn QuizPanel(storage: StorageHandle) -> Element {
    let ctx = use_context::<AppContext>();
    let state = use_context::<AppState>();
    let navigator = use_navigator();
    let audio = use_webview_audio();
    let mut snapshot = use_signal(QuizSnapshot::idle);

    let (quiz, expired) = use_hook(|| {
        let (reporter, expired) = SessionExpiryReporter::new();
        let mut builder = ctx
            .services()
            .quiz_session(&storage.0)
            .with_reporter(Arc::new(reporter));
        if let Some(origin) = ctx.services().media_origin() {
            builder = builder.with_playback(PlaybackCoordinator::new(audio.clone()), origin);
        }
        (builder.build(), expired)
    });

    use_hook({
        let quiz = quiz.clone();
        move || {
            let mut snapshots = quiz.subscribe();
            spawn(async move {
                while snapshots.changed().await.is_ok() {
                    let next = snapshots.borrow_and_update().clone();
                    snapshot.set(next);
                }
            });

            let mut stats = quiz.subscribe_stats();
            let mut live_stats = state.live_stats;
            live_stats.set(*stats.borrow());
            spawn(async move {
                while stats.changed().await.is_ok() {
                    let next = *stats.borrow_and_update();
                    live_stats.set(next);
                }
            });

            let ctx = ctx.clone();
            let mut expired: watch::Receiver<bool> = expired.clone();
            spawn(async move {
                if expired.wait_for(|flag| *flag).await.is_ok() {
                    if let Some(auth) = ctx.auth() {
                        if let Err(err) = auth.expire().await {
                            log::warn!("could not clear expired session: {err}");
                        }
                    }
                    state.sign_out(&ctx);
                    let _ = navigator.replace(Route::Login {});
                }
            });

            let quiz = quiz.clone();
            spawn(async move { quiz.start().await });
        }
    });

    use_drop({
        let quiz = quiz.clone();
        move || quiz.dispose()
    });

    let vm = map_quiz(&snapshot.read());

    rsx! {
        div { class: "page learn-page",
            match vm {
                QuizVm::Loading => rsx! {
                    p { class: "loading", "Loading..." }
                },
                QuizVm::Stalled { message, .. } => {
                    let quiz = quiz.clone();
                    rsx! {
                        p { class: "error", "{message}" }
                        button {
                            class: "btn btn-secondary",
                            r#type: "button",
                            onclick: move |_| {
                                let quiz = quiz.clone();
                                spawn(async move { quiz.retry().await });
                            },
                            "Retry"
                        }
                    }
                }
                QuizVm::Round { prompt, options, .. } => {
                    let buttons = options.into_iter().map(|option| {
                        let quiz = quiz.clone();
                        let id = option.id;
                        rsx! {
                            button {
                                key: "{id}",
                                class: option.class(),
                                r#type: "button",
                                disabled: option.disabled,
                                onclick: move |_| {
                                    quiz.select(id);
                                },
                                "{option.label}"
                            }
                        }
                    });
                    rsx! {
                        div { class: "word-display",
                            h2 { class: "word-prompt", "{prompt}" }
                        }
                        div { class: "word-grid", {buttons} }
                    }
                }
            }
        }
    }
}
