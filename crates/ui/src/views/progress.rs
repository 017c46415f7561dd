use dioxus::document::eval;
use dioxus::prelude::*;
use dioxus_router::use_navigator;

use crate::context::{AppContext, AppState, StorageHandle};
use crate::routes::Route;
use crate::views::{SignInRequired, ViewError, ViewState, view_state_from_resource};
use crate::vm::{CalendarCellVm, CalendarVm, map_calendar, map_overview};

#[component]
pub fn ProgressView() -> Element {
    let state = use_context::<AppState>();
    let storage = state.storage.read().clone();

    match storage {
        Some(storage) => rsx! {
            ProgressPanel { storage: StorageHandle(storage) }
        },
        None => rsx! { SignInRequired {} },
    }
}

#[component]
fn ProgressPanel(storage: StorageHandle) -> Element {
    let ctx = use_context::<AppContext>();
    let state = use_context::<AppState>();
    let navigator = use_navigator();
    let service = use_hook(|| ctx.services().progress_service(&storage.0));

    let overview_service = service.clone();
    let overview = use_resource(move || {
        let service = overview_service.clone();
        async move {
            let overview = service.overview().await.map_err(ViewError::from)?;
            Ok::<_, ViewError>(map_overview(&overview))
        }
    });

    let calendar = use_resource(move || {
        let service = service.clone();
        async move {
            let grid = service.activity_grid().await.map_err(ViewError::from)?;
            Ok::<_, ViewError>(map_calendar(&grid))
        }
    });

    let overview_state = view_state_from_resource(&overview);
    let calendar_state = view_state_from_resource(&calendar);

    let expired = matches!(overview_state, ViewState::Error(ViewError::Unauthorized))
        || matches!(calendar_state, ViewState::Error(ViewError::Unauthorized));
    use_effect(use_reactive((&expired,), move |(expired,)| {
        if !expired {
            return;
        }
        let ctx = ctx.clone();
        spawn(async move {
            if let Some(auth) = ctx.auth() {
                if let Err(err) = auth.expire().await {
                    log::warn!("could not clear expired session: {err}");
                }
            }
            state.sign_out(&ctx);
            let _ = navigator.replace(Route::Login {});
        });
    }));

    rsx! {
        div { class: "page progress-page",
            h2 { "Your Progress" }
            match overview_state {
                ViewState::Ready(vm) => rsx! {
                    div { class: "progress-overview",
                        p { "{vm.total_label}" }
                        p { "{vm.learned_label}" }
                        p { "{vm.accuracy_label}" }
                    }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "error", "{err.message()}" }
                },
                ViewState::Idle | ViewState::Loading => rsx! {},
            }
            div { class: "activity-calendar-container",
                h3 { "Activity calendar" }
                match calendar_state {
                    ViewState::Ready(vm) => rsx! { ActivityCalendar { vm } },
                    ViewState::Error(err) => rsx! {
                        p { class: "error", "{err.message()}" }
                        button {
                            class: "btn btn-secondary",
                            r#type: "button",
                            onclick: move |_| {
                                let mut calendar = calendar;
                                calendar.restart();
                            },
                            "Retry"
                        }
                    },
                    ViewState::Idle | ViewState::Loading => rsx! {
                        div { class: "loading", "Loading activity calendar..." }
                    },
                }
            }
        }
    }
}

const SCROLL_TO_LATEST: &str = r#"const grid = document.getElementById("calendar-grid");
if (grid) {
    grid.scrollLeft = grid.scrollWidth;
}"#;

#[component]
fn ActivityCalendar(vm: CalendarVm) -> Element {
    use_effect(|| {
        spawn(async move {
            let _ = eval(SCROLL_TO_LATEST).await;
        });
    });

    let weeks = vm.weeks.iter().enumerate().map(|(week_index, week)| {
        let days = week.iter().enumerate().map(move |(day_index, cell)| match cell {
            CalendarCellVm::Padding => rsx! {
                div {
                    key: "{week_index}-{day_index}",
                    class: "calendar-day calendar-day--empty",
                }
            },
            CalendarCellVm::Day { title, color, level } => rsx! {
                div {
                    key: "{week_index}-{day_index}",
                    class: "calendar-day level-{level}",
                    style: "background-color: {color}",
                    title: "{title}",
                }
            },
        });
        rsx! {
            div { key: "week-{week_index}", class: "calendar-week", {days} }
        }
    });

    let legend = vm.legend.iter().map(|color| {
        rsx! {
            div { key: "{color}", class: "legend-cell", style: "background-color: {color}" }
        }
    });

    rsx! {
        div { class: "activity-calendar",
            div { id: "calendar-grid", class: "calendar-grid", {weeks} }
            div { class: "calendar-legend",
                div { class: "legend-item",
                    span { "Less" }
                    {legend}
                    span { "More" }
                }
            }
            p { class: "calendar-total", "{vm.total_label}" }
        }
    }
}
