use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use services::AppServices;
use storage::InMemoryRepository;
use storage::starter::starter_words;
use vocab_core::evaluator::Evaluation;
use vocab_core::model::SessionStats;
use vocab_core::time::fixed_clock;

use crate::context::{AppState, UiApp, build_app_context};
use crate::views::{AuthView, Header, LearnView, ProgressView};

struct TestApp {
    services: AppServices,
}

impl UiApp for TestApp {
    fn services(&self) -> AppServices {
        self.services.clone()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewKind {
    Learn,
    Progress,
    Login,
    Header { show_session_stats: bool },
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    let ctx = use_context_provider(|| build_app_context(&app));
    use_context_provider(|| AppState::new(&ctx));
    use_context_provider(|| props.view);
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Learn => rsx! { LearnView {} },
        ViewKind::Progress => rsx! { ProgressView {} },
        ViewKind::Login => rsx! { AuthView {} },
        ViewKind::Header { show_session_stats } => {
            let stats = SessionStats::default()
                .with(Evaluation { is_correct: true })
                .with(Evaluation { is_correct: true })
                .with(Evaluation { is_correct: false });
            rsx! {
                Header {
                    show_session_stats,
                    stats,
                    username: Some("anna".to_string()),
                    on_logout: |()| {},
                }
            }
        }
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub repo: InMemoryRepository,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Drive until the rendered HTML contains `needle`, giving up after a few rounds.
    pub async fn drive_until(&mut self, needle: &str) -> String {
        for _ in 0..20 {
            let html = self.render();
            if html.contains(needle) {
                return html;
            }
            self.drive_async().await;
        }
        self.render()
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

/// Offline services over the starter word list, with time fixed.
pub fn setup_offline_harness(view: ViewKind) -> ViewHarness {
    let repo = InMemoryRepository::with_words(starter_words()).with_clock(fixed_clock());
    let services = AppServices::offline(fixed_clock(), repo.clone());
    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app: Arc::new(TestApp { services }),
            view,
        },
    );
    ViewHarness { dom, repo }
}
