use std::sync::Arc;

use dioxus::prelude::*;
use services::{AppServices, AuthService};
use storage::Storage;
use vocab_core::model::{SessionContext, SessionStats};

pub trait UiApp: Send + Sync {
    fn services(&self) -> AppServices;
}

/// Services handed to the view tree by the composition root.
#[derive(Clone)]
pub struct AppContext {
    services: AppServices,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            services: app.services(),
        }
    }

    #[must_use]
    pub fn services(&self) -> &AppServices {
        &self.services
    }

    #[must_use]
    pub fn auth(&self) -> Option<Arc<AuthService>> {
        self.services.auth()
    }

    #[must_use]
    pub fn requires_login(&self) -> bool {
        self.services.auth().is_some()
    }

    #[must_use]
    pub fn restored_session(&self) -> Option<SessionContext> {
        self.services.auth().and_then(|auth| auth.current())
    }

    /// Collaborators for `session`, or `None` when signing in is still required.
    #[must_use]
    pub fn storage_for(&self, session: Option<&SessionContext>) -> Option<Storage> {
        match self.services.storage(session) {
            Ok(storage) => storage,
            Err(err) => {
                log::error!("could not prepare backend: {err}");
                None
            }
        }
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}

/// Reactive, app-wide state shared by the header and the pages.
#[derive(Clone, Copy)]
pub struct AppState {
    pub session: Signal<Option<SessionContext>>,
    pub storage: Signal<Option<Storage>>,
    /// Running totals of the quiz currently on screen.
    pub live_stats: Signal<SessionStats>,
}

impl AppState {
    /// Must be called inside a component, e.g. from `use_context_provider`.
    #[must_use]
    pub fn new(ctx: &AppContext) -> Self {
        let session = ctx.restored_session();
        let storage = ctx.storage_for(session.as_ref());
        Self {
            session: Signal::new(session),
            storage: Signal::new(storage),
            live_stats: Signal::new(SessionStats::default()),
        }
    }

    pub fn sign_in(mut self, ctx: &AppContext, session: SessionContext) {
        let storage = ctx.storage_for(Some(&session));
        self.session.set(Some(session));
        self.storage.set(storage);
        self.live_stats.set(SessionStats::default());
    }

    pub fn sign_out(mut self, ctx: &AppContext) {
        self.session.set(None);
        self.storage.set(ctx.storage_for(None));
        self.live_stats.set(SessionStats::default());
    }
}

/// `Storage` as a component prop. Equal when it wraps the same backend.
#[derive(Clone)]
pub struct StorageHandle(pub Storage);

impl PartialEq for StorageHandle {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0.words, &other.0.words)
    }
}
