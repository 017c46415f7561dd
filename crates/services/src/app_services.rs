use std::sync::Arc;

use url::Url;

use storage::sqlite::SqliteRepository;
use storage::{InMemoryRepository, Storage};
use vocab_core::model::SessionContext;

use crate::Clock;
use crate::api::{ApiConfig, AuthClient, HttpBackend};
use crate::auth_service::AuthService;
use crate::error::AppServicesError;
use crate::progress_service::ProgressService;
use crate::quiz::{QuizSession, QuizSessionBuilder, QuizSettings};

#[derive(Clone)]
enum Backend {
    Remote(ApiConfig),
    Offline(InMemoryRepository),
}

/// Assembles app-facing services for either the remote service or offline drilling.
#[derive(Clone)]
pub struct AppServices {
    clock: Clock,
    settings: QuizSettings,
    backend: Backend,
    auth: Option<Arc<AuthService>>,
}

impl AppServices {
    /// Talk to the remote service, keeping the signed-in session in `SQLite`.
    ///
    /// Restores the session saved by a previous run.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the session store cannot be opened or read.
    pub async fn remote(
        db_url: &str,
        clock: Clock,
        config: ApiConfig,
    ) -> Result<Self, AppServicesError> {
        let sessions = SqliteRepository::open(db_url).await?;
        let auth = AuthService::new(
            clock,
            Arc::new(AuthClient::new(config.clone())?),
            Arc::new(sessions),
        );
        auth.restore().await?;
        Ok(Self {
            clock,
            settings: QuizSettings::default(),
            backend: Backend::Remote(config),
            auth: Some(Arc::new(auth)),
        })
    }

    /// Drill against a local word list; no sign-in required.
    #[must_use]
    pub fn offline(clock: Clock, repo: InMemoryRepository) -> Self {
        Self {
            clock,
            settings: QuizSettings::default(),
            backend: Backend::Offline(repo.with_clock(clock)),
            auth: None,
        }
    }

    #[must_use]
    pub fn with_settings(mut self, settings: QuizSettings) -> Self {
        self.settings = settings;
        self
    }

    #[must_use]
    pub fn settings(&self) -> QuizSettings {
        self.settings
    }

    #[must_use]
    pub fn is_offline(&self) -> bool {
        matches!(self.backend, Backend::Offline(_))
    }

    /// Present only when the backend requires signing in.
    #[must_use]
    pub fn auth(&self) -> Option<Arc<AuthService>> {
        self.auth.clone()
    }

    /// Origin against which word audio paths are resolved, if audio is served.
    #[must_use]
    pub fn media_origin(&self) -> Option<Url> {
        match &self.backend {
            Backend::Remote(config) => Some(config.media_origin.clone()),
            Backend::Offline(_) => None,
        }
    }

    /// Collaborators for the given session.
    ///
    /// Returns `Ok(None)` when the remote backend has nobody signed in.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::Api` if the HTTP client cannot be built.
    pub fn storage(
        &self,
        session: Option<&SessionContext>,
    ) -> Result<Option<Storage>, AppServicesError> {
        match (&self.backend, session) {
            (Backend::Offline(repo), _) => Ok(Some(Storage::in_memory(repo.clone()))),
            (Backend::Remote(config), Some(session)) => {
                let backend = HttpBackend::new(config.clone(), session.clone())?;
                Ok(Some(Storage::from_backend(Arc::new(backend))))
            }
            (Backend::Remote(_), None) => Ok(None),
        }
    }

    /// Builder for a quiz session over `storage`, preconfigured with the app settings.
    #[must_use]
    pub fn quiz_session(&self, storage: &Storage) -> QuizSessionBuilder {
        QuizSession::builder(Arc::clone(&storage.words), Arc::clone(&storage.progress))
            .with_settings(self.settings)
    }

    #[must_use]
    pub fn progress_service(&self, storage: &Storage) -> ProgressService {
        ProgressService::new(self.clock, Arc::clone(&storage.activity))
            .with_window_days(self.settings.calendar_window_days)
    }
}
