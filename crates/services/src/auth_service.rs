use std::sync::Arc;

use tokio::sync::watch;

use storage::repository::SessionRepository;
use vocab_core::model::{SessionContext, UserProfile};

use crate::Clock;
use crate::api::AuthApi;
use crate::error::AuthError;

/// Owns the signed-in session: login, registration, logout and expiry.
///
/// The current session is persisted through `SessionRepository` and
/// published to observers whenever it changes.
#[derive(Clone)]
pub struct AuthService {
    clock: Clock,
    api: Arc<dyn AuthApi>,
    sessions: Arc<dyn SessionRepository>,
    current: Arc<watch::Sender<Option<SessionContext>>>,
}

impl AuthService {
    #[must_use]
    pub fn new(clock: Clock, api: Arc<dyn AuthApi>, sessions: Arc<dyn SessionRepository>) -> Self {
        let (current, _rx) = watch::channel(None);
        Self {
            clock,
            api,
            sessions,
            current: Arc::new(current),
        }
    }

    #[must_use]
    pub fn current(&self) -> Option<SessionContext> {
        self.current.borrow().clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<SessionContext>> {
        self.current.subscribe()
    }

    /// Load the session saved by a previous run, if any.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the session store cannot be read.
    pub async fn restore(&self) -> Result<Option<SessionContext>, AuthError> {
        let session = self.sessions.load_session().await?;
        if let Some(session) = &session {
            log::info!("restored session for {}", session.user().email);
        }
        self.current.send_replace(session.clone());
        Ok(session)
    }

    /// Sign in with email and password and persist the new session.
    ///
    /// If the profile cannot be fetched after the credential was issued, the
    /// session is still established with a profile derived from the email.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingCredentials` for blank input,
    /// `AuthError::Api` if the server rejects the login and
    /// `AuthError::Storage` if the session cannot be saved.
    pub async fn login(&self, email: &str, password: &str) -> Result<SessionContext, AuthError> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let token = self.api.login(email, password).await?;
        let profile = match self.api.fetch_profile(&token).await {
            Ok(profile) => profile,
            Err(err) => {
                log::warn!("profile unavailable after login, using email: {err}");
                UserProfile::from_email(email)
            }
        };

        let session = SessionContext::new(token, profile, self.clock.now());
        self.sessions.save_session(&session).await?;
        self.current.send_replace(Some(session.clone()));
        Ok(session)
    }

    /// Create an account. The learner signs in separately afterwards.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingCredentials` for blank input and
    /// `AuthError::Api` if the server refuses the registration.
    pub async fn register(
        &self,
        email: &str,
        username: &str,
        password: &str,
    ) -> Result<(), AuthError> {
        let email = email.trim();
        let username = username.trim();
        if email.is_empty() || username.is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }
        self.api.register(email, username, password).await?;
        log::info!("registered {email}");
        Ok(())
    }

    /// Sign out. The server is told on a best-effort basis; the local session
    /// is cleared regardless.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the saved session cannot be removed.
    pub async fn logout(&self) -> Result<(), AuthError> {
        if let Some(session) = self.current() {
            if let Err(err) = self.api.logout(session.token()).await {
                log::warn!("remote logout failed: {err}");
            }
        }
        self.clear().await
    }

    /// Drop a session whose credential the server has rejected.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the saved session cannot be removed.
    pub async fn expire(&self) -> Result<(), AuthError> {
        log::info!("session expired");
        self.clear().await
    }

    async fn clear(&self) -> Result<(), AuthError> {
        self.current.send_replace(None);
        self.sessions.clear_session().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use storage::{InMemoryRepository, StorageError};
    use vocab_core::model::{AuthToken, UserId};
    use vocab_core::time::{fixed_clock, fixed_now};

    use crate::error::ApiError;

    #[derive(Default)]
    struct FakeAuthApi {
        profile_down: bool,
        logout_down: bool,
        calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl AuthApi for FakeAuthApi {
        async fn login(&self, email: &str, password: &str) -> Result<AuthToken, ApiError> {
            self.calls.lock().unwrap().push(format!("login {email}"));
            if password == "wrong" {
                return Err(ApiError::BadCredentials);
            }
            Ok(AuthToken::new("jwt"))
        }

        async fn fetch_profile(&self, _token: &AuthToken) -> Result<UserProfile, ApiError> {
            if self.profile_down {
                return Err(ApiError::Unauthorized);
            }
            Ok(UserProfile {
                id: "67e55044-10b1-426f-9247-bb680e5fe0c8".parse::<UserId>().unwrap(),
                email: "anna@example.org".into(),
                username: "anna_k".into(),
            })
        }

        async fn register(&self, email: &str, _: &str, _: &str) -> Result<(), ApiError> {
            self.calls.lock().unwrap().push(format!("register {email}"));
            Ok(())
        }

        async fn logout(&self, token: &AuthToken) -> Result<(), ApiError> {
            self.calls.lock().unwrap().push(format!("logout {}", token.as_str()));
            if self.logout_down {
                return Err(ApiError::HttpStatus(reqwest::StatusCode::BAD_GATEWAY));
            }
            Ok(())
        }
    }

    struct BrokenSessions;

    #[async_trait]
    impl SessionRepository for BrokenSessions {
        async fn load_session(&self) -> Result<Option<SessionContext>, StorageError> {
            Err(StorageError::Connection("disk gone".into()))
        }

        async fn save_session(&self, _session: &SessionContext) -> Result<(), StorageError> {
            Err(StorageError::Connection("disk gone".into()))
        }

        async fn clear_session(&self) -> Result<(), StorageError> {
            Err(StorageError::Connection("disk gone".into()))
        }
    }

    fn service(api: FakeAuthApi) -> (AuthService, InMemoryRepository) {
        let store = InMemoryRepository::new();
        let service = AuthService::new(fixed_clock(), Arc::new(api), Arc::new(store.clone()));
        (service, store)
    }

    #[tokio::test]
    async fn login_persists_session_with_profile() {
        let (auth, store) = service(FakeAuthApi::default());
        let session = auth.login(" anna@example.org ", "pw").await.unwrap();
        assert_eq!(session.user().username, "anna_k");
        assert_eq!(session.signed_in_at(), fixed_now());
        assert_eq!(store.load_session().await.unwrap(), Some(session.clone()));
        assert_eq!(auth.current(), Some(session));
    }

    #[tokio::test]
    async fn login_falls_back_to_email_profile() {
        let (auth, _) = service(FakeAuthApi {
            profile_down: true,
            ..FakeAuthApi::default()
        });
        let session = auth.login("boris@example.org", "pw").await.unwrap();
        assert_eq!(session.user().username, "boris");
        assert_eq!(session.user().id, UserId::nil());
    }

    #[tokio::test]
    async fn bad_credentials_leave_no_session() {
        let (auth, store) = service(FakeAuthApi::default());
        let err = auth.login("anna@example.org", "wrong").await.unwrap_err();
        assert!(matches!(err, AuthError::Api(ApiError::BadCredentials)));
        assert_eq!(store.load_session().await.unwrap(), None);
        assert!(matches!(
            auth.login("  ", "pw").await,
            Err(AuthError::MissingCredentials)
        ));
    }

    #[tokio::test]
    async fn logout_clears_even_when_server_fails() {
        let (auth, store) = service(FakeAuthApi {
            logout_down: true,
            ..FakeAuthApi::default()
        });
        auth.login("anna@example.org", "pw").await.unwrap();
        let mut rx = auth.subscribe();
        auth.logout().await.unwrap();
        assert!(rx.borrow_and_update().is_none());
        assert_eq!(store.load_session().await.unwrap(), None);
    }

    #[tokio::test]
    async fn restore_and_expire_round_trip() {
        let (auth, _) = service(FakeAuthApi::default());
        assert_eq!(auth.restore().await.unwrap(), None);
        let session = auth.login("anna@example.org", "pw").await.unwrap();

        let again = AuthService::new(
            fixed_clock(),
            Arc::new(FakeAuthApi::default()),
            Arc::clone(&auth.sessions),
        );
        assert_eq!(again.restore().await.unwrap(), Some(session));
        again.expire().await.unwrap();
        assert_eq!(again.current(), None);
        assert_eq!(auth.restore().await.unwrap(), None);
    }

    #[tokio::test]
    async fn register_requires_every_field() {
        let (auth, _) = service(FakeAuthApi::default());
        assert!(matches!(
            auth.register("anna@example.org", "", "pw").await,
            Err(AuthError::MissingCredentials)
        ));
        auth.register("anna@example.org", "anna", "pw").await.unwrap();
    }

    #[tokio::test]
    async fn session_store_failures_surface_as_storage_errors() {
        let auth = AuthService::new(
            fixed_clock(),
            Arc::new(FakeAuthApi::default()),
            Arc::new(BrokenSessions),
        );

        assert!(matches!(auth.restore().await, Err(AuthError::Storage(_))));
        assert!(matches!(
            auth.login("anna@example.org", "pw").await,
            Err(AuthError::Storage(StorageError::Connection(_)))
        ));
        assert_eq!(auth.current(), None);
        assert!(matches!(auth.expire().await, Err(AuthError::Storage(_))));
    }
}
