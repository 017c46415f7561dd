use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use url::Url;

use storage::StorageError;
use storage::repository::{ActivityRepository, NextWord, ProgressRepository, WordRepository};
use vocab_core::model::{
    ActivitySample, AuthToken, ProgressOverview, SessionContext, UserProfile, WordId,
};

use super::config::ApiConfig;
use super::dto::{ActivityDto, NextWordDto, RegisterDto, StatsDto, TokenDto, UserDto};
use crate::error::ApiError;

fn build_client(config: &ApiConfig) -> Result<Client, ApiError> {
    Ok(Client::builder().timeout(config.timeout).build()?)
}

/// Map non-2xx statuses onto the transport error taxonomy.
fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else if status == StatusCode::UNAUTHORIZED {
        Err(ApiError::Unauthorized)
    } else {
        Err(ApiError::HttpStatus(status))
    }
}

//
// ─── AUTHENTICATED BACKEND ─────────────────────────────────────────────────────
//

/// Remote word, progress and activity collaborators for one signed-in session.
///
/// The session credential is injected at construction; a new backend is built
/// after every login.
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    config: ApiConfig,
    session: SessionContext,
}

impl HttpBackend {
    /// # Errors
    ///
    /// Returns `ApiError::Http` if the HTTP client cannot be initialised.
    pub fn new(config: ApiConfig, session: SessionContext) -> Result<Self, ApiError> {
        Ok(Self {
            client: build_client(&config)?,
            config,
            session,
        })
    }

    #[must_use]
    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    async fn get_json<T>(&self, url: Url) -> Result<T, ApiError>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = self
            .client
            .get(url)
            .bearer_auth(self.session.token().as_str())
            .send()
            .await?;
        Ok(check_status(response)?.json::<T>().await?)
    }
}

#[async_trait]
impl WordRepository for HttpBackend {
    async fn next_word(&self) -> Result<NextWord, StorageError> {
        let url = self.config.endpoint("words/next")?;
        let dto: NextWordDto = self.get_json(url).await?;
        Ok(NextWord::try_from(dto)?)
    }
}

#[async_trait]
impl ProgressRepository for HttpBackend {
    async fn record_outcome(&self, word_id: WordId, is_correct: bool) -> Result<(), StorageError> {
        let url = self
            .config
            .endpoint(&format!("progress/progress/{word_id}"))?;
        let response = self
            .client
            .put(url)
            .bearer_auth(self.session.token().as_str())
            .query(&[("is_correct", is_correct)])
            .send()
            .await
            .map_err(ApiError::from)?;
        check_status(response)?;
        Ok(())
    }
}

#[async_trait]
impl ActivityRepository for HttpBackend {
    async fn activity(&self, window_days: u32) -> Result<Vec<ActivitySample>, StorageError> {
        let mut url = self.config.endpoint("progress/activity-calendar")?;
        url.query_pairs_mut()
            .append_pair("days", &window_days.to_string());
        let rows: Vec<ActivityDto> = self.get_json(url).await?;
        Ok(rows.into_iter().map(ActivitySample::from).collect())
    }

    async fn overview(&self) -> Result<ProgressOverview, StorageError> {
        let url = self.config.endpoint("progress/stats")?;
        let dto: StatsDto = self.get_json(url).await?;
        Ok(dto.into())
    }
}

//
// ─── ACCOUNT ENDPOINTS ─────────────────────────────────────────────────────────
//

/// Account operations that happen outside a signed-in session.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchange email and password for a bearer credential.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::BadCredentials` if the server rejects the pair.
    async fn login(&self, email: &str, password: &str) -> Result<AuthToken, ApiError>;

    /// # Errors
    ///
    /// Returns `ApiError` if the profile cannot be fetched.
    async fn fetch_profile(&self, token: &AuthToken) -> Result<UserProfile, ApiError>;

    /// # Errors
    ///
    /// Returns `ApiError` if the account cannot be created.
    async fn register(&self, email: &str, username: &str, password: &str)
    -> Result<(), ApiError>;

    /// Invalidate the credential on the server.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the server call fails.
    async fn logout(&self, token: &AuthToken) -> Result<(), ApiError>;
}

#[derive(Clone)]
pub struct AuthClient {
    client: Client,
    config: ApiConfig,
}

impl AuthClient {
    /// # Errors
    ///
    /// Returns `ApiError::Http` if the HTTP client cannot be initialised.
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        Ok(Self {
            client: build_client(&config)?,
            config,
        })
    }
}

#[async_trait]
impl AuthApi for AuthClient {
    async fn login(&self, email: &str, password: &str) -> Result<AuthToken, ApiError> {
        let url = self.config.endpoint("auth/jwt/login")?;
        let response = self
            .client
            .post(url)
            .form(&[("username", email), ("password", password)])
            .send()
            .await?;
        if response.status() == StatusCode::BAD_REQUEST {
            return Err(ApiError::BadCredentials);
        }
        let body: TokenDto = check_status(response)?.json().await?;
        Ok(AuthToken::new(body.access_token))
    }

    async fn fetch_profile(&self, token: &AuthToken) -> Result<UserProfile, ApiError> {
        let url = self.config.endpoint("users/me")?;
        let response = self
            .client
            .get(url)
            .bearer_auth(token.as_str())
            .send()
            .await?;
        let body: UserDto = check_status(response)?.json().await?;
        Ok(body.into())
    }

    async fn register(
        &self,
        email: &str,
        username: &str,
        password: &str,
    ) -> Result<(), ApiError> {
        let url = self.config.endpoint("auth/register")?;
        let response = self
            .client
            .post(url)
            .json(&RegisterDto {
                email,
                username,
                password,
            })
            .send()
            .await?;
        check_status(response)?;
        Ok(())
    }

    async fn logout(&self, token: &AuthToken) -> Result<(), ApiError> {
        let url = self.config.endpoint("auth/jwt/logout")?;
        let response = self
            .client
            .post(url)
            .bearer_auth(token.as_str())
            .send()
            .await?;
        check_status(response)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use vocab_core::model::WordError;

    fn session() -> SessionContext {
        SessionContext::new(
            AuthToken::new("secret"),
            UserProfile::from_email("anna@example.org"),
            Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
        )
    }

    #[test]
    fn backend_keeps_injected_session() {
        let backend = HttpBackend::new(
            ApiConfig::new("http://localhost:8000/api", "http://localhost:8000").unwrap(),
            session(),
        )
        .unwrap();
        assert_eq!(backend.session().user().username, "anna");
    }

    #[test]
    fn api_errors_map_onto_storage_errors() {
        assert!(StorageError::from(ApiError::Unauthorized).is_unauthorized());
        assert!(matches!(
            StorageError::from(ApiError::HttpStatus(StatusCode::NOT_FOUND)),
            StorageError::NotFound
        ));
        assert!(matches!(
            StorageError::from(ApiError::HttpStatus(StatusCode::BAD_GATEWAY)),
            StorageError::Status(502)
        ));
        assert!(matches!(
            StorageError::from(ApiError::Payload("bad".into())),
            StorageError::Serialization(_)
        ));
        assert!(matches!(
            StorageError::from(ApiError::InvalidWord(WordError::EmptyTargetText {
                id: WordId::new(4)
            })),
            StorageError::InvalidWord(_)
        ));
    }
}
