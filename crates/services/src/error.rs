//! Shared error types for the services crate.

use thiserror::Error;

use storage::StorageError;
use vocab_core::calendar::CalendarError;
use vocab_core::model::{ChoiceSetError, WordError};

/// Errors emitted by the HTTP transport.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    #[error("invalid service url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("the session credential was rejected")]
    Unauthorized,
    #[error("wrong email or password")]
    BadCredentials,
    #[error("request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error("unexpected response: {0}")]
    Payload(String),
    #[error(transparent)]
    InvalidWord(#[from] WordError),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl From<ApiError> for StorageError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Unauthorized | ApiError::BadCredentials => StorageError::Unauthorized,
            ApiError::HttpStatus(status) if status == reqwest::StatusCode::NOT_FOUND => {
                StorageError::NotFound
            }
            ApiError::HttpStatus(status) => StorageError::Status(status.as_u16()),
            ApiError::Payload(msg) => StorageError::Serialization(msg),
            ApiError::InvalidWord(err) => StorageError::InvalidWord(err),
            ApiError::Http(err) if err.is_decode() => StorageError::Serialization(err.to_string()),
            ApiError::Http(err) => StorageError::Connection(err.to_string()),
            ApiError::InvalidUrl(err) => StorageError::Connection(err.to_string()),
        }
    }
}

/// Errors emitted by the quiz session controller.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    /// The next word could not be fetched; the quiz stays in `Loading` until retried.
    #[error("could not load the next word: {0}")]
    Fetch(#[source] StorageError),
    #[error("the session has expired, please sign in again")]
    Unauthorized,
    #[error("the word service sent an unusable item: {0}")]
    Malformed(#[from] ChoiceSetError),
    #[error("the word service sent an unusable word: {0}")]
    InvalidWord(#[from] WordError),
}

impl From<StorageError> for QuizError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Unauthorized => QuizError::Unauthorized,
            StorageError::InvalidWord(err) => QuizError::InvalidWord(err),
            other => QuizError::Fetch(other),
        }
    }
}

/// Errors emitted by `ProgressService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgressServiceError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Calendar(#[from] CalendarError),
}

impl ProgressServiceError {
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ProgressServiceError::Storage(err) if err.is_unauthorized())
    }
}

/// Errors emitted by `AuthService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AuthError {
    #[error("email and password are required")]
    MissingCredentials,
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] storage::sqlite::SqliteInitError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Auth(#[from] AuthError),
}
