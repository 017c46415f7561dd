#![forbid(unsafe_code)]

pub mod api;
pub mod app_services;
pub mod auth_service;
pub mod error;
pub mod playback;
pub mod progress_service;
pub mod quiz;

pub use vocab_core::Clock;

pub use api::{ApiConfig, AuthApi, AuthClient, HttpBackend};
pub use app_services::AppServices;
pub use auth_service::AuthService;
pub use error::{ApiError, AppServicesError, AuthError, ProgressServiceError, QuizError};
pub use playback::{AudioOutput, PlaybackCoordinator, PlaybackError, PlaybackState};
pub use progress_service::ProgressService;
pub use quiz::{
    ErrorReporter, LogReporter, QuizFailure, QuizPhase, QuizSession, QuizSessionBuilder,
    QuizSettings, QuizSnapshot, SessionExpiryReporter,
};
