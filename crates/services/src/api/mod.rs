//! HTTP transport for the remote vocabulary service.

mod client;
mod config;
mod dto;

pub use client::{AuthApi, AuthClient, HttpBackend};
pub use config::{ApiConfig, DEFAULT_API_URL, DEFAULT_SERVER_URL};
pub use reqwest::StatusCode;
