use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::ids::UserId;

/// Bearer credential issued by the auth endpoint.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthToken(String);

impl AuthToken {
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(<redacted>)")
    }
}

/// Identity of the signed-in learner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub email: String,
    pub username: String,
}

impl UserProfile {
    /// Fallback profile for when the account endpoint is unavailable right after login.
    #[must_use]
    pub fn from_email(email: &str) -> Self {
        let username = email.split('@').next().unwrap_or(email).to_owned();
        Self {
            id: UserId::nil(),
            email: email.to_owned(),
            username,
        }
    }
}

/// Credential plus identity, created on login and cleared on logout or expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    token: AuthToken,
    user: UserProfile,
    signed_in_at: DateTime<Utc>,
}

impl SessionContext {
    #[must_use]
    pub fn new(token: AuthToken, user: UserProfile, signed_in_at: DateTime<Utc>) -> Self {
        Self {
            token,
            user,
            signed_in_at,
        }
    }

    #[must_use]
    pub fn token(&self) -> &AuthToken {
        &self.token
    }

    #[must_use]
    pub fn user(&self) -> &UserProfile {
        &self.user
    }

    #[must_use]
    pub fn signed_in_at(&self) -> DateTime<Utc> {
        self.signed_in_at
    }
}
