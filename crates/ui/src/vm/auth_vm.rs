use services::{ApiError, AuthError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Register,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthNotice {
    Error(String),
    Info(String),
}

impl AuthNotice {
    #[must_use]
    pub fn class(&self) -> &'static str {
        match self {
            AuthNotice::Error(_) => "auth-error",
            AuthNotice::Info(_) => "auth-info",
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            AuthNotice::Error(text) | AuthNotice::Info(text) => text,
        }
    }
}

#[must_use]
pub fn login_failure_notice(err: &AuthError) -> AuthNotice {
    let text = match err {
        AuthError::MissingCredentials => "Enter your email and password.",
        AuthError::Api(ApiError::BadCredentials | ApiError::Unauthorized) => {
            "Wrong email or password."
        }
        _ => "Could not sign in. Please try again.",
    };
    AuthNotice::Error(text.to_string())
}

#[must_use]
pub fn register_failure_notice(err: &AuthError) -> AuthNotice {
    let text = match err {
        AuthError::MissingCredentials => "Email, username and password are required.",
        _ => "Registration failed. The account may already exist.",
    };
    AuthNotice::Error(text.to_string())
}

#[must_use]
pub fn registered_notice() -> AuthNotice {
    AuthNotice::Info("Registration complete. You can sign in now.".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use services::api::StatusCode;

    #[test]
    fn bad_credentials_have_a_specific_message() {
        let notice = login_failure_notice(&AuthError::Api(ApiError::BadCredentials));
        assert_eq!(notice.text(), "Wrong email or password.");
        assert_eq!(notice.class(), "auth-error");
    }

    #[test]
    fn server_errors_are_generic() {
        let err = AuthError::Api(ApiError::HttpStatus(StatusCode::INTERNAL_SERVER_ERROR));
        assert_eq!(
            login_failure_notice(&err).text(),
            "Could not sign in. Please try again."
        );
        assert_eq!(
            register_failure_notice(&err).text(),
            "Registration failed. The account may already exist."
        );
    }

    #[test]
    fn registration_success_is_informational() {
        assert_eq!(registered_notice().class(), "auth-info");
    }
}
