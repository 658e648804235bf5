use auth::HeaderError;
use auth::TokenError;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::session::errors::SessionError;

pub mod current_session;
pub mod health;
pub mod login;
pub mod refresh;
pub mod revoke;

/// Message for every login failure, whatever the cause.
pub const INVALID_LOGIN_MESSAGE: &str = "Incorrect email or password";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    Unauthorized(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
        };

        (status, Json(ApiResponseBody::new_error(status, message))).into_response()
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::InvalidCredentials => {
                ApiError::Unauthorized(INVALID_LOGIN_MESSAGE.to_string())
            }
            SessionError::Unauthorized => ApiError::Unauthorized("Unauthorized".to_string()),
            SessionError::Token(TokenError::Invalid) => {
                ApiError::Unauthorized("Invalid or expired token".to_string())
            }
            SessionError::Token(TokenError::SigningFailed(_))
            | SessionError::Hashing(_)
            | SessionError::Entropy(_)
            | SessionError::LifetimeOutOfRange
            | SessionError::DatabaseError(_) => {
                // Detail stays in the logs, never in the response
                tracing::error!(error = %err, "Session operation failed");
                ApiError::InternalServerError("Internal server error".to_string())
            }
        }
    }
}

impl From<HeaderError> for ApiError {
    fn from(err: HeaderError) -> Self {
        match err {
            HeaderError::Missing => {
                ApiError::Unauthorized("Missing Authorization header".to_string())
            }
            HeaderError::Malformed => ApiError::Unauthorized(
                "Invalid Authorization header format. Expected: Bearer <token>".to_string(),
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_failures_share_one_message() {
        assert_eq!(
            ApiError::from(SessionError::InvalidCredentials),
            ApiError::Unauthorized(INVALID_LOGIN_MESSAGE.to_string())
        );
    }

    #[test]
    fn test_token_failure_hides_cause() {
        assert_eq!(
            ApiError::from(SessionError::Token(TokenError::Invalid)),
            ApiError::Unauthorized("Invalid or expired token".to_string())
        );
    }

    #[test]
    fn test_infrastructure_failure_hides_detail() {
        let err = ApiError::from(SessionError::DatabaseError(
            "relation \"refresh_tokens\" does not exist".to_string(),
        ));
        assert_eq!(
            err,
            ApiError::InternalServerError("Internal server error".to_string())
        );
    }

    #[test]
    fn test_lifetime_failures_are_internal() {
        assert_eq!(
            ApiError::from(SessionError::LifetimeOutOfRange),
            ApiError::InternalServerError("Internal server error".to_string())
        );
        assert_eq!(
            ApiError::from(SessionError::Token(TokenError::SigningFailed(
                "token lifetime out of range".to_string()
            ))),
            ApiError::InternalServerError("Internal server error".to_string())
        );
    }

    #[test]
    fn test_header_errors_are_unauthorized() {
        assert!(matches!(
            ApiError::from(HeaderError::Missing),
            ApiError::Unauthorized(_)
        ));
        assert!(matches!(
            ApiError::from(HeaderError::Malformed),
            ApiError::Unauthorized(_)
        ));
    }
}
