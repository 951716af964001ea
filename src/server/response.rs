use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::error::Error;

/// API error that converts to a proper HTTP response
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = json!({ "error": self.message });
        (self.status, Json(body)).into_response()
    }
}

/// Boundary translation: store and auth errors become status codes here;
/// storage details never reach the caller.
impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::NotFound => Self::not_found("not found"),
            Error::InvalidArgument(message) => Self::bad_request(message),
            Error::Unauthorized => Self::unauthorized("unauthorized"),
            Error::InvalidToken | Error::TokenExpired => {
                Self::unauthorized("invalid or expired token")
            }
            Error::Database(_)
            | Error::PasswordHash(_)
            | Error::Serialize(_)
            | Error::Io(_)
            | Error::Config(_) => {
                tracing::error!("internal error: {err}");
                Self::internal("internal server error")
            }
        }
    }
}
