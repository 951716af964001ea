use std::sync::Arc;

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, header::AUTHORIZATION, request::Parts},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::error::Error;
use crate::server::AppState;

/// Extractor that requires a valid admin bearer token. Every mutating
/// route takes this; rejection happens before the handler body runs.
pub struct RequireAdmin(pub String);

/// Extractor that resolves the caller's identity when a valid token is
/// present and `None` otherwise. Read routes use this to decide whether
/// hidden categories are visible; it never rejects the request.
pub struct OptionalIdentity(pub Option<String>);

#[derive(Debug)]
pub enum AuthError {
    MissingAuth,
    InvalidScheme,
    InvalidToken,
    TokenExpired,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let message = match self {
            AuthError::MissingAuth => "Authentication required",
            AuthError::InvalidScheme => "Invalid authorization scheme",
            AuthError::InvalidToken => "Invalid token",
            AuthError::TokenExpired => "Token expired",
        };

        let body = json!({ "error": message });

        let mut response = (StatusCode::UNAUTHORIZED, Json(body)).into_response();
        response.headers_mut().insert(
            "WWW-Authenticate",
            "Bearer realm=\"linkdeck\"".parse().unwrap(),
        );

        response
    }
}

fn bearer_token(parts: &Parts) -> Result<Option<&str>, AuthError> {
    let Some(header) = parts.headers.get(AUTHORIZATION) else {
        return Ok(None);
    };

    let header = header.to_str().map_err(|_| AuthError::InvalidToken)?;
    header
        .strip_prefix("Bearer ")
        .map(Some)
        .ok_or(AuthError::InvalidScheme)
}

impl FromRequestParts<Arc<AppState>> for RequireAdmin {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let raw = bearer_token(parts)?.ok_or(AuthError::MissingAuth)?;

        let identity = state.tokens.verify(raw).map_err(|e| match e {
            Error::TokenExpired => AuthError::TokenExpired,
            _ => AuthError::InvalidToken,
        })?;

        Ok(RequireAdmin(identity))
    }
}

impl FromRequestParts<Arc<AppState>> for OptionalIdentity {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "));

        Ok(OptionalIdentity(state.tokens.verify_optional(raw)))
    }
}
