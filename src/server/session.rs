use std::sync::Arc;

use axum::{Json, extract::State, response::IntoResponse};
use serde_json::json;

use crate::auth::{self, RequireAdmin};
use crate::server::AppState;
use crate::server::dto::{ChangePasswordRequest, LoginRequest, TokenResponse};
use crate::server::response::ApiError;

/// There is exactly one username, so the response never distinguishes
/// "unknown user" from "wrong password".
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> impl IntoResponse {
    let hash = state
        .store
        .get_admin_hash()?
        .ok_or_else(|| ApiError::unauthorized("invalid password"))?;

    if !auth::verify_password(&req.password, &hash)? {
        return Err(ApiError::unauthorized("invalid password"));
    }

    let token = state.tokens.issue()?;
    Ok::<_, ApiError>(Json(TokenResponse::bearer(token)))
}

pub async fn change_password(
    _auth: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChangePasswordRequest>,
) -> impl IntoResponse {
    let hash = state
        .store
        .get_admin_hash()?
        .ok_or_else(|| ApiError::internal("admin credential missing"))?;

    if !auth::verify_password(&req.old_password, &hash)? {
        return Err(ApiError::bad_request("incorrect old password"));
    }

    let new_hash = auth::hash_password(&req.new_password)?;
    state.store.set_admin_hash(&new_hash)?;

    Ok::<_, ApiError>(Json(json!({ "message": "password changed" })))
}
