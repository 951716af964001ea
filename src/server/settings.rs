use std::sync::Arc;

use axum::{Json, extract::State, response::IntoResponse};

use crate::auth::RequireAdmin;
use crate::server::AppState;
use crate::server::response::ApiError;
use crate::types::Settings;

pub async fn get_settings(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let settings = state.store.get_settings()?;
    Ok::<_, ApiError>(Json(settings))
}

/// Full replace: the payload is stored as a whole, so a concurrent reader
/// sees the old set or the new one, never a mix.
pub async fn update_settings(
    _auth: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Json(settings): Json<Settings>,
) -> impl IntoResponse {
    state.store.put_settings(&settings)?;
    let stored = state.store.get_settings()?;
    Ok::<_, ApiError>(Json(stored))
}
