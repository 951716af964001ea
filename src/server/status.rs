use std::sync::Arc;
use std::time::Instant;

use axum::{
    Json,
    extract::{Query, State},
};

use crate::server::AppState;
use crate::server::dto::{CheckStatusParams, CheckStatusResponse};

/// Best-effort reachability probe for a single URL. Network failures fold
/// into the JSON result; this endpoint never answers with a server error.
pub async fn check_status(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CheckStatusParams>,
) -> Json<CheckStatusResponse> {
    if params.url.is_empty() {
        return Json(CheckStatusResponse::error("url is required"));
    }

    let start = Instant::now();

    // HEAD is cheap but widely unsupported; fall back to GET on transport
    // failure or any error status.
    let response = match state.http.head(&params.url).send().await {
        Ok(resp) if resp.status().as_u16() < 400 => Ok(resp),
        _ => state.http.get(&params.url).send().await,
    };

    let latency_ms = start.elapsed().as_millis() as u64;

    Json(match response {
        Ok(resp) if resp.status().as_u16() < 400 => CheckStatusResponse::online(latency_ms),
        Ok(resp) => CheckStatusResponse::offline(resp.status().as_u16()),
        Err(e) => CheckStatusResponse::unreachable(e.to_string()),
    })
}
