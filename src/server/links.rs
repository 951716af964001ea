use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::auth::{OptionalIdentity, RequireAdmin};
use crate::server::AppState;
use crate::server::dto::{
    CategoryOrderPayload, CreateLinkRequest, ListLinksParams, ReorderRequest, StatusMessage,
    UpdateLinkRequest,
};
use crate::server::response::ApiError;
use crate::server::validation::{validate_category, validate_title, validate_url};
use crate::types::{LinkFilter, NewLink};

pub async fn list_links(
    OptionalIdentity(identity): OptionalIdentity,
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListLinksParams>,
) -> impl IntoResponse {
    let settings = state.store.get_settings()?;

    // Hidden categories only exist for anonymous readers; a verified
    // caller sees everything.
    let hidden = if identity.is_some() {
        Vec::new()
    } else {
        settings.hidden_categories
    };

    let filter = LinkFilter {
        category: params.category,
        favorite: params.favorite,
    };
    let links = state
        .store
        .list_links(&filter, &hidden, &settings.category_order)?;

    Ok::<_, ApiError>(Json(links))
}

pub async fn create_link(
    _auth: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateLinkRequest>,
) -> impl IntoResponse {
    validate_title(&req.title)?;
    validate_url(&req.url)?;
    validate_category(&req.category)?;

    let link = state.store.create_link(&NewLink {
        title: req.title,
        url: req.url,
        icon: req.icon,
        icon_url: req.icon_url,
        description: req.description,
        category: req.category,
        is_favorite: req.is_favorite,
    })?;

    Ok::<_, ApiError>((StatusCode::CREATED, Json(link)))
}

pub async fn update_link(
    _auth: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateLinkRequest>,
) -> impl IntoResponse {
    if let Some(title) = &req.title {
        validate_title(title)?;
    }
    if let Some(url) = &req.url {
        validate_url(url)?;
    }
    if let Some(category) = &req.category {
        validate_category(category)?;
    }

    let link = state.store.update_link(id, &req.into())?;
    Ok::<_, ApiError>(Json(link))
}

pub async fn reorder_links(
    _auth: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Json(req): Json<ReorderRequest>,
) -> impl IntoResponse {
    state.store.reorder_links(&req.items)?;
    Ok::<_, ApiError>(Json(StatusMessage::ok()))
}

pub async fn track_click(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    // Best-effort telemetry; an unknown id still reports ok
    state.store.track_click(id)?;
    Ok::<_, ApiError>(Json(StatusMessage::ok()))
}

pub async fn delete_link(
    _auth: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    if !state.store.delete_link(id)? {
        return Err(ApiError::not_found("link not found"));
    }
    Ok::<_, ApiError>(Json(StatusMessage::deleted()))
}

pub async fn list_categories(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let order = state.store.get_category_order()?;
    let categories = state.store.list_categories(&order)?;
    Ok::<_, ApiError>(Json(categories))
}

pub async fn update_category_order(
    _auth: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Json(req): Json<CategoryOrderPayload>,
) -> impl IntoResponse {
    state.store.put_category_order(&req.order)?;
    Ok::<_, ApiError>(Json(CategoryOrderPayload { order: req.order }))
}
