use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::{Html, Response};
use axum::routing::{get, post, put};
use axum::Router;

use super::{links, session, settings, status};
use crate::auth::TokenService;
use crate::store::Store;

const STATUS_CHECK_TIMEOUT: Duration = Duration::from_secs(5);

pub struct AppState {
    pub store: Arc<dyn Store>,
    pub tokens: TokenService,
    /// Shared client for the reachability check; carries the bounded
    /// timeout so a dead upstream cannot stall a request indefinitely.
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, tokens: TokenService) -> Self {
        let http = reqwest::Client::builder()
            .timeout(STATUS_CHECK_TIMEOUT)
            .build()
            .expect("build http client");

        Self {
            store,
            tokens,
            http,
        }
    }
}

async fn health() -> &'static str {
    "OK"
}

async fn index() -> Html<&'static str> {
    Html(include_str!("../../assets/index.html"))
}

async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    let response = next.run(request).await;

    let latency = start.elapsed();
    let status = response.status();

    tracing::info!(
        "{} {} {} {}ms",
        method,
        uri.path(),
        status.as_u16(),
        latency.as_millis()
    );

    response
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/api/check_status", get(status::check_status))
        .route("/api/auth/login", post(session::login))
        .route("/api/auth/change-password", post(session::change_password))
        .route(
            "/api/settings",
            get(settings::get_settings).put(settings::update_settings),
        )
        .route(
            "/api/links",
            get(links::list_links).post(links::create_link),
        )
        .route("/api/links/reorder", put(links::reorder_links))
        .route(
            "/api/links/{id}",
            put(links::update_link).delete(links::delete_link),
        )
        .route("/api/links/{id}/click", post(links::track_click))
        .route("/api/categories", get(links::list_categories))
        .route("/api/categories/order", put(links::update_category_order))
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}
