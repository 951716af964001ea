use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use linkdeck::auth::{self, TokenService};
use linkdeck::server::{AppState, create_router};
use linkdeck::store::{SqliteStore, Store};

pub const TEST_PASSWORD: &str = "admin123";
pub const TEST_SECRET: &str = "test-signing-secret";

pub struct TestApp {
    pub router: Router,
    _temp_dir: TempDir,
}

/// Builds a full application against a fresh database in a temp dir, with
/// the admin credential already seeded.
pub fn test_app() -> TestApp {
    let temp_dir = TempDir::new().expect("create temp dir");
    let store = SqliteStore::new(temp_dir.path().join("linkdeck.db")).expect("open store");
    store.initialize().expect("initialize store");

    let hash = auth::hash_password(TEST_PASSWORD).expect("hash password");
    store.ensure_admin(&hash).expect("seed admin");

    let state = Arc::new(AppState::new(
        Arc::new(store),
        TokenService::new(TEST_SECRET),
    ));

    TestApp {
        router: create_router(state),
        _temp_dir: temp_dir,
    }
}

/// Sends one request through the router and returns (status, JSON body).
/// Non-JSON bodies come back as `Value::Null`.
pub async fn request(
    router: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .expect("build request"),
        None => builder.body(Body::empty()).expect("build request"),
    };

    let response = router.clone().oneshot(request).await.expect("send request");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, value)
}

/// Logs in with the seeded password and returns a bearer token.
pub async fn login(router: &Router) -> String {
    let (status, body) = request(
        router,
        "POST",
        "/api/auth/login",
        None,
        Some(serde_json::json!({ "password": TEST_PASSWORD })),
    )
    .await;

    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    body["access_token"]
        .as_str()
        .expect("access_token in response")
        .to_string()
}

/// Creates a link as admin and returns its id.
pub async fn create_link(router: &Router, token: &str, title: &str, category: &str) -> i64 {
    let (status, body) = request(
        router,
        "POST",
        "/api/links",
        Some(token),
        Some(serde_json::json!({
            "title": title,
            "url": format!("https://example.com/{title}"),
            "category": category,
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED, "create link failed: {body}");
    body["id"].as_i64().expect("link id")
}
