#![allow(dead_code)]

use std::sync::{Arc, LazyLock};

use ambiental_api::auth::jwt::{generate_access_token, JwtConfig};
use ambiental_api::auth::password::hash_password;
use ambiental_api::auth::provider::{StaticCredential, StaticCredentialProvider};
use ambiental_api::config::{ServerConfig, StoreBackend};
use ambiental_api::router::build_app_router;
use ambiental_api::state::AppState;
use ambiental_core::auth::{AuthStrategy, AuthenticatedUser};
use ambiental_core::debounce::DEFAULT_DEBOUNCE;
use ambiental_core::roles::Role;
use ambiental_core::types::Record;
use ambiental_db::memory::MemoryTableStore;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

/// Password shared by every test user.
pub const TEST_PASSWORD: &str = "clave-de-prueba";

/// Hashed once per test binary; Argon2 is slow in debug builds.
static TEST_HASH: LazyLock<String> =
    LazyLock::new(|| hash_password(TEST_PASSWORD).expect("hashing should succeed"));

/// Build a test `ServerConfig` with safe defaults and an in-memory store.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 15,
        },
        store: StoreBackend::Memory,
        auth_provider: AuthStrategy::Static,
        static_users: String::new(),
        search_debounce: DEFAULT_DEBOUNCE,
    }
}

/// One static login per role, named after the role.
pub fn test_users() -> Vec<StaticCredential> {
    [Role::SuperAdmin, Role::Admin, Role::User, Role::Viewer, Role::Guest]
        .into_iter()
        .map(|role| StaticCredential {
            username: role.as_str().to_string(),
            role,
            password_hash: TEST_HASH.clone(),
        })
        .collect()
}

/// Build the full application router over `store`, using the same middleware
/// stack as production.
pub fn build_test_app(store: Arc<MemoryTableStore>) -> Router {
    let auth = Arc::new(StaticCredentialProvider::new(test_users()));
    build_app_router(AppState::new(test_config(), store, auth))
}

/// A valid access token for a user with `role`.
pub fn token_for(role: Role) -> String {
    let user = AuthenticatedUser {
        username: role.as_str().to_string(),
        display_name: None,
        role,
    };
    generate_access_token(&user, &test_config().jwt).expect("token generation should succeed")
}

/// Unwrap a `json!({...})` literal into a [`Record`].
pub fn record(value: Value) -> Record {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
