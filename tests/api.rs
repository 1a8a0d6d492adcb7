//! Router-level tests for the request guards and boundary validation.
//!
//! These run against the real router with a lazily-connected pool: every
//! asserted path (session rejection, CSRF checks, input validation) is
//! required to short-circuit before any query would execute, so no live
//! database is involved.

use axum_test::TestServer;
use serde_json::{json, Value};
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use melodiary::auth::sessions::create_token;
use melodiary::music::client::MusicClient;
use melodiary::routes::create_router;
use melodiary::server::config::Config;
use melodiary::server::state::AppState;

use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderName, HeaderValue};

const JWT_SECRET: &str = "integration-test-secret";
const CSRF: &str = "test-csrf-token";

fn csrf_header_name() -> HeaderName {
    HeaderName::from_static("x-csrf-token")
}

fn test_server() -> TestServer {
    let config = Config {
        database_url: "postgres://postgres@127.0.0.1:1/unreachable".to_string(),
        jwt_secret: JWT_SECRET.to_string(),
        music_api_key: "test-key".to_string(),
        music_api_url: "http://127.0.0.1:1".to_string(),
        frontend_origin: "http://localhost:3000".parse().unwrap(),
        cookie_domain: String::new(),
        port: 0,
    };

    // Lazy pool: no connection is attempted until a query runs, and the
    // paths under test never reach one.
    let pool = PgPoolOptions::new()
        .connect_lazy(&config.database_url)
        .expect("lazy pool");

    let music = MusicClient::new(config.music_api_url.clone(), config.music_api_key.clone());
    let state = AppState::new(pool, music, config);
    TestServer::new(create_router(state)).expect("test server")
}

fn session_cookie_header(user_id: Uuid) -> HeaderValue {
    let token = create_token(user_id, JWT_SECRET).expect("token");
    HeaderValue::from_str(&format!("token={}; csrf_token={}", token, CSRF)).expect("header")
}

fn csrf_only_cookie_header() -> HeaderValue {
    HeaderValue::from_str(&format!("csrf_token={}", CSRF)).expect("header")
}

#[tokio::test]
async fn csrf_endpoint_returns_token_and_cookie() {
    let server = test_server();

    let response = server.get("/csrf").await;
    response.assert_status_ok();

    let body: Value = response.json();
    let token = body["csrf_token"].as_str().expect("csrf_token in body");
    assert!(!token.is_empty());

    let set_cookie = response.header(SET_COOKIE);
    let set_cookie = set_cookie.to_str().expect("utf8 cookie");
    assert!(set_cookie.starts_with(&format!("csrf_token={}", token)));
    assert!(set_cookie.contains("HttpOnly"));
}

#[tokio::test]
async fn protected_routes_require_a_session() {
    let server = test_server();

    for path in ["/user", "/diaries", "/diaries/1", "/diaries/dates"] {
        let response = server.get(path).await;
        assert_eq!(response.status_code(), 401, "{}", path);
    }
}

#[tokio::test]
async fn garbage_session_token_is_rejected() {
    let server = test_server();

    let response = server
        .get("/diaries")
        .add_header(COOKIE, HeaderValue::from_static("token=not.a.jwt"))
        .await;
    assert_eq!(response.status_code(), 401);
}

#[tokio::test]
async fn token_signed_with_wrong_secret_is_rejected() {
    let server = test_server();

    let token = create_token(Uuid::new_v4(), "some-other-secret").unwrap();
    let cookie = HeaderValue::from_str(&format!("token={}; csrf_token={}", token, CSRF)).unwrap();

    let response = server
        .post("/diaries")
        .add_header(COOKIE, cookie)
        .add_header(csrf_header_name(), HeaderValue::from_static(CSRF))
        .json(&json!({"content": "hello"}))
        .await;
    assert_eq!(response.status_code(), 401);
}

#[tokio::test]
async fn state_changing_requests_need_the_csrf_token() {
    let server = test_server();

    // No CSRF cookie or header at all
    let response = server
        .post("/signup")
        .json(&json!({"email": "a@example.com", "username": "a", "password": "secret1"}))
        .await;
    assert_eq!(response.status_code(), 403);

    // Cookie present but header disagrees
    let response = server
        .post("/signup")
        .add_header(COOKIE, csrf_only_cookie_header())
        .add_header(csrf_header_name(), HeaderValue::from_static("different-token"))
        .json(&json!({"email": "a@example.com", "username": "a", "password": "secret1"}))
        .await;
    assert_eq!(response.status_code(), 403);
}

#[tokio::test]
async fn signup_validates_before_touching_storage() {
    let server = test_server();

    let cases = [
        json!({"email": "not-an-email", "username": "a", "password": "secret1"}),
        json!({"email": "", "username": "a", "password": "secret1"}),
        json!({"email": "a@example.com", "username": "a", "password": "short"}),
        json!({"email": format!("{}@example.com", "x".repeat(30)), "username": "a", "password": "secret1"}),
    ];

    for body in cases {
        let response = server
            .post("/signup")
            .add_header(COOKIE, csrf_only_cookie_header())
            .add_header(csrf_header_name(), HeaderValue::from_static(CSRF))
            .json(&body)
            .await;
        assert_eq!(response.status_code(), 400, "{}", body);

        let payload: Value = response.json();
        assert_eq!(payload["status"], 400);
        assert!(payload["error"].as_str().is_some());
    }
}

#[tokio::test]
async fn diary_content_is_validated_before_any_write() {
    let server = test_server();
    let cookie = session_cookie_header(Uuid::new_v4());

    // Empty content on create
    let response = server
        .post("/diaries")
        .add_header(COOKIE, cookie.clone())
        .add_header(csrf_header_name(), HeaderValue::from_static(CSRF))
        .json(&json!({"content": ""}))
        .await;
    assert_eq!(response.status_code(), 400);

    // Over-long content on update
    let response = server
        .put("/diaries/7")
        .add_header(COOKIE, cookie)
        .add_header(csrf_header_name(), HeaderValue::from_static(CSRF))
        .json(&json!({"content": "x".repeat(1001)}))
        .await;
    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn logout_clears_the_session_cookie() {
    let server = test_server();

    let response = server
        .post("/logout")
        .add_header(COOKIE, csrf_only_cookie_header())
        .add_header(csrf_header_name(), HeaderValue::from_static(CSRF))
        .await;
    response.assert_status_ok();

    let set_cookie = response.header(SET_COOKIE);
    let set_cookie = set_cookie.to_str().expect("utf8 cookie");
    assert!(set_cookie.starts_with("token=;"));
    assert!(set_cookie.contains("Max-Age=0"));
}
