/**
 * Router Configuration
 *
 * Builds the complete route table:
 *
 * Public:
 * - `POST /signup`, `POST /login`, `POST /logout`, `GET /csrf`
 *
 * Session-protected (`token` cookie):
 * - `GET  /user`
 * - `GET  /diaries?page&page_size`
 * - `GET  /diaries/dates?year&month`
 * - `GET  /diaries/{diaryId}`
 * - `POST /diaries`
 * - `PUT  /diaries/{diaryId}`
 * - `DELETE /diaries/{diaryId}`
 *
 * Cross-cutting layers, outermost first: request tracing, CORS
 * (credentials allowed for the configured frontend origin), and the CSRF
 * double-submit check on every state-changing request — the public auth
 * endpoints included.
 */

use axum::http::header::{ACCEPT, CONTENT_TYPE, ORIGIN};
use axum::http::{HeaderName, Method};
use axum::routing::{get, post};
use axum::{middleware, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::{csrf_token, get_me, login, logout, signup};
use crate::diary::handlers::{
    create_diary, delete_diary, get_all_diaries, get_diary_by_id, get_diary_dates,
    update_diary,
};
use crate::middleware::auth::session_middleware;
use crate::middleware::csrf::{csrf_middleware, CSRF_HEADER};
use crate::server::state::AppState;

fn cors_layer(state: &AppState) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(state.config.frontend_origin.clone())
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            ORIGIN,
            CONTENT_TYPE,
            ACCEPT,
            HeaderName::from_static(CSRF_HEADER),
        ])
        .allow_credentials(true)
}

/// Create the Axum router with all routes and layers configured.
pub fn create_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/user", get(get_me))
        .route("/diaries", get(get_all_diaries).post(create_diary))
        .route("/diaries/dates", get(get_diary_dates))
        .route(
            "/diaries/{diaryId}",
            get(get_diary_by_id).put(update_diary).delete(delete_diary),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            session_middleware,
        ));

    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/csrf", get(csrf_token))
        .merge(protected)
        .layer(middleware::from_fn(csrf_middleware))
        .layer(cors_layer(&state))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
