/**
 * CSRF Token Handler
 *
 * `GET /csrf` mints a random token, sets it as a cookie, and returns it
 * in the body. State-changing requests must echo the token in the
 * `X-CSRF-Token` header; the CSRF middleware compares header and cookie
 * (double-submit pattern).
 */

use std::sync::Arc;

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::HeaderValue;
use axum::response::{IntoResponse, Json, Response};
use uuid::Uuid;

use crate::auth::cookies::csrf_cookie;
use crate::auth::handlers::types::CsrfResponse;
use crate::error::ApiError;
use crate::server::config::Config;

pub async fn csrf_token(State(config): State<Arc<Config>>) -> Result<Response, ApiError> {
    let token = Uuid::new_v4().to_string();

    let cookie = csrf_cookie(&token, &config.cookie_domain);
    let value = HeaderValue::from_str(&cookie).map_err(|_| ApiError::Internal)?;

    let mut response = Json(CsrfResponse { csrf_token: token }).into_response();
    response.headers_mut().insert(SET_COOKIE, value);
    Ok(response)
}
