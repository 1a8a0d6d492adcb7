/**
 * Login and Logout Handlers
 *
 * `POST /login` verifies the password against the stored bcrypt hash and
 * sets the session cookie; `POST /logout` clears it.
 *
 * Unknown email and wrong password produce the same 401 so the endpoint
 * never reveals whether an address is registered. bcrypt's verify is the
 * constant-time comparison.
 */

use std::sync::Arc;

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use bcrypt::verify;

use crate::auth::cookies::{clear_session_cookie, session_cookie};
use crate::auth::handlers::types::{validate_credentials, LoginRequest};
use crate::auth::sessions::{create_token, SESSION_TTL_SECS};
use crate::auth::users::get_user_by_email;
use crate::error::ApiError;
use crate::server::config::Config;
use crate::server::state::AppState;

fn with_cookie(status: StatusCode, cookie: &str) -> Result<Response, ApiError> {
    let value = HeaderValue::from_str(cookie).map_err(|_| ApiError::Internal)?;
    let mut response = status.into_response();
    response.headers_mut().insert(SET_COOKIE, value);
    Ok(response)
}

pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Response, ApiError> {
    validate_credentials(&request.email, &request.password)?;

    let user = get_user_by_email(&state.pool, &request.email)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Login attempt for unknown email");
            ApiError::Unauthorized
        })?;

    if !verify(&request.password, &user.password_hash)? {
        tracing::warn!("Invalid password for user {}", user.id);
        return Err(ApiError::Unauthorized);
    }

    let token = create_token(user.id, &state.config.jwt_secret)?;
    tracing::info!("User logged in: {}", user.id);

    let cookie = session_cookie(&token, &state.config.cookie_domain, SESSION_TTL_SECS);
    with_cookie(StatusCode::OK, &cookie)
}

pub async fn logout(State(config): State<Arc<Config>>) -> Result<Response, ApiError> {
    let cookie = clear_session_cookie(&config.cookie_domain);
    with_cookie(StatusCode::OK, &cookie)
}
