/**
 * Session Middleware
 *
 * Protects the authenticated route group. The session JWT travels in the
 * `token` cookie; this middleware verifies it once at the boundary and
 * attaches a typed `AuthUser` (the user id) to request extensions.
 * Handlers take `AuthUser` as an extractor and never touch raw claims.
 *
 * Verification is purely cryptographic: a valid, unexpired token is
 * sufficient, no user lookup per request.
 */

use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;
use uuid::Uuid;

use crate::auth::cookies::{cookie_value, SESSION_COOKIE};
use crate::auth::sessions::verify_token;
use crate::error::ApiError;
use crate::server::state::AppState;

/// The authenticated caller, injected by `session_middleware`.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub Uuid);

pub async fn session_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = cookie_value(request.headers(), SESSION_COOKIE).ok_or_else(|| {
        tracing::warn!("Missing session cookie");
        ApiError::Unauthorized
    })?;

    let claims = verify_token(token, &state.config.jwt_secret).map_err(|err| {
        tracing::warn!("Invalid session token: {:?}", err);
        ApiError::Unauthorized
    })?;

    let user_id = Uuid::parse_str(&claims.sub).map_err(|_| {
        tracing::warn!("Session token subject is not a user id");
        ApiError::Unauthorized
    })?;

    request.extensions_mut().insert(AuthUser(user_id));
    Ok(next.run(request).await)
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .copied()
            .ok_or(ApiError::Unauthorized)
    }
}
