/**
 * CSRF Middleware
 *
 * Double-submit check applied to the whole route table: POST, PUT, and
 * DELETE requests must carry an `X-CSRF-Token` header equal to the
 * `csrf_token` cookie issued by `GET /csrf`. Safe methods pass through
 * untouched.
 */

use axum::extract::Request;
use axum::http::Method;
use axum::middleware::Next;
use axum::response::Response;

use crate::auth::cookies::{cookie_value, CSRF_COOKIE};
use crate::error::ApiError;

/// Header the frontend echoes the token in.
pub const CSRF_HEADER: &str = "x-csrf-token";

pub async fn csrf_middleware(request: Request, next: Next) -> Result<Response, ApiError> {
    let method = request.method();
    if method == Method::GET || method == Method::HEAD || method == Method::OPTIONS {
        return Ok(next.run(request).await);
    }

    let cookie = cookie_value(request.headers(), CSRF_COOKIE);
    let header = request
        .headers()
        .get(CSRF_HEADER)
        .and_then(|v| v.to_str().ok());

    match (cookie, header) {
        (Some(cookie), Some(header)) if !cookie.is_empty() && cookie == header => {
            Ok(next.run(request).await)
        }
        _ => {
            tracing::warn!("CSRF check failed for {} {}", request.method(), request.uri());
            Err(ApiError::Forbidden)
        }
    }
}
