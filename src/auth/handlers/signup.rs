/**
 * Signup Handler
 *
 * `POST /signup`: validate input, hash the password with bcrypt, insert
 * the user, and return the public user view with 201. A duplicate email
 * is detected through the unique constraint rather than a prior lookup,
 * so two racing signups cannot both succeed.
 */

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use bcrypt::{hash, DEFAULT_COST};
use sqlx::PgPool;

use crate::auth::handlers::types::{validate_credentials, SignupRequest, UserResponse};
use crate::auth::users::create_user;
use crate::error::ApiError;

pub async fn signup(
    State(pool): State<PgPool>,
    Json(request): Json<SignupRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    validate_credentials(&request.email, &request.password)?;

    let password_hash = hash(&request.password, DEFAULT_COST)?;

    let user = create_user(&pool, &request.email, &request.username, &password_hash)
        .await
        .map_err(|err| match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                tracing::warn!("Signup with already registered email");
                ApiError::Conflict("email already registered")
            }
            _ => ApiError::from(err),
        })?;

    tracing::info!("User created: {}", user.id);

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}
