/**
 * Current User Handler
 *
 * `GET /user` (protected): returns the public view of the session's
 * user. The session middleware has already verified the token; this
 * handler only resolves the id to a row.
 */

use axum::extract::State;
use axum::response::Json;
use sqlx::PgPool;

use crate::auth::handlers::types::UserResponse;
use crate::auth::users::get_user_by_id;
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;

pub async fn get_me(
    State(pool): State<PgPool>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<UserResponse>, ApiError> {
    let user = get_user_by_id(&pool, user_id)
        .await?
        .ok_or(ApiError::NotFound("user"))?;

    Ok(Json(UserResponse::from(user)))
}
