/**
 * Auth Request/Response Types
 *
 * DTOs for the auth endpoints plus the input validation shared by signup
 * and login. Validation runs at the boundary, before any database work:
 * email must be non-empty, at most 30 characters, and RFC-shaped
 * (local@domain.tld); the password must be 6-30 characters.
 */

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::users::User;
use crate::error::ApiError;

/// Signup request body.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Public view of a user. Never contains the password hash.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub username: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            username: user.username,
        }
    }
}

/// Body of the `GET /csrf` response.
#[derive(Debug, Serialize)]
pub struct CsrfResponse {
    pub csrf_token: String,
}

/// Loose RFC-shape check: one `@`, a non-empty local part, and a domain
/// with at least one dot and no leading/trailing dot.
fn is_email_shaped(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !domain.contains('@')
}

/// Validate credentials for signup and login.
pub fn validate_credentials(email: &str, password: &str) -> Result<(), ApiError> {
    if email.is_empty() {
        return Err(ApiError::validation("email", "is required"));
    }
    if email.chars().count() > 30 {
        return Err(ApiError::validation("email", "must be at most 30 characters"));
    }
    if !is_email_shaped(email) {
        return Err(ApiError::validation("email", "is not a valid address"));
    }
    let password_len = password.chars().count();
    if !(6..=30).contains(&password_len) {
        return Err(ApiError::validation(
            "password",
            "must be between 6 and 30 characters",
        ));
    }
    Ok(())
}
