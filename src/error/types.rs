/**
 * API Error Types
 *
 * One error enum covers the whole request path. Each variant carries
 * enough context for a useful client message, and `status_code()` maps
 * variants to HTTP statuses:
 *
 * - Validation (bad input shape or length)        -> 400
 * - Unauthorized (bad credentials, bad session)   -> 401
 * - Forbidden (CSRF mismatch)                     -> 403
 * - NotFound (missing row or ownership mismatch)  -> 404
 * - Conflict (duplicate email)                    -> 409
 * - MusicGeneration (upstream API failure)        -> 502
 * - Database / Internal                           -> 500
 *
 * Ownership mismatches surface as `NotFound` — a caller probing another
 * user's diary ids learns nothing about their existence. Database and
 * internal errors are logged server-side but reach the client as a
 * generic message.
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::music::client::MusicError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Input failed validation before any persistence happened
    #[error("{field}: {message}")]
    Validation {
        field: &'static str,
        message: &'static str,
    },

    /// Missing/invalid session or bad credentials. Deliberately carries
    /// no detail: "wrong password" and "no such user" are the same error.
    #[error("authentication required")]
    Unauthorized,

    /// CSRF token missing or not matching the cookie
    #[error("invalid csrf token")]
    Forbidden,

    /// The entity does not exist, or is not owned by the caller
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Uniqueness conflict (duplicate email on signup)
    #[error("{0}")]
    Conflict(&'static str),

    /// The external music-generation call failed; the enclosing diary
    /// transaction has been rolled back
    #[error("music generation failed: {0}")]
    MusicGeneration(#[from] MusicError),

    /// Storage failure (constraint violation, connection loss)
    #[error("database error")]
    Database(#[from] sqlx::Error),

    /// Anything else that should never reach the client in detail
    #[error("internal server error")]
    Internal,
}

impl ApiError {
    pub fn validation(field: &'static str, message: &'static str) -> Self {
        Self::Validation { field, message }
    }

    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::MusicGeneration(_) => StatusCode::BAD_GATEWAY,
            Self::Database(_) | Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message. Internal variants collapse to a generic
    /// string; details stay in the server logs.
    pub fn message(&self) -> String {
        match self {
            Self::Database(_) | Self::Internal => "internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<bcrypt::BcryptError> for ApiError {
    fn from(err: bcrypt::BcryptError) -> Self {
        tracing::error!("bcrypt failure: {:?}", err);
        Self::Internal
    }
}

impl From<jsonwebtoken::errors::Error> for ApiError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        tracing::error!("token signing failure: {:?}", err);
        Self::Internal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_bad_request() {
        let err = ApiError::validation("content", "must not be empty");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "content: must not be empty");
    }

    #[test]
    fn ownership_mismatch_is_not_found() {
        let err = ApiError::NotFound("diary");
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.message(), "diary not found");
    }

    #[test]
    fn unauthorized_carries_no_detail() {
        assert_eq!(ApiError::Unauthorized.message(), "authentication required");
        assert_eq!(ApiError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn database_errors_are_masked() {
        let err = ApiError::Database(sqlx::Error::RowNotFound);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message(), "internal server error");
    }

    #[test]
    fn music_failure_is_bad_gateway() {
        let err = ApiError::MusicGeneration(MusicError::Empty);
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
    }
}
