/**
 * Error Conversion
 *
 * Implements `IntoResponse` for `ApiError` so handlers can return
 * `Result<_, ApiError>` directly. Every error becomes a JSON body:
 *
 * ```json
 * { "error": "content: must not be empty", "status": 400 }
 * ```
 */

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};

use crate::error::types::ApiError;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("request failed: {:?}", self);
        }

        let body = serde_json::json!({
            "error": self.message(),
            "status": status.as_u16(),
        });

        (status, Json(body)).into_response()
    }
}
