//! API error taxonomy and conversion to HTTP responses.
//!
//! - **`types`** - The `ApiError` enum and its status-code mapping
//! - **`conversion`** - `IntoResponse` producing the JSON error body

pub mod conversion;
pub mod types;

pub use types::ApiError;
