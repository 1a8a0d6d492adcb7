/**
 * Diary Handlers
 *
 * HTTP handlers for the protected `/diaries` group. Query parameters are
 * parsed leniently: a missing, non-numeric, or out-of-range `page` falls
 * back to 1 and `page_size` to 10 (clamped to [1, 50]) instead of
 * rejecting the request. Year/month for the calendar view are passed
 * through as strings and resolved by the service the same way.
 */

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;

use crate::diary::service;
use crate::diary::types::{
    DiaryDatesResponse, DiaryRequest, DiaryResponse, PaginatedDiaries,
};
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::server::state::AppState;

const DEFAULT_PAGE: i64 = 1;
const DEFAULT_PAGE_SIZE: i64 = 10;
const MAX_PAGE_SIZE: i64 = 50;

#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub page: Option<String>,
    pub page_size: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DateParams {
    pub year: Option<String>,
    pub month: Option<String>,
}

/// Effective page number: anything below 1 or unparsable becomes 1.
fn clamp_page(raw: Option<&str>) -> i64 {
    match raw.and_then(|s| s.trim().parse::<i64>().ok()) {
        Some(page) if page >= 1 => page,
        _ => DEFAULT_PAGE,
    }
}

/// Effective page size: outside [1, 50] or unparsable becomes 10.
fn clamp_page_size(raw: Option<&str>) -> i64 {
    match raw.and_then(|s| s.trim().parse::<i64>().ok()) {
        Some(size) if (1..=MAX_PAGE_SIZE).contains(&size) => size,
        _ => DEFAULT_PAGE_SIZE,
    }
}

/// `GET /diaries?page&page_size`
pub async fn get_all_diaries(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(params): Query<PaginationParams>,
) -> Result<Json<PaginatedDiaries>, ApiError> {
    let page = clamp_page(params.page.as_deref());
    let page_size = clamp_page_size(params.page_size.as_deref());

    let response = service::get_all_diaries(&state.pool, user_id, page, page_size).await?;
    Ok(Json(response))
}

/// `GET /diaries/{diaryId}`
pub async fn get_diary_by_id(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(diary_id): Path<i64>,
) -> Result<Json<DiaryResponse>, ApiError> {
    let response = service::get_diary_by_id(&state.pool, user_id, diary_id).await?;
    Ok(Json(response))
}

/// `GET /diaries/dates?year&month`
pub async fn get_diary_dates(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(params): Query<DateParams>,
) -> Result<Json<DiaryDatesResponse>, ApiError> {
    let response = service::get_diary_dates(
        &state.pool,
        user_id,
        params.year.as_deref().unwrap_or(""),
        params.month.as_deref().unwrap_or(""),
    )
    .await?;
    Ok(Json(response))
}

/// `POST /diaries` — the create-with-music transaction.
pub async fn create_diary(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(request): Json<DiaryRequest>,
) -> Result<Json<DiaryResponse>, ApiError> {
    let response =
        service::create_diary_with_music(&state.pool, &state.music, user_id, &request.content)
            .await?;
    Ok(Json(response))
}

/// `PUT /diaries/{diaryId}`
pub async fn update_diary(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(diary_id): Path<i64>,
    Json(request): Json<DiaryRequest>,
) -> Result<Json<DiaryResponse>, ApiError> {
    let response =
        service::update_diary(&state.pool, user_id, diary_id, &request.content).await?;
    Ok(Json(response))
}

/// `DELETE /diaries/{diaryId}`
pub async fn delete_diary(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(diary_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    service::delete_diary(&state.pool, user_id, diary_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn page_defaults_to_one() {
        assert_eq!(clamp_page(None), 1);
        assert_eq!(clamp_page(Some("0")), 1);
        assert_eq!(clamp_page(Some("-3")), 1);
        assert_eq!(clamp_page(Some("abc")), 1);
        assert_eq!(clamp_page(Some("")), 1);
    }

    #[test]
    fn valid_page_is_kept() {
        assert_eq!(clamp_page(Some("1")), 1);
        assert_eq!(clamp_page(Some("42")), 42);
        // The largest representable page is still a valid page
        assert_eq!(clamp_page(Some("9223372036854775807")), i64::MAX);
    }

    #[test]
    fn page_size_defaults_to_ten() {
        assert_eq!(clamp_page_size(None), 10);
        assert_eq!(clamp_page_size(Some("0")), 10);
        assert_eq!(clamp_page_size(Some("51")), 10);
        assert_eq!(clamp_page_size(Some("-1")), 10);
        assert_eq!(clamp_page_size(Some("lots")), 10);
    }

    #[test]
    fn page_size_within_bounds_is_kept() {
        assert_eq!(clamp_page_size(Some("1")), 1);
        assert_eq!(clamp_page_size(Some("25")), 25);
        assert_eq!(clamp_page_size(Some("50")), 50);
    }
}
