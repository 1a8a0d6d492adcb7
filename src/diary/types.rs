/**
 * Diary Types
 *
 * The diary row, the client-facing DTOs, and the pagination envelope.
 * Music is attached to diary responses as a list of `MusicData` views
 * (at most one element given the 1:1 constraint, kept as a list to match
 * the wire format).
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::music::db::MusicData;

/// A diary row.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Diary {
    pub id: i64,
    pub user_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /diaries` and `PUT /diaries/{id}`.
#[derive(Debug, Deserialize)]
pub struct DiaryRequest {
    #[serde(default)]
    pub content: String,
}

/// Client view of a diary entry with its music attached.
#[derive(Debug, Serialize)]
pub struct DiaryResponse {
    pub id: i64,
    pub content: String,
    pub music: Vec<MusicData>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DiaryResponse {
    pub fn new(diary: Diary, music: Vec<MusicData>) -> Self {
        Self {
            id: diary.id,
            content: diary.content,
            music,
            created_at: diary.created_at,
            updated_at: diary.updated_at,
        }
    }
}

/// Paginated listing envelope.
#[derive(Debug, Serialize)]
pub struct PaginatedDiaries {
    pub data: Vec<DiaryResponse>,
    pub total_items: i64,
    pub page: i64,
    pub page_size: i64,
    pub total_pages: i64,
}

/// Per-day entry count for the activity calendar, `date` as `YYYY-MM-DD`.
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct DiaryDateCount {
    pub date: String,
    pub count: i64,
}

/// Body of `GET /diaries/dates`.
#[derive(Debug, Serialize)]
pub struct DiaryDatesResponse {
    pub dates: Vec<DiaryDateCount>,
}
