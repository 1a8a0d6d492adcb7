/**
 * Diary Service
 *
 * Orchestrates the diary lifecycle. The centerpiece is
 * `create_diary_with_music`: one transaction that inserts the diary row,
 * calls the external generation API, and inserts the music row. Any
 * failure drops the uncommitted transaction, rolling back the diary
 * insert too — a diary never exists without its music, and vice versa.
 *
 * The external call deliberately runs inside the open transaction. The
 * cost is a transaction held for the provider's latency; the benefit is
 * the 1:1 invariant without compensation logic. Fine at personal scale,
 * and explicitly out of scope to optimize.
 */

use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;

use crate::diary::db;
use crate::diary::types::{
    Diary, DiaryDatesResponse, DiaryResponse, PaginatedDiaries,
};
use crate::error::ApiError;
use crate::music::client::MusicClient;
use crate::music::db::{self as music_db, MusicData};

/// Default generation flags: let the provider derive title and lyrics,
/// vocals on.
const DEFAULT_IS_AUTO: i32 = 1;
const DEFAULT_INSTRUMENTAL: i32 = 0;

/// Maximum diary content length in characters.
pub const MAX_CONTENT_CHARS: usize = 1000;

/// Validate diary content: non-empty, at most 1000 characters. Runs
/// before any persistence on both create and update.
pub fn validate_content(content: &str) -> Result<(), ApiError> {
    let chars = content.chars().count();
    if chars == 0 {
        return Err(ApiError::validation("content", "is required"));
    }
    if chars > MAX_CONTENT_CHARS {
        return Err(ApiError::validation(
            "content",
            "must be between 1 and 1000 characters",
        ));
    }
    Ok(())
}

/// Create a diary entry together with its generated music, atomically.
///
/// 1. Validate the content.
/// 2. Begin a transaction and insert the diary row.
/// 3. Call the generation API with the diary text as the prompt.
/// 4. Insert the music row linked to the new diary id.
/// 5. Commit. Any error on the way out rolls everything back.
pub async fn create_diary_with_music(
    pool: &PgPool,
    music: &MusicClient,
    user_id: Uuid,
    content: &str,
) -> Result<DiaryResponse, ApiError> {
    validate_content(content)?;

    let mut tx = pool.begin().await?;

    let diary = db::insert_diary(&mut *tx, user_id, content).await?;

    // The diary text doubles as the generation prompt. A failure here
    // aborts the transaction and the diary row above is never committed.
    let track = music
        .generate(content, DEFAULT_IS_AUTO, DEFAULT_INSTRUMENTAL)
        .await?;

    let record = music_db::insert_music(
        &mut *tx,
        diary.id,
        content,
        DEFAULT_IS_AUTO,
        DEFAULT_INSTRUMENTAL,
        &track,
    )
    .await?;

    tx.commit().await?;

    tracing::info!("Created diary {} with music {}", diary.id, record.id);

    Ok(DiaryResponse::new(diary, vec![MusicData::from(record)]))
}

/// One page of the caller's entries, most recent first, music attached.
pub async fn get_all_diaries(
    pool: &PgPool,
    user_id: Uuid,
    page: i64,
    page_size: i64,
) -> Result<PaginatedDiaries, ApiError> {
    let total_items = db::count_diaries(pool, user_id).await?;
    let offset = page_offset(page, page_size);
    let diaries = db::list_diaries(pool, user_id, page_size, offset).await?;

    let ids: Vec<i64> = diaries.iter().map(|d| d.id).collect();
    let mut by_diary: HashMap<i64, Vec<MusicData>> = HashMap::new();
    for music in music_db::musics_for_diaries(pool, &ids).await? {
        by_diary
            .entry(music.diary_id)
            .or_default()
            .push(MusicData::from(music));
    }

    let data = diaries
        .into_iter()
        .map(|diary: Diary| {
            let music = by_diary.remove(&diary.id).unwrap_or_default();
            DiaryResponse::new(diary, music)
        })
        .collect();

    Ok(PaginatedDiaries {
        data,
        total_items,
        page,
        page_size,
        total_pages: total_pages(total_items, page_size),
    })
}

/// One entry with its music; ownership mismatch is a plain not-found.
pub async fn get_diary_by_id(
    pool: &PgPool,
    user_id: Uuid,
    diary_id: i64,
) -> Result<DiaryResponse, ApiError> {
    let diary = db::get_diary(pool, user_id, diary_id)
        .await?
        .ok_or(ApiError::NotFound("diary"))?;

    let music = music_db::music_for_diary(pool, diary.id)
        .await?
        .map(MusicData::from)
        .into_iter()
        .collect();

    Ok(DiaryResponse::new(diary, music))
}

/// Update an entry's content. Music is not regenerated.
pub async fn update_diary(
    pool: &PgPool,
    user_id: Uuid,
    diary_id: i64,
    content: &str,
) -> Result<DiaryResponse, ApiError> {
    validate_content(content)?;

    let diary = db::update_diary(pool, user_id, diary_id, content)
        .await?
        .ok_or(ApiError::NotFound("diary"))?;

    let music = music_db::music_for_diary(pool, diary.id)
        .await?
        .map(MusicData::from)
        .into_iter()
        .collect();

    Ok(DiaryResponse::new(diary, music))
}

/// Delete an entry and its music in one transaction. Ownership is
/// checked before either row is touched, so a foreign diary id deletes
/// nothing at all.
pub async fn delete_diary(
    pool: &PgPool,
    user_id: Uuid,
    diary_id: i64,
) -> Result<(), ApiError> {
    let mut tx = pool.begin().await?;

    if !db::diary_exists(&mut *tx, user_id, diary_id).await? {
        return Err(ApiError::NotFound("diary"));
    }

    // Music first: the FK on musics.diary_id would block the diary delete.
    music_db::delete_music_for_diary(&mut *tx, diary_id).await?;

    let deleted = db::delete_diary_row(&mut *tx, user_id, diary_id).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound("diary"));
    }

    tx.commit().await?;
    tracing::info!("Deleted diary {}", diary_id);
    Ok(())
}

/// Per-day entry counts for a calendar month. Year/month arrive as raw
/// query strings; unparsable values fall through to a month no entry can
/// match, yielding an empty set rather than an error.
pub async fn get_diary_dates(
    pool: &PgPool,
    user_id: Uuid,
    year: &str,
    month: &str,
) -> Result<DiaryDatesResponse, ApiError> {
    let year = year.trim().parse::<i32>().unwrap_or(0);
    let month = month.trim().parse::<i32>().unwrap_or(0);

    let dates = db::diary_date_counts(pool, user_id, year, month).await?;
    Ok(DiaryDatesResponse { dates })
}

/// Zero-based row offset for a page. Saturates, so an absurdly large
/// page number yields an empty page instead of overflowing into a
/// negative OFFSET.
fn page_offset(page: i64, page_size: i64) -> i64 {
    page.saturating_sub(1).saturating_mul(page_size)
}

/// `ceil(total / page_size)` in integer arithmetic.
fn total_pages(total_items: i64, page_size: i64) -> i64 {
    if page_size <= 0 {
        return 0;
    }
    (total_items + page_size - 1) / page_size
}
