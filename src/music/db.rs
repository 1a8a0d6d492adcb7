/**
 * Music Store
 *
 * Persistence for generated music rows. Each row belongs to exactly one
 * diary entry (`diary_id` is UNIQUE) and is only ever created inside the
 * diary-creation transaction, which is why `insert_music` and
 * `delete_music_for_diary` take a `PgConnection` rather than the pool.
 */

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{PgConnection, PgPool};

use crate::music::client::GeneratedTrack;

/// A persisted music row.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Music {
    pub id: i64,
    pub diary_id: i64,
    /// Generation parameters as sent to the provider (0/1 flags)
    pub is_auto: i32,
    pub instrumental: i32,
    pub prompt: String,
    /// Generated artifact descriptors
    pub audio_file: String,
    pub image_file: String,
    pub item_uuid: String,
    pub title: String,
    pub lyrics: String,
    pub tags: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Client-facing view of a generated track, attached to diary responses.
#[derive(Debug, Clone, Serialize)]
pub struct MusicData {
    pub audio_file: String,
    pub image_file: String,
    pub item_uuid: String,
    pub title: String,
    pub lyric: String,
    pub tags: String,
}

impl From<Music> for MusicData {
    fn from(music: Music) -> Self {
        Self {
            audio_file: music.audio_file,
            image_file: music.image_file,
            item_uuid: music.item_uuid,
            title: music.title,
            lyric: music.lyrics,
            tags: music.tags,
        }
    }
}

/// Insert the music row for a freshly created diary entry. Runs on the
/// diary-creation transaction's connection.
pub async fn insert_music(
    conn: &mut PgConnection,
    diary_id: i64,
    prompt: &str,
    is_auto: i32,
    instrumental: i32,
    track: &GeneratedTrack,
) -> Result<Music, sqlx::Error> {
    sqlx::query_as::<_, Music>(
        r#"
        INSERT INTO musics
            (diary_id, is_auto, instrumental, prompt,
             audio_file, image_file, item_uuid, title, lyrics, tags)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING id, diary_id, is_auto, instrumental, prompt,
                  audio_file, image_file, item_uuid, title, lyrics, tags,
                  created_at, updated_at
        "#,
    )
    .bind(diary_id)
    .bind(is_auto)
    .bind(instrumental)
    .bind(prompt)
    .bind(&track.audio_file)
    .bind(&track.image_file)
    .bind(&track.item_uuid)
    .bind(&track.title)
    .bind(&track.lyric)
    .bind(&track.tags)
    .fetch_one(conn)
    .await
}

/// Fetch the music rows for a set of diary ids in one query, for the
/// eager attach on listing.
pub async fn musics_for_diaries(
    pool: &PgPool,
    diary_ids: &[i64],
) -> Result<Vec<Music>, sqlx::Error> {
    sqlx::query_as::<_, Music>(
        r#"
        SELECT id, diary_id, is_auto, instrumental, prompt,
               audio_file, image_file, item_uuid, title, lyrics, tags,
               created_at, updated_at
        FROM musics
        WHERE diary_id = ANY($1)
        "#,
    )
    .bind(diary_ids)
    .fetch_all(pool)
    .await
}

/// Fetch the single music row for one diary entry, if generated.
pub async fn music_for_diary(
    pool: &PgPool,
    diary_id: i64,
) -> Result<Option<Music>, sqlx::Error> {
    sqlx::query_as::<_, Music>(
        r#"
        SELECT id, diary_id, is_auto, instrumental, prompt,
               audio_file, image_file, item_uuid, title, lyrics, tags,
               created_at, updated_at
        FROM musics
        WHERE diary_id = $1
        "#,
    )
    .bind(diary_id)
    .fetch_optional(pool)
    .await
}

/// Delete the music row for a diary entry. Runs inside the diary-delete
/// transaction, after the ownership check and before the diary row goes.
pub async fn delete_music_for_diary(
    conn: &mut PgConnection,
    diary_id: i64,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM musics WHERE diary_id = $1")
        .bind(diary_id)
        .execute(conn)
        .await?;
    Ok(result.rows_affected())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn music_data_renames_lyrics_to_lyric() {
        let music = Music {
            id: 1,
            diary_id: 7,
            is_auto: 1,
            instrumental: 0,
            prompt: "a rainy evening".to_string(),
            audio_file: "https://files.example.com/a.mp3".to_string(),
            image_file: "https://files.example.com/i.png".to_string(),
            item_uuid: "uuid".to_string(),
            title: "Rain".to_string(),
            lyrics: "drip drop".to_string(),
            tags: "calm".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let data = MusicData::from(music);
        assert_eq!(data.lyric, "drip drop");

        let json = serde_json::to_value(&data).unwrap();
        assert!(json.get("lyric").is_some());
        assert!(json.get("lyrics").is_none());
    }
}
