/**
 * Diary Store
 *
 * Raw queries for diary rows. Every owner-scoped query binds the user id
 * in the WHERE clause, so an entry belonging to someone else behaves
 * exactly like a missing one. Functions that participate in the
 * create/delete transactions take `&mut PgConnection`; standalone reads
 * take the pool.
 */

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::diary::types::{Diary, DiaryDateCount};

/// Insert a diary row. Runs on the creation transaction's connection.
pub async fn insert_diary(
    conn: &mut PgConnection,
    user_id: Uuid,
    content: &str,
) -> Result<Diary, sqlx::Error> {
    sqlx::query_as::<_, Diary>(
        r#"
        INSERT INTO diaries (user_id, content)
        VALUES ($1, $2)
        RETURNING id, user_id, content, created_at, updated_at
        "#,
    )
    .bind(user_id)
    .bind(content)
    .fetch_one(conn)
    .await
}

/// Total number of entries owned by the user.
pub async fn count_diaries(pool: &PgPool, user_id: Uuid) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM diaries WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(pool)
        .await
}

/// One page of the user's entries, most recent first.
pub async fn list_diaries(
    pool: &PgPool,
    user_id: Uuid,
    limit: i64,
    offset: i64,
) -> Result<Vec<Diary>, sqlx::Error> {
    sqlx::query_as::<_, Diary>(
        r#"
        SELECT id, user_id, content, created_at, updated_at
        FROM diaries
        WHERE user_id = $1
        ORDER BY created_at DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

/// One entry scoped to its owner; `None` covers both a missing row and
/// an ownership mismatch.
pub async fn get_diary(
    pool: &PgPool,
    user_id: Uuid,
    diary_id: i64,
) -> Result<Option<Diary>, sqlx::Error> {
    sqlx::query_as::<_, Diary>(
        r#"
        SELECT id, user_id, content, created_at, updated_at
        FROM diaries
        WHERE user_id = $1 AND id = $2
        "#,
    )
    .bind(user_id)
    .bind(diary_id)
    .fetch_optional(pool)
    .await
}

/// Update an entry's content, scoped to owner+id. `None` when zero rows
/// matched.
pub async fn update_diary(
    pool: &PgPool,
    user_id: Uuid,
    diary_id: i64,
    content: &str,
) -> Result<Option<Diary>, sqlx::Error> {
    sqlx::query_as::<_, Diary>(
        r#"
        UPDATE diaries
        SET content = $3, updated_at = NOW()
        WHERE user_id = $1 AND id = $2
        RETURNING id, user_id, content, created_at, updated_at
        "#,
    )
    .bind(user_id)
    .bind(diary_id)
    .bind(content)
    .fetch_optional(pool)
    .await
}

/// Ownership probe used by the delete transaction before any row is
/// touched.
pub async fn diary_exists(
    conn: &mut PgConnection,
    user_id: Uuid,
    diary_id: i64,
) -> Result<bool, sqlx::Error> {
    let found: Option<i64> =
        sqlx::query_scalar("SELECT id FROM diaries WHERE user_id = $1 AND id = $2")
            .bind(user_id)
            .bind(diary_id)
            .fetch_optional(conn)
            .await?;
    Ok(found.is_some())
}

/// Delete an entry scoped to owner+id, returning the affected row count.
pub async fn delete_diary_row(
    conn: &mut PgConnection,
    user_id: Uuid,
    diary_id: i64,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM diaries WHERE user_id = $1 AND id = $2")
        .bind(user_id)
        .bind(diary_id)
        .execute(conn)
        .await?;
    Ok(result.rows_affected())
}

/// Per-day entry counts for one calendar month, ascending by date.
/// A year or month matching nothing simply yields no rows.
pub async fn diary_date_counts(
    pool: &PgPool,
    user_id: Uuid,
    year: i32,
    month: i32,
) -> Result<Vec<DiaryDateCount>, sqlx::Error> {
    sqlx::query_as::<_, DiaryDateCount>(
        r#"
        SELECT TO_CHAR(DATE(created_at), 'YYYY-MM-DD') AS date, COUNT(*) AS count
        FROM diaries
        WHERE user_id = $1
          AND EXTRACT(YEAR FROM created_at)::int = $2
          AND EXTRACT(MONTH FROM created_at)::int = $3
        GROUP BY DATE(created_at)
        ORDER BY date
        "#,
    )
    .bind(user_id)
    .bind(year)
    .bind(month)
    .fetch_all(pool)
    .await
}
