use anyhow::Context;
use sqlx::PgPool;
use time::OffsetDateTime;
use uuid::Uuid;

use super::repo_types::Generation;

pub async fn insert(
    db: &PgPool,
    id: Uuid,
    user_id: Uuid,
    image_key: &str,
    result_text: &str,
) -> anyhow::Result<Generation> {
    let row = sqlx::query_as::<_, Generation>(
        r#"
        INSERT INTO generations (id, user_id, image_key, result_text)
        VALUES ($1, $2, $3, $4)
        RETURNING id, user_id, image_key, result_text, created_at
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(image_key)
    .bind(result_text)
    .fetch_one(db)
    .await
    .context("insert generation")?;
    Ok(row)
}

/// Newest first.
pub async fn list_by_user(
    db: &PgPool,
    user_id: Uuid,
    limit: i64,
    offset: i64,
) -> anyhow::Result<Vec<Generation>> {
    let rows = sqlx::query_as::<_, Generation>(
        r#"
        SELECT id, user_id, image_key, result_text, created_at
          FROM generations
         WHERE user_id = $1
         ORDER BY created_at DESC
         LIMIT $2 OFFSET $3
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(db)
    .await
    .context("list generations")?;
    Ok(rows)
}

pub async fn get(db: &PgPool, user_id: Uuid, id: Uuid) -> anyhow::Result<Option<Generation>> {
    let row = sqlx::query_as::<_, Generation>(
        r#"
        SELECT id, user_id, image_key, result_text, created_at
          FROM generations
         WHERE id = $1 AND user_id = $2
        "#,
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(db)
    .await
    .context("get generation")?;
    Ok(row)
}

/// Analysis texts created in `[from, to)`, oldest first.
pub async fn list_texts_between(
    db: &PgPool,
    user_id: Uuid,
    from: OffsetDateTime,
    to: OffsetDateTime,
) -> anyhow::Result<Vec<String>> {
    let rows: Vec<(String,)> = sqlx::query_as(
        r#"
        SELECT result_text
          FROM generations
         WHERE user_id = $1 AND created_at >= $2 AND created_at < $3
         ORDER BY created_at ASC
        "#,
    )
    .bind(user_id)
    .bind(from)
    .bind(to)
    .fetch_all(db)
    .await
    .context("list generation texts for day")?;
    Ok(rows.into_iter().map(|(t,)| t).collect())
}
