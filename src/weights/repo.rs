use anyhow::Context;
use sqlx::PgPool;
use time::Date;
use uuid::Uuid;

use super::repo_types::{WeightGoalRow, WeightLog};
use crate::nutrition::WeightGoal;

/// One measurement per day; logging again overwrites it.
pub async fn upsert_log(
    db: &PgPool,
    user_id: Uuid,
    date: Date,
    weight: f64,
) -> anyhow::Result<WeightLog> {
    let row = sqlx::query_as::<_, WeightLog>(
        r#"
        INSERT INTO weight_logs (user_id, log_date, weight_kg)
        VALUES ($1, $2, $3)
        ON CONFLICT (user_id, log_date) DO UPDATE
           SET weight_kg = EXCLUDED.weight_kg, created_at = now()
        RETURNING log_date, weight_kg
        "#,
    )
    .bind(user_id)
    .bind(date)
    .bind(weight)
    .fetch_one(db)
    .await
    .context("upsert weight log")?;
    Ok(row)
}

/// Oldest first.
pub async fn list_logs(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<WeightLog>> {
    let rows = sqlx::query_as::<_, WeightLog>(
        r#"
        SELECT log_date, weight_kg
          FROM weight_logs
         WHERE user_id = $1
         ORDER BY log_date ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await
    .context("list weight logs")?;
    Ok(rows)
}

pub async fn upsert_goal(db: &PgPool, user_id: Uuid, goal: &WeightGoal) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO weight_goals (user_id, start_weight, target_weight, start_date, end_date)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (user_id) DO UPDATE
           SET start_weight = EXCLUDED.start_weight,
               target_weight = EXCLUDED.target_weight,
               start_date = EXCLUDED.start_date,
               end_date = EXCLUDED.end_date,
               updated_at = now()
        "#,
    )
    .bind(user_id)
    .bind(goal.start_weight)
    .bind(goal.target_weight)
    .bind(goal.start_date)
    .bind(goal.end_date)
    .execute(db)
    .await
    .context("upsert weight goal")?;
    Ok(())
}

pub async fn get_goal(db: &PgPool, user_id: Uuid) -> anyhow::Result<Option<WeightGoal>> {
    let row = sqlx::query_as::<_, WeightGoalRow>(
        r#"
        SELECT start_weight, target_weight, start_date, end_date
          FROM weight_goals
         WHERE user_id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(db)
    .await
    .context("get weight goal")?;
    Ok(row.map(Into::into))
}
