use anyhow::Context;
use sqlx::{types::Json, PgPool};
use uuid::Uuid;

use super::repo_types::ProfileRow;
use crate::nutrition::{DerivedTargets, ProfileParameters};

pub async fn get(db: &PgPool, user_id: Uuid) -> anyhow::Result<Option<ProfileRow>> {
    let row = sqlx::query_as::<_, ProfileRow>(
        r#"
        SELECT user_id, params, bmr, tdee, target_calories, protein_g, fats_g, carbs_g, updated_at
          FROM profiles
         WHERE user_id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(db)
    .await
    .context("get profile")?;
    Ok(row)
}

pub async fn upsert(
    db: &PgPool,
    user_id: Uuid,
    params: &ProfileParameters,
    targets: &DerivedTargets,
) -> anyhow::Result<ProfileRow> {
    let row = sqlx::query_as::<_, ProfileRow>(
        r#"
        INSERT INTO profiles (user_id, params, bmr, tdee, target_calories, protein_g, fats_g, carbs_g)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        ON CONFLICT (user_id) DO UPDATE
           SET params = EXCLUDED.params,
               bmr = EXCLUDED.bmr,
               tdee = EXCLUDED.tdee,
               target_calories = EXCLUDED.target_calories,
               protein_g = EXCLUDED.protein_g,
               fats_g = EXCLUDED.fats_g,
               carbs_g = EXCLUDED.carbs_g,
               updated_at = now()
        RETURNING user_id, params, bmr, tdee, target_calories, protein_g, fats_g, carbs_g, updated_at
        "#,
    )
    .bind(user_id)
    .bind(Json(params))
    .bind(targets.bmr)
    .bind(targets.tdee)
    .bind(targets.calories)
    .bind(targets.macros.protein)
    .bind(targets.macros.fats)
    .bind(targets.macros.carbs)
    .fetch_one(db)
    .await
    .context("upsert profile")?;
    Ok(row)
}
