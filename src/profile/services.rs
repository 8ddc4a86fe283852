use serde::Serialize;
use time::OffsetDateTime;
use tracing::info;
use uuid::Uuid;

use super::repo;
use super::repo_types::ProfileRow;
use crate::nutrition::{derive_targets, DerivedTargets, ProfileParameters};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ProfileView {
    pub params: ProfileParameters,
    pub targets: DerivedTargets,
    /// Human-readable notes about the targets (e.g. negative carbs).
    pub warnings: Vec<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<ProfileRow> for ProfileView {
    fn from(row: ProfileRow) -> Self {
        let targets = row.targets();
        Self {
            warnings: warnings_for(&targets),
            params: row.params.0,
            targets,
            updated_at: row.updated_at,
        }
    }
}

pub fn warnings_for(targets: &DerivedTargets) -> Vec<String> {
    let mut out = Vec::new();
    if !targets.macros.is_feasible() {
        out.push(format!(
            "Белки и жиры превышают норму калорий: углеводы {} г",
            targets.macros.carbs
        ));
    }
    out
}

/// Rejects non-positive body parameters. The calculator itself accepts anything.
pub fn validate(p: &ProfileParameters) -> Result<(), String> {
    if !(p.weight.is_finite() && p.weight > 0.0) {
        return Err("weight must be positive".into());
    }
    if !(p.height.is_finite() && p.height > 0.0) {
        return Err("height must be positive".into());
    }
    if p.age == 0 {
        return Err("age must be positive".into());
    }
    Ok(())
}

/// Derives fresh targets and persists them together with the parameters.
pub async fn save(
    st: &AppState,
    user_id: Uuid,
    params: ProfileParameters,
) -> anyhow::Result<ProfileView> {
    let targets = derive_targets(&params);
    let row = repo::upsert(&st.db, user_id, &params, &targets).await?;
    info!(%user_id, calories = targets.calories, "profile targets updated");
    Ok(row.into())
}
