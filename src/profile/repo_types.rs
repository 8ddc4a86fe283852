use sqlx::{types::Json, FromRow};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::nutrition::{DerivedTargets, MacroSplit, ProfileParameters};

/// Profile parameters plus the targets derived from them at save time.
#[derive(Debug, Clone, FromRow)]
pub struct ProfileRow {
    pub user_id: Uuid,
    pub params: Json<ProfileParameters>,
    pub bmr: f64,
    pub tdee: f64,
    pub target_calories: i64,
    pub protein_g: i64,
    pub fats_g: i64,
    pub carbs_g: i64,
    pub updated_at: OffsetDateTime,
}

impl ProfileRow {
    pub fn targets(&self) -> DerivedTargets {
        DerivedTargets {
            bmr: self.bmr,
            tdee: self.tdee,
            calories: self.target_calories,
            macros: MacroSplit {
                protein: self.protein_g,
                fats: self.fats_g,
                carbs: self.carbs_g,
            },
        }
    }
}
