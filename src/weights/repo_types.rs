use serde::Serialize;
use sqlx::FromRow;
use time::Date;

use crate::nutrition::WeightGoal;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct WeightLog {
    #[sqlx(rename = "log_date")]
    pub date: Date,
    #[sqlx(rename = "weight_kg")]
    pub weight: f64,
}

#[derive(Debug, Clone, FromRow)]
pub struct WeightGoalRow {
    pub start_weight: f64,
    pub target_weight: f64,
    pub start_date: Date,
    pub end_date: Date,
}

impl From<WeightGoalRow> for WeightGoal {
    fn from(r: WeightGoalRow) -> Self {
        Self {
            start_weight: r.start_weight,
            target_weight: r.target_weight,
            start_date: r.start_date,
            end_date: r.end_date,
        }
    }
}
