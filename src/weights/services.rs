use serde::Serialize;
use time::Date;

use super::repo_types::WeightLog;
use crate::nutrition::{build_daily_pacing, goal_progress, PacingStatus, WeightGoal};

#[derive(Debug, Clone, Serialize)]
pub struct PacingDay {
    pub date: Date,
    pub expected: f64,
    pub actual: Option<f64>,
    pub status: PacingStatus,
}

#[derive(Debug, Serialize)]
pub struct PacingReport {
    pub goal: WeightGoal,
    pub days: Vec<PacingDay>,
    pub latest_weight: Option<f64>,
    /// Percent of the planned change achieved by the latest measurement.
    pub progress: Option<f64>,
}

/// Longest goal accepted, in days. Bounds the size of a pacing report.
pub const MAX_GOAL_DAYS: i64 = 3 * 366;

pub fn validate_goal(goal: &WeightGoal) -> Result<(), String> {
    if goal.end_date < goal.start_date {
        return Err("end_date must not precede start_date".into());
    }
    if goal.total_days() > MAX_GOAL_DAYS {
        return Err(format!("goal must not span more than {MAX_GOAL_DAYS} days"));
    }
    if !(goal.start_weight > 0.0 && goal.target_weight > 0.0) {
        return Err("weights must be positive".into());
    }
    Ok(())
}

/// `logs` must be ordered oldest first.
pub fn pacing_report(goal: WeightGoal, logs: &[WeightLog]) -> PacingReport {
    let days = build_daily_pacing(&goal, logs.iter().map(|l| (l.date, l.weight)))
        .into_iter()
        .map(|e| PacingDay {
            date: e.date,
            expected: e.expected,
            actual: e.actual,
            status: e.status(),
        })
        .collect();
    let latest_weight = logs.last().map(|l| l.weight);
    PacingReport {
        goal,
        days,
        latest_weight,
        progress: latest_weight.map(|w| goal_progress(&goal, w)),
    }
}
