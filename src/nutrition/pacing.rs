use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use time::Date;

/// Allowed deviation from the planned weight, kg. Inclusive.
pub const PACING_TOLERANCE_KG: f64 = 0.2;
// Keeps 80.2 - 80.0 (= 0.2000000000000028) inside the tolerance.
const EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightGoal {
    pub start_weight: f64,
    pub target_weight: f64,
    pub start_date: Date,
    pub end_date: Date,
}

impl WeightGoal {
    /// Calendar days covered, both ends included. Zero when the range is inverted.
    pub fn total_days(&self) -> i64 {
        ((self.end_date - self.start_date).whole_days() + 1).max(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyPacingEntry {
    pub date: Date,
    pub expected: f64,
    /// `None` when nothing was logged that day.
    pub actual: Option<f64>,
}

impl DailyPacingEntry {
    pub fn status(&self) -> PacingStatus {
        classify_pacing(self.expected, self.actual)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PacingStatus {
    Good,
    TooFast,
    Slow,
    Neutral,
}

/// One entry per day from `start_date` to `end_date`, expected weight interpolated
/// linearly. Later log entries for the same date replace earlier ones.
pub fn build_daily_pacing<I>(goal: &WeightGoal, logs: I) -> Vec<DailyPacingEntry>
where
    I: IntoIterator<Item = (Date, f64)>,
{
    let total = goal.total_days();
    if total == 0 {
        return Vec::new();
    }
    let logged: BTreeMap<Date, f64> = logs.into_iter().collect();
    let drop = goal.start_weight - goal.target_weight;

    let mut out = Vec::with_capacity(total as usize);
    let mut date = goal.start_date;
    for i in 0..total {
        let expected = if total == 1 {
            goal.target_weight
        } else {
            goal.start_weight - drop * (i as f64 / (total - 1) as f64)
        };
        out.push(DailyPacingEntry {
            date,
            expected,
            actual: logged.get(&date).copied(),
        });
        match date.next_day() {
            Some(d) => date = d,
            None => break,
        }
    }
    out
}

pub fn classify_pacing(expected: f64, actual: Option<f64>) -> PacingStatus {
    let Some(actual) = actual else {
        return PacingStatus::Neutral;
    };
    let diff = actual - expected;
    if diff.abs() <= PACING_TOLERANCE_KG + EPSILON {
        PacingStatus::Good
    } else if diff < 0.0 {
        PacingStatus::TooFast
    } else {
        PacingStatus::Slow
    }
}

/// Share of the planned change already achieved, in percent, clamped to 0..=100.
pub fn goal_progress(goal: &WeightGoal, current_weight: f64) -> f64 {
    let planned = goal.start_weight - goal.target_weight;
    if planned == 0.0 {
        return 100.0;
    }
    ((goal.start_weight - current_weight) / planned * 100.0).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn goal(start: Date, end: Date) -> WeightGoal {
        WeightGoal {
            start_weight: 90.0,
            target_weight: 80.0,
            start_date: start,
            end_date: end,
        }
    }

    #[test]
    fn two_day_goal_hits_both_endpoints() {
        let g = goal(date!(2024 - 03 - 01), date!(2024 - 03 - 02));
        let entries = build_daily_pacing(&g, Vec::new());
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].expected, 90.0);
        assert_eq!(entries[1].expected, 80.0);
        assert_eq!(entries[1].date, date!(2024 - 03 - 02));
    }

    #[test]
    fn single_day_goal_expects_target() {
        let g = goal(date!(2024 - 03 - 01), date!(2024 - 03 - 01));
        let entries = build_daily_pacing(&g, Vec::new());
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].expected, 80.0);
    }

    #[test]
    fn interpolates_linearly_across_month_boundary() {
        let g = goal(date!(2024 - 02 - 28), date!(2024 - 03 - 04));
        let entries = build_daily_pacing(&g, Vec::new());
        // 28, 29 (leap), 1, 2, 3, 4
        assert_eq!(entries.len(), 6);
        assert!((entries[1].expected - 88.0).abs() < 1e-9);
        assert!((entries[3].expected - 84.0).abs() < 1e-9);
        assert_eq!(entries[5].expected, 80.0);
    }

    #[test]
    fn inverted_range_is_empty() {
        let g = goal(date!(2024 - 03 - 05), date!(2024 - 03 - 01));
        assert!(build_daily_pacing(&g, Vec::new()).is_empty());
        assert_eq!(g.total_days(), 0);
    }

    #[test]
    fn actual_only_on_logged_days() {
        let g = goal(date!(2024 - 03 - 01), date!(2024 - 03 - 03));
        let logs = vec![
            (date!(2024 - 03 - 02), 86.0),
            (date!(2024 - 03 - 02), 85.5),
            (date!(2024 - 02 - 20), 91.0),
        ];
        let entries = build_daily_pacing(&g, logs);
        assert_eq!(entries[0].actual, None);
        assert_eq!(entries[1].actual, Some(85.5));
        assert_eq!(entries[2].actual, None);
        assert_eq!(entries[1].status(), PacingStatus::Slow);
        assert_eq!(entries[0].status(), PacingStatus::Neutral);
    }

    #[test]
    fn classification_boundaries() {
        assert_eq!(classify_pacing(80.0, Some(80.2)), PacingStatus::Good);
        assert_eq!(classify_pacing(80.0, Some(79.8)), PacingStatus::Good);
        assert_eq!(classify_pacing(80.0, Some(79.5)), PacingStatus::TooFast);
        assert_eq!(classify_pacing(80.0, Some(80.5)), PacingStatus::Slow);
        assert_eq!(classify_pacing(80.0, None), PacingStatus::Neutral);
    }

    #[test]
    fn zero_is_a_measurement() {
        assert_eq!(classify_pacing(80.0, Some(0.0)), PacingStatus::TooFast);
    }

    #[test]
    fn progress_is_clamped() {
        let g = goal(date!(2024 - 03 - 01), date!(2024 - 03 - 31));
        assert_eq!(goal_progress(&g, 85.0), 50.0);
        assert_eq!(goal_progress(&g, 92.0), 0.0);
        assert_eq!(goal_progress(&g, 78.0), 100.0);
    }

    #[test]
    fn status_serializes_camel_case() {
        let s = serde_json::to_string(&PacingStatus::TooFast).unwrap();
        assert_eq!(s, "\"tooFast\"");
    }
}
