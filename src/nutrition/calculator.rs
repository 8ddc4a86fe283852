//! Daily energy and macro targets.
//!
//! BMR uses the original Harris–Benedict equation (not Mifflin-St Jeor). Inputs are not
//! validated here: zero or negative values flow through the arithmetic unchanged, so
//! callers are expected to supply plausible body parameters.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Lower bound for any recommended daily intake, kcal.
pub const MIN_TARGET_CALORIES: i64 = 1000;
/// Protein allocation, grams per kg of body weight.
pub const PROTEIN_G_PER_KG: f64 = 1.8;
/// Fat allocation, grams per kg of body weight.
pub const FAT_G_PER_KG: f64 = 1.0;
pub const KCAL_PER_G_PROTEIN: i64 = 4;
pub const KCAL_PER_G_FAT: i64 = 9;
pub const KCAL_PER_G_CARBS: f64 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

/// Activity multiplier applied to BMR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityLevel {
    /// Little or no exercise.
    Sedentary,
    /// Light exercise 1-3 days a week.
    Light,
    /// Moderate exercise 3-5 days a week.
    Moderate,
    /// Hard exercise 6-7 days a week.
    High,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 4] = [
        ActivityLevel::Sedentary,
        ActivityLevel::Light,
        ActivityLevel::Moderate,
        ActivityLevel::High,
    ];

    pub fn factor(self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::High => 1.725,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Light => "light",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::High => "high",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.as_str() == s)
    }
}

/// Fixed deficit options offered for weight loss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeficitStep {
    /// 300 kcal/day
    Mild,
    /// 500 kcal/day
    Moderate,
    /// 700 kcal/day
    Aggressive,
}

impl DeficitStep {
    pub fn kcal(self) -> i64 {
        match self {
            DeficitStep::Mild => 300,
            DeficitStep::Moderate => 500,
            DeficitStep::Aggressive => 700,
        }
    }
}

/// Offset between TDEE and the intake target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum CalorieAdjustment {
    Deficit(DeficitStep),
    Maintenance,
    /// Extra kcal/day on top of TDEE.
    Surplus(u32),
}

impl CalorieAdjustment {
    /// Value subtracted from TDEE: positive for a deficit, negative for a surplus.
    pub fn deficit_kcal(self) -> f64 {
        match self {
            CalorieAdjustment::Deficit(step) => step.kcal() as f64,
            CalorieAdjustment::Maintenance => 0.0,
            CalorieAdjustment::Surplus(kcal) => -(kcal as f64),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileParameters {
    pub sex: Sex,
    /// kg
    pub weight: f64,
    /// cm
    pub height: f64,
    /// years
    pub age: u32,
    pub activity: ActivityLevel,
    pub adjustment: CalorieAdjustment,
    #[serde(default)]
    pub goal_label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroSplit {
    pub protein: i64,
    pub fats: i64,
    /// May be negative when protein and fat alone exceed the calorie target.
    pub carbs: i64,
}

impl MacroSplit {
    /// `false` when the carb allocation went negative.
    pub fn is_feasible(&self) -> bool {
        self.carbs >= 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedTargets {
    pub bmr: f64,
    pub tdee: f64,
    pub calories: i64,
    pub macros: MacroSplit,
}

/// Rounds to the nearest integer, ties to even: `216.5 -> 216`, `217.5 -> 218`.
pub(crate) fn round_half_even(x: f64) -> i64 {
    x.round_ties_even() as i64
}

pub fn calc_bmr(sex: Sex, weight_kg: f64, height_cm: f64, age_years: f64) -> f64 {
    match sex {
        Sex::Male => 88.36 + 13.4 * weight_kg + 4.8 * height_cm - 5.7 * age_years,
        Sex::Female => 447.6 + 9.2 * weight_kg + 3.1 * height_cm - 4.3 * age_years,
    }
}

pub fn calc_tdee(bmr: f64, activity: ActivityLevel) -> f64 {
    bmr * activity.factor()
}

/// `max(1000, round(tdee - deficit))`; a negative deficit is a surplus.
pub fn calc_target_calories(tdee: f64, deficit_kcal: f64) -> i64 {
    round_half_even(tdee - deficit_kcal).max(MIN_TARGET_CALORIES)
}

pub fn calc_macros(weight_kg: f64, target_calories: i64) -> MacroSplit {
    let protein = round_half_even(weight_kg * PROTEIN_G_PER_KG);
    let fats = round_half_even(weight_kg * FAT_G_PER_KG);
    let rest = target_calories - protein * KCAL_PER_G_PROTEIN - fats * KCAL_PER_G_FAT;
    let carbs = round_half_even(rest as f64 / KCAL_PER_G_CARBS);
    MacroSplit {
        protein,
        fats,
        carbs,
    }
}

/// Full pipeline from body parameters to daily targets.
pub fn derive_targets(p: &ProfileParameters) -> DerivedTargets {
    let bmr = calc_bmr(p.sex, p.weight, p.height, p.age as f64);
    let tdee = calc_tdee(bmr, p.activity);
    let calories = calc_target_calories(tdee, p.adjustment.deficit_kcal());
    let macros = calc_macros(p.weight, calories);
    if !macros.is_feasible() {
        warn!(
            weight = p.weight,
            calories,
            carbs = macros.carbs,
            "protein and fat exceed calorie target, carbs negative"
        );
    }
    DerivedTargets {
        bmr,
        tdee,
        calories,
        macros,
    }
}
