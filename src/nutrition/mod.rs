//! Pure nutrition logic: reading model output and computing daily targets.
//!
//! Nothing here does I/O or keeps state; derived values are recomputed from the stored
//! analysis text on every read.

pub mod calculator;
pub mod lexicon;
pub mod macros;
pub mod pacing;
pub mod summary;
pub mod title;

pub use calculator::{
    calc_bmr, calc_macros, calc_target_calories, calc_tdee, derive_targets, ActivityLevel,
    CalorieAdjustment, DeficitStep, DerivedTargets, MacroSplit, ProfileParameters, Sex,
};
pub use lexicon::Lexicon;
pub use macros::{extract_macros, extract_macros_with, ExtractedMacros};
pub use pacing::{
    build_daily_pacing, classify_pacing, goal_progress, DailyPacingEntry, PacingStatus,
    WeightGoal,
};
pub use summary::{summarize_day, DailySummary};
pub use title::{extract_dish_title, extract_dish_title_with};
