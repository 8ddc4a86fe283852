use serde::Serialize;
use time::Date;

use super::calculator::DerivedTargets;
use super::macros::{extract_macros, ExtractedMacros};

/// Intake still allowed for the day. Negative once a target is exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Remaining {
    pub calories: i64,
    pub protein: i64,
    pub fats: i64,
    pub carbs: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySummary {
    pub date: Date,
    pub meals: usize,
    pub totals: ExtractedMacros,
    pub targets: Option<DerivedTargets>,
    pub remaining: Option<Remaining>,
}

/// Aggregates one day of analysis texts, re-deriving macros from each text.
pub fn summarize_day<'a, I>(date: Date, texts: I, targets: Option<DerivedTargets>) -> DailySummary
where
    I: IntoIterator<Item = &'a str>,
{
    let mut meals = 0;
    let totals: ExtractedMacros = texts
        .into_iter()
        .inspect(|_| meals += 1)
        .map(extract_macros)
        .sum();

    let remaining = targets.map(|t| Remaining {
        calories: t.calories - i64::from(totals.calories),
        protein: t.macros.protein - i64::from(totals.protein),
        fats: t.macros.fats - i64::from(totals.fats),
        carbs: t.macros.carbs - i64::from(totals.carbs),
    });

    DailySummary {
        date,
        meals,
        totals,
        targets,
        remaining,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nutrition::calculator::MacroSplit;
    use time::macros::date;

    fn targets() -> DerivedTargets {
        DerivedTargets {
            bmr: 1700.0,
            tdee: 2300.0,
            calories: 1800,
            macros: MacroSplit {
                protein: 126,
                fats: 70,
                carbs: 135,
            },
        }
    }

    #[test]
    fn sums_every_record() {
        let texts = [
            "Блюдо: Омлет\nКалории: 350\nБелки: 20\nЖиры: 25\nУглеводы: 5",
            "Блюдо: Кофе\nКалории: 10",
            "",
        ];
        let s = summarize_day(date!(2024 - 05 - 10), texts, Some(targets()));
        assert_eq!(s.meals, 3);
        assert_eq!(s.totals.calories, 360);
        assert_eq!(s.totals.protein, 20);
        let r = s.remaining.unwrap();
        assert_eq!(r.calories, 1440);
        assert_eq!(r.fats, 45);
    }

    #[test]
    fn remaining_goes_negative() {
        let texts = ["Калории: 2000, Белки: 10, Жиры: 100, Углеводы: 300"];
        let s = summarize_day(date!(2024 - 05 - 10), texts, Some(targets()));
        let r = s.remaining.unwrap();
        assert_eq!(r.calories, -200);
        assert_eq!(r.fats, -30);
        assert_eq!(r.carbs, -165);
    }

    #[test]
    fn no_targets_no_remaining() {
        let s = summarize_day(date!(2024 - 05 - 10), std::iter::empty(), None);
        assert_eq!(s.meals, 0);
        assert_eq!(s.totals, ExtractedMacros::default());
        assert!(s.remaining.is_none());
    }
}
