use std::ops::Add;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::lexicon::Lexicon;

/// Calories and macros read out of a single nutrition estimate.
///
/// Missing values are 0, so records can be summed without checking for gaps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedMacros {
    pub calories: u32,
    pub protein: u32,
    pub fats: u32,
    pub carbs: u32,
}

impl Add for ExtractedMacros {
    type Output = ExtractedMacros;

    fn add(self, other: ExtractedMacros) -> ExtractedMacros {
        Self {
            calories: self.calories.saturating_add(other.calories),
            protein: self.protein.saturating_add(other.protein),
            fats: self.fats.saturating_add(other.fats),
            carbs: self.carbs.saturating_add(other.carbs),
        }
    }
}

impl std::iter::Sum for ExtractedMacros {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(ExtractedMacros::default(), |acc, m| acc + m)
    }
}

pub fn extract_macros(text: &str) -> ExtractedMacros {
    extract_macros_with(Lexicon::default_ref(), text)
}

/// Each label is matched independently; the first occurrence wins.
pub fn extract_macros_with(lex: &Lexicon, text: &str) -> ExtractedMacros {
    ExtractedMacros {
        calories: first_number(&lex.calories, text),
        protein: first_number(&lex.protein, text),
        fats: first_number(&lex.fats, text),
        carbs: first_number(&lex.carbs, text),
    }
}

fn first_number(re: &Regex, text: &str) -> u32 {
    re.captures(text)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse::<u32>().ok())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_is_all_zero() {
        assert_eq!(extract_macros(""), ExtractedMacros::default());
    }

    #[test]
    fn reads_labelled_line() {
        let m = extract_macros("Калории: 450, Белки: 30, Жиры: 10, Углеводы: 50");
        assert_eq!(
            m,
            ExtractedMacros {
                calories: 450,
                protein: 30,
                fats: 10,
                carbs: 50
            }
        );
    }

    #[test]
    fn labels_inside_longer_words_are_skipped() {
        let m = extract_macros("Низкокалорийный салат из 2 огурцов.\nКалории: 150");
        assert_eq!(m.calories, 150);
        let m = extract_macros("Нежирный творог, 200 г.\nЖиры: 4, Белки: 36");
        assert_eq!(m.fats, 4);
        assert_eq!(m.protein, 36);
    }

    #[test]
    fn first_occurrence_wins() {
        let m = extract_macros("Калории: 100 ... Калории: 200");
        assert_eq!(m.calories, 100);
    }

    #[test]
    fn tolerates_inflections_and_loose_formatting() {
        let text = "Блюдо: Плов\n\
                    Калорийность примерно 620 ккал\n\
                    белков ~ 25 г\n\
                    ЖИРОВ: 18.5 г\n\
                    углеводов около 80 г";
        let m = extract_macros(text);
        assert_eq!(m.calories, 620);
        assert_eq!(m.protein, 25);
        assert_eq!(m.fats, 18);
        assert_eq!(m.carbs, 80);
    }

    #[test]
    fn missing_labels_resolve_to_zero() {
        let m = extract_macros("На фото салат. Калории: 150");
        assert_eq!(m.calories, 150);
        assert_eq!(m.protein, 0);
        assert_eq!(m.fats, 0);
        assert_eq!(m.carbs, 0);
    }

    #[test]
    fn label_without_number_on_its_line_is_zero() {
        let m = extract_macros("Белки: не определены\nЖиры: 5");
        assert_eq!(m.protein, 0);
        assert_eq!(m.fats, 5);
    }

    #[test]
    fn overflowing_number_is_zero() {
        let m = extract_macros("Калории: 99999999999999");
        assert_eq!(m.calories, 0);
    }

    #[test]
    fn sum_saturates() {
        let big = ExtractedMacros {
            calories: u32::MAX,
            ..Default::default()
        };
        let one = ExtractedMacros {
            calories: 1,
            protein: 2,
            ..Default::default()
        };
        let total: ExtractedMacros = vec![big, one].into_iter().sum();
        assert_eq!(total.calories, u32::MAX);
        assert_eq!(total.protein, 2);
    }

    #[test]
    fn repeated_calls_agree() {
        let text = "Калории 300 белки 12 жиры 9 углеводы 40";
        assert_eq!(extract_macros(text), extract_macros(text));
    }
}
