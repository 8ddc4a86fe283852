use tracing::trace;

use super::lexicon::Lexicon;

type TitleRule = fn(&Lexicon, &str) -> Option<String>;

/// Title heuristics in precedence order. The first rule returning `Some` wins.
pub const TITLE_RULES: &[(&str, TitleRule)] = &[
    ("dish_marker", dish_marker),
    ("similarity", similarity),
    ("depiction", depiction),
    ("vocabulary", vocabulary),
    ("first_word", first_word),
];

pub fn extract_dish_title(text: &str) -> String {
    extract_dish_title_with(Lexicon::default_ref(), text)
}

/// Returns "" for empty input and the lexicon placeholder when no rule matches.
pub fn extract_dish_title_with(lex: &Lexicon, text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    for (name, rule) in TITLE_RULES {
        if let Some(title) = rule(lex, text) {
            trace!(rule = *name, %title, "dish title resolved");
            return title;
        }
    }
    lex.placeholder.to_string()
}

/// "Блюдо: <name>" up to the next separator.
pub fn dish_marker(lex: &Lexicon, text: &str) -> Option<String> {
    let raw = lex.dish_marker.captures(text)?.get(1)?.as_str();
    finish(raw)
}

/// "похоже на <up to three words>".
pub fn similarity(lex: &Lexicon, text: &str) -> Option<String> {
    let raw = lex.similarity.captures(text)?.get(1)?.as_str();
    finish(raw)
}

/// "изображен(а) ... <X>." narrowed down to a vocabulary entry.
pub fn depiction(lex: &Lexicon, text: &str) -> Option<String> {
    let span = lex.depiction.captures(text)?.get(1)?.as_str();
    find_in_vocabulary(lex, span)
}

pub fn vocabulary(lex: &Lexicon, text: &str) -> Option<String> {
    find_in_vocabulary(lex, text)
}

/// First meaningful word of the first line.
pub fn first_word(lex: &Lexicon, text: &str) -> Option<String> {
    let line = text.lines().next()?;
    let line = lex.photo_prefix.replace(line, "");
    line.split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
        .find(|w| {
            w.chars().count() > 3 && !lex.stop_words.contains(w.to_lowercase().as_str())
        })
        .map(capitalize)
}

fn find_in_vocabulary(lex: &Lexicon, haystack: &str) -> Option<String> {
    let lower = haystack.to_lowercase();
    lex.vocabulary
        .iter()
        .find(|entry| starts_a_word(&lower, entry))
        .map(|entry| capitalize(entry))
}

// Entry occurs at the beginning of some word: inflected forms ("пловом") still match,
// while words merely containing it ("случайный" for "чай") do not.
fn starts_a_word(haystack: &str, entry: &str) -> bool {
    haystack.match_indices(entry).any(|(idx, _)| {
        haystack[..idx]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric())
    })
}

fn finish(raw: &str) -> Option<String> {
    let cleaned = raw.trim_start_matches(|c: char| !c.is_alphanumeric()).trim();
    if cleaned.is_empty() {
        None
    } else {
        Some(capitalize(cleaned))
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex() -> &'static Lexicon {
        Lexicon::default_ref()
    }

    #[test]
    fn empty_input_is_empty_title() {
        assert_eq!(extract_dish_title(""), "");
    }

    #[test]
    fn dish_marker_takes_precedence() {
        assert_eq!(extract_dish_title("Блюдо: Борщ, калории 300"), "Борщ");
        assert_eq!(
            extract_dish_title("Похоже на пиццу.\nБлюдо: куриный суп с лапшой\nКалории: 200"),
            "Куриный суп с лапшой"
        );
    }

    #[test]
    fn dish_marker_strips_markdown_noise() {
        assert_eq!(extract_dish_title("**Блюдо:** Овсянка с ягодами."), "Овсянка с ягодами");
        assert_eq!(dish_marker(lex(), "Блюдо: ***"), None);
    }

    #[test]
    fn similarity_captures_up_to_three_words() {
        assert_eq!(
            similarity(lex(), "Это похоже на домашний куриный бульон с зеленью"),
            Some("Домашний куриный бульон".to_string())
        );
        assert_eq!(
            similarity(lex(), "Выглядит как греческий салат."),
            Some("Греческий салат".to_string())
        );
    }

    #[test]
    fn depiction_returns_vocabulary_entry() {
        assert_eq!(
            depiction(lex(), "На фото изображена тарелка с пловом, рядом хлеб."),
            Some("Плов".to_string())
        );
        assert_eq!(depiction(lex(), "Изображено что-то непонятное."), None);
    }

    #[test]
    fn vocabulary_scan_uses_list_order() {
        // "пицца" precedes "кофе" in the vocabulary, regardless of text position
        assert_eq!(
            vocabulary(lex(), "Кофе и пицца маргарита"),
            Some("Пицца".to_string())
        );
    }

    #[test]
    fn vocabulary_ignores_mid_word_hits() {
        assert_eq!(vocabulary(lex(), "случайный текст без еды"), None);
        assert_eq!(vocabulary(lex(), "свежие овощи"), Some("Овощи".to_string()));
    }

    #[test]
    fn first_word_skips_prefix_and_stop_words() {
        assert_eq!(
            first_word(lex(), "На фотографии традиционное блюдо кавказской кухни"),
            Some("Кавказской".to_string())
        );
        assert_eq!(first_word(lex(), "На фото суп из тарелка"), None);
    }

    #[test]
    fn unmatched_text_falls_back_to_first_word() {
        let title = extract_dish_title("случайный текст без еды");
        assert!(!title.is_empty());
        assert_eq!(title, "Случайный");
    }

    #[test]
    fn nothing_usable_gives_placeholder() {
        assert_eq!(extract_dish_title("на фото суп"), "Блюдо");
        assert_eq!(extract_dish_title("   "), "Блюдо");
    }

    #[test]
    fn title_is_stable() {
        let text = "На снимке изображен стейк с картофелем.";
        assert_eq!(extract_dish_title(text), extract_dish_title(text));
        assert_eq!(extract_dish_title(text), "Стейк");
    }
}
