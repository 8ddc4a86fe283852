use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::Regex;

/// Locale data used when reading free-form nutrition text.
///
/// Every pattern, word list and placeholder the extractor needs lives here, so a new
/// locale is a new `Lexicon` and the extraction code stays untouched.
#[derive(Debug, Clone)]
pub struct Lexicon {
    pub calories: Regex,
    pub protein: Regex,
    pub fats: Regex,
    pub carbs: Regex,
    /// "Dish: <name>" marker, capture group 1 is the raw name.
    pub dish_marker: Regex,
    /// "looks like <X>", capture group 1 holds up to three words.
    pub similarity: Regex,
    /// "is shown ... <X>." span, capture group 1 is searched for vocabulary entries.
    pub depiction: Regex,
    /// Leading "In the photograph" phrase stripped before the first-word fallback.
    pub photo_prefix: Regex,
    /// Known dishes and foods, in lookup priority order. Lowercase.
    pub vocabulary: Vec<&'static str>,
    /// Lowercase words never used as a first-word title.
    pub stop_words: HashSet<&'static str>,
    pub placeholder: &'static str,
}

lazy_static! {
    static ref RUSSIAN: Lexicon = Lexicon::russian();
}

impl Lexicon {
    /// Shared Russian lexicon, built once.
    pub fn default_ref() -> &'static Lexicon {
        &RUSSIAN
    }

    pub fn russian() -> Self {
        // Label at a word start, followed by the first ASCII integer on the same line.
        // "низкокалорийный" or "нежирный" never count as labels.
        fn label(stem: &str) -> Regex {
            Regex::new(&format!(r"(?i)(?:^|[^\p{{L}}]){stem}[^0-9\n]*?([0-9]+)")).unwrap()
        }

        Self {
            calories: label(r"калори\p{L}*"),
            protein: label(r"бело?к\p{L}*"),
            fats: label(r"жир\p{L}*"),
            carbs: label(r"углевод\p{L}*"),
            dish_marker: Regex::new(r"(?i)блюдо\s*:\s*([^,.:;\n]+)").unwrap(),
            similarity: Regex::new(
                r"(?i)(?:похож[еаи]?\s+на|напоминает|выглядит\s+как)\s+([^\s,.;:!?]+(?:[ \t]+[^\s,.;:!?]+){0,2})",
            )
            .unwrap(),
            depiction: Regex::new(
                r"(?i)(?:изображ[её]н[аоы]?|показан[аоы]?|представлен[аоы]?)([^.,;:!?\n]*)[.,;:!?\n]",
            )
            .unwrap(),
            photo_prefix: Regex::new(
                r"(?i)^\s*на\s+(?:фотографии|фото|изображении|снимке)\s*",
            )
            .unwrap(),
            vocabulary: RUSSIAN_VOCABULARY.to_vec(),
            stop_words: RUSSIAN_STOP_WORDS.iter().copied().collect(),
            placeholder: "Блюдо",
        }
    }
}

// Matched at word starts. Longer forms come before their prefixes ("сырники" before "сыр").
const RUSSIAN_VOCABULARY: &[&str] = &[
    // dishes
    "борщ", "плов", "пицца", "паста", "спагетти", "лазанья", "ризотто",
    "суши", "роллы", "рамен", "лапша", "бургер", "шаурма", "пельмени", "вареники",
    "блины", "сырники", "оладьи", "омлет", "яичница", "салат", "каша", "запеканка",
    "котлета", "стейк", "шашлык", "гуляш", "рагу", "сэндвич", "бутерброд", "тако",
    // proteins
    "курица", "индейка", "говядина", "свинина", "лосось", "тунец", "креветки", "рыба",
    "яйца", "тофу",
    // grains
    "гречка", "овсянка", "макароны", "киноа", "булгур", "хлеб", "рис",
    // vegetables
    "картофель", "брокколи", "овощи", "огурцы", "томаты",
    // fruits
    "авокадо", "банан", "яблоко", "апельсин", "клубника", "ягоды",
    // dairy
    "творог", "йогурт", "кефир", "молоко", "сыр",
    // beverages
    "смузи", "коктейль", "лимонад", "кофе", "чай", "сок",
];

const RUSSIAN_STOP_WORDS: &[&str] = &[
    "кухня", "кухни", "тарелка", "тарелке", "тарелку", "блюдо", "блюда", "напиток",
    "напитка", "суп", "супа", "основе", "традиционное", "традиционный", "традиционная",
    "популярное", "популярный", "популярная", "изображено", "изображен", "изображена",
    "изображены", "показано", "показан", "показана", "порция", "порции", "из",
];
