use once_cell::sync::Lazy;
use regex::Regex;

/// `$1,234.56`, `$5`, or a number directly followed by ` dollars` / ` USD`
static MONEY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$\d+(?:,\d{3})*(?:\.\d{1,2})?|\d+ (?:dollars|USD)")
        .expect("money pattern should be valid")
});

/// Case-insensitive, non-overlapping occurrences of `phrase` in `text`
pub fn count_phrase(text: &str, phrase: &str) -> usize {
    if phrase.is_empty() {
        return 0;
    }
    text.to_lowercase().matches(&phrase.to_lowercase()).count()
}

/// Phrase occurrences summed over title and description
pub fn search_phrase_count(title: &str, description: &str, phrase: &str) -> usize {
    count_phrase(title, phrase) + count_phrase(description, phrase)
}

/// Whether `text` mentions an amount of money
pub fn contains_amount(text: &str) -> bool {
    MONEY_PATTERN.is_match(text)
}

pub fn contains_money(title: &str, description: &str) -> bool {
    contains_amount(title) || contains_amount(description)
}
