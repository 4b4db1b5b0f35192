//! Text cleaning and word tokenization for scoring.

/// Drop every character that is not an ASCII letter, ASCII digit or whitespace,
/// then lowercase. Whitespace runs are kept as they are.
///
/// Whitespace is `char::is_whitespace`, which excludes the U+001C..U+001F
/// separators that a regex `\s` would keep; those are dropped.
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Split text into lowercase word tokens of at least two word characters.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|s| s.chars().count() >= 2)
        .map(str::to_lowercase)
        .collect()
}
