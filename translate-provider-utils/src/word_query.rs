/// Heuristic shared by every dictionary-capable provider to decide whether a
/// request is a single-word lookup (worth attaching [`WordResult`] data to)
/// or ordinary sentence translation: at most 50 characters, no
/// line breaks or sentence-ending punctuation, and at least 80% of the
/// remaining characters are letters, hyphens, apostrophes, or spaces.
///
/// [`WordResult`]: translate_types::WordResult
pub fn looks_like_word_query(text: &str) -> bool {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed.chars().count() > 50 {
        return false;
    }
    if trimmed.contains(['\n', '\r', '.', '!', '?']) {
        return false;
    }

    let total = trimmed.chars().count();
    let wordlike = trimmed
        .chars()
        .filter(|c| c.is_alphabetic() || matches!(c, '-' | '\'' | ' '))
        .count();

    (wordlike as f64) / (total as f64) >= 0.8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_a_single_word() {
        assert!(looks_like_word_query("ubiquitous"));
    }

    #[test]
    fn accepts_a_hyphenated_phrase() {
        assert!(looks_like_word_query("state-of-the-art"));
    }

    #[test]
    fn accepts_a_short_phrase_with_spaces() {
        assert!(looks_like_word_query("break the ice"));
    }

    #[test]
    fn rejects_sentences_with_terminal_punctuation() {
        assert!(!looks_like_word_query("Hello there."));
    }

    #[test]
    fn rejects_text_over_fifty_characters() {
        let long = "a".repeat(51);
        assert!(!looks_like_word_query(&long));
    }

    #[test]
    fn rejects_text_with_many_digits_or_symbols() {
        assert!(!looks_like_word_query("a1b2c3d4e5f6!@#$%^"));
    }

    #[test]
    fn rejects_empty_text() {
        assert!(!looks_like_word_query("   "));
    }
}
