use crate::language::Language;

/// A single pronunciation notation for a word, optionally tied to an accent
/// and a hosted audio clip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phonetic {
    pub text: String,
    pub accent: Option<Accent>,
    pub audio_url: Option<String>,
}

/// Accent tag for a [`Phonetic`]. `Src` marks a romanization of the source
/// text itself (e.g. Google Dict's pinyin-like transliteration) rather than
/// a pronunciation of the translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accent {
    Us,
    Uk,
    Src,
}

/// One dictionary sense: an optional part of speech and its ordered
/// meanings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    pub part_of_speech: Option<String>,
    pub meanings: Vec<String>,
}

/// The dictionary-style enrichment attached to a [`TranslationResult`] when
/// the provider is a dictionary lookup (or a sentence provider that also
/// returns one, like Google's free endpoint).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WordResult {
    pub phonetics: Vec<Phonetic>,
    pub definitions: Vec<Definition>,
    /// Plain-text example sentences, HTML markup already stripped.
    pub examples: Vec<String>,
}

impl WordResult {
    pub fn is_empty(&self) -> bool {
        self.phonetics.is_empty() && self.definitions.is_empty() && self.examples.is_empty()
    }
}

/// The result of a successful translation.
///
/// `translated_text` is never empty on a successful result — a provider
/// that cannot produce real output must fail with a [`crate::error::TranslationError`]
/// instead of returning an empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationResult {
    pub translated_text: String,
    pub original_text: String,
    pub detected_language: Language,
    pub target_language: Language,
    pub service_name: String,
    pub timing_ms: u64,
    /// Reserved for a caller-side cache layer; the gateway core never
    /// populates this itself and performs no cross-run caching of its own.
    pub from_cache: bool,
    pub alternatives: Option<Vec<String>>,
    pub word_result: Option<WordResult>,
}

impl TranslationResult {
    pub fn has_dictionary_data(&self) -> bool {
        self.word_result.as_ref().is_some_and(|w| !w.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(word_result: Option<WordResult>) -> TranslationResult {
        TranslationResult {
            translated_text: "hola".to_string(),
            original_text: "hello".to_string(),
            detected_language: Language::English,
            target_language: Language::Spanish,
            service_name: "stub".to_string(),
            timing_ms: 12,
            from_cache: false,
            alternatives: None,
            word_result,
        }
    }

    #[test]
    fn empty_word_result_reports_no_dictionary_data() {
        assert!(!result(None).has_dictionary_data());
        assert!(!result(Some(WordResult::default())).has_dictionary_data());
    }

    #[test]
    fn a_single_phonetic_counts_as_dictionary_data() {
        let word_result = WordResult {
            phonetics: vec![Phonetic {
                text: "/hə​ˈloʊ/".to_string(),
                accent: Some(Accent::Us),
                audio_url: None,
            }],
            ..Default::default()
        };
        assert!(result(Some(word_result)).has_dictionary_data());
    }

    #[test]
    fn a_single_example_counts_as_dictionary_data() {
        let word_result = WordResult {
            examples: vec!["Hello, world!".to_string()],
            ..Default::default()
        };
        assert!(result(Some(word_result)).has_dictionary_data());
    }

    #[test]
    fn word_result_is_empty_reports_correctly() {
        assert!(WordResult::default().is_empty());
        let with_definition = WordResult {
            definitions: vec![Definition {
                part_of_speech: Some("interjection".to_string()),
                meanings: vec!["used as a greeting".to_string()],
            }],
            ..Default::default()
        };
        assert!(!with_definition.is_empty());
    }
}
