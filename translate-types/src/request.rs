use crate::language::Language;

/// An immutable translation request.
///
/// Construction goes through [`TranslationRequest::new`] /
/// [`TranslationRequestBuilder`] rather than public fields so that the
/// invariant "`text` is non-empty after trimming" can be enforced once, at
/// the boundary, instead of by every provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    text: String,
    from_language: Language,
    to_language: Language,
}

impl TranslationRequest {
    /// Builds a request. `from_language` defaults to [`Language::Auto`].
    pub fn new(text: impl Into<String>, to_language: Language) -> TranslationRequest {
        TranslationRequest {
            text: text.into(),
            from_language: Language::Auto,
            to_language,
        }
    }

    /// Overrides the source language (default is [`Language::Auto`]).
    pub fn with_from_language(mut self, from_language: Language) -> Self {
        self.from_language = from_language;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn from_language(&self) -> Language {
        self.from_language
    }

    pub fn to_language(&self) -> Language {
        self.to_language
    }

    /// `true` when the trimmed text has zero length.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_from_language_to_auto() {
        let req = TranslationRequest::new("hello", Language::French);
        assert_eq!(req.from_language(), Language::Auto);
        assert_eq!(req.to_language(), Language::French);
    }

    #[test]
    fn detects_whitespace_only_text() {
        let req = TranslationRequest::new("   \n\t", Language::French);
        assert!(req.is_empty());
    }
}
