use std::collections::HashSet;
use translate_types::Language;

/// Immutable (aside from what a registry reconfiguration swaps in under
/// the same service id) description of one provider instance.
///
/// This is what the registry shows a caller before they commit to a
/// `translate` call: whether the provider needs a key it doesn't have yet,
/// which languages it claims to support, and whether a streaming call is
/// even meaningful for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatorCapability {
    /// Stable kebab-case identifier, e.g. `"google-free"`, `"deepl-api"`.
    pub service_id: String,
    pub display_name: String,
    pub requires_api_key: bool,
    pub is_configured: bool,
    pub supported_languages: HashSet<Language>,
    pub is_streaming: bool,
}

impl TranslatorCapability {
    pub fn new(service_id: impl Into<String>, display_name: impl Into<String>) -> Self {
        TranslatorCapability {
            service_id: service_id.into(),
            display_name: display_name.into(),
            requires_api_key: false,
            is_configured: true,
            supported_languages: HashSet::new(),
            is_streaming: false,
        }
    }

    pub fn requires_api_key(mut self, requires: bool) -> Self {
        self.requires_api_key = requires;
        self
    }

    pub fn configured(mut self, configured: bool) -> Self {
        self.is_configured = configured;
        self
    }

    pub fn streaming(mut self, streaming: bool) -> Self {
        self.is_streaming = streaming;
        self
    }

    pub fn with_languages(mut self, languages: impl IntoIterator<Item = Language>) -> Self {
        self.supported_languages.extend(languages);
        self
    }

    /// `true` when every language variant is accepted (a provider that
    /// declares the full enum rather than a curated subset).
    pub fn supports(&self, lang: Language) -> bool {
        matches!(lang, Language::Auto) || self.supported_languages.contains(&lang)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_is_always_supported() {
        let cap = TranslatorCapability::new("x", "X");
        assert!(cap.supports(Language::Auto));
    }

    #[test]
    fn only_declared_languages_are_supported() {
        let cap = TranslatorCapability::new("x", "X").with_languages([Language::English]);
        assert!(cap.supports(Language::English));
        assert!(!cap.supports(Language::French));
    }

    #[test]
    fn builder_methods_set_the_expected_fields() {
        let cap = TranslatorCapability::new("x", "X")
            .requires_api_key(true)
            .configured(false)
            .streaming(true);
        assert!(cap.requires_api_key);
        assert!(!cap.is_configured);
        assert!(cap.is_streaming);
    }
}
