use async_trait::async_trait;
use reqwest::Method;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;
use translate_provider::{Translator, TranslatorCapability};
use translate_provider_utils::{map_transport_error, status_to_kind};
use translate_transport::{send, Transport};
use translate_types::{Language, TranslationError, TranslationRequest, TranslationResult};

const ENDPOINT: &str = "https://linguee-api.fly.dev/api/v2/translations";

/// Languages Linguee's public mirror has dictionary entries for: the
/// European languages plus `zh` and `ja`.
const SUPPORTED_LANGUAGES: &[Language] = &[
    Language::Auto,
    Language::English,
    Language::French,
    Language::German,
    Language::Spanish,
    Language::Portuguese,
    Language::Italian,
    Language::Russian,
    Language::Dutch,
    Language::Swedish,
    Language::Norwegian,
    Language::Danish,
    Language::Finnish,
    Language::Polish,
    Language::Czech,
    Language::Slovak,
    Language::Hungarian,
    Language::Romanian,
    Language::Bulgarian,
    Language::Greek,
    Language::Ukrainian,
    Language::SimplifiedChinese,
    Language::Japanese,
];

#[derive(Deserialize)]
struct LingueeTranslation {
    text: String,
}

#[derive(Deserialize)]
struct LingueeEntry {
    #[serde(default)]
    translations: Vec<LingueeTranslation>,
}

/// Linguee's dictionary lookup: a flat array of entries, the
/// first of which is the canonical translation and the rest alternatives.
pub struct LingueeTranslator {
    transport: Transport,
    capability: TranslatorCapability,
}

impl LingueeTranslator {
    pub fn new(transport: Transport) -> Self {
        let capability = TranslatorCapability::new("linguee", "Linguee")
            .requires_api_key(false)
            .configured(true)
            .streaming(false)
            .with_languages(SUPPORTED_LANGUAGES.iter().copied());
        LingueeTranslator { transport, capability }
    }
}

impl Default for LingueeTranslator {
    fn default() -> Self {
        LingueeTranslator::new(Transport::default())
    }
}

#[async_trait]
impl Translator for LingueeTranslator {
    fn capability(&self) -> &TranslatorCapability {
        &self.capability
    }

    async fn translate_internal(
        &self,
        request: &TranslationRequest,
        cancel: CancellationToken,
    ) -> Result<TranslationResult, TranslationError> {
        let src = request.from_language().provider_code("linguee");
        let dst = request.to_language().provider_code("linguee");

        let builder = self.transport.request(Method::GET, ENDPOINT).query(&[
            ("query", request.text()),
            ("src", src.as_str()),
            ("dst", dst.as_str()),
        ]);

        let response = send("linguee", builder, &cancel).await?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(TranslationError::new(status_to_kind(status), "linguee", text));
        }

        let entries: Vec<LingueeEntry> = response
            .json()
            .await
            .map_err(|e| map_transport_error("linguee", e))?;

        let mut entries = entries.into_iter();
        let first = entries
            .next()
            .ok_or_else(|| TranslationError::invalid_response("linguee", "response carried no entries"))?;
        let translated_text = first
            .translations
            .first()
            .map(|t| t.text.clone())
            .ok_or_else(|| TranslationError::invalid_response("linguee", "entry carried no translations"))?;

        let mut alternatives: Vec<String> = first.translations.into_iter().skip(1).map(|t| t.text).collect();
        alternatives.extend(entries.flat_map(|entry| entry.translations.into_iter().map(|t| t.text)));

        Ok(TranslationResult {
            translated_text,
            original_text: request.text().to_string(),
            detected_language: request.from_language(),
            target_language: request.to_language(),
            service_name: "Linguee".to_string(),
            timing_ms: 0,
            from_cache: false,
            alternatives: if alternatives.is_empty() { None } else { Some(alternatives) },
            word_result: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supports_chinese_and_japanese_alongside_european_languages() {
        let translator = LingueeTranslator::default();
        assert!(translator.capability().supports(Language::SimplifiedChinese));
        assert!(translator.capability().supports(Language::Japanese));
        assert!(translator.capability().supports(Language::German));
    }

    #[test]
    fn does_not_support_languages_outside_the_allow_list() {
        let translator = LingueeTranslator::default();
        assert!(!translator.capability().supports(Language::Thai));
    }
}
