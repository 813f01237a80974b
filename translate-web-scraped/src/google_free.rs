use async_trait::async_trait;
use reqwest::Method;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;
use translate_provider::{Translator, TranslatorCapability};
use translate_provider_utils::map_transport_error;
use translate_transport::{send, Transport};
use translate_types::{ErrorKind, Language, TranslationError, TranslationRequest, TranslationResult};

const ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";

#[derive(Deserialize, Default)]
struct Sentence {
    #[serde(default)]
    trans: Option<String>,
}

#[derive(Deserialize, Default)]
struct Alternative {
    #[serde(default)]
    word_postproc: Option<String>,
}

#[derive(Deserialize, Default)]
struct AlternativeTranslation {
    #[serde(default)]
    alternative: Vec<Alternative>,
}

#[derive(Deserialize, Default)]
struct GoogleFreeResponse {
    #[serde(default)]
    sentences: Vec<Sentence>,
    #[serde(default)]
    src: Option<String>,
    #[serde(default)]
    alternative_translations: Vec<AlternativeTranslation>,
}

/// Google's unauthenticated `gtx` endpoint.
pub struct GoogleFreeTranslator {
    transport: Transport,
    capability: TranslatorCapability,
}

impl GoogleFreeTranslator {
    pub fn new(transport: Transport) -> Self {
        let capability = TranslatorCapability::new("google-free", "Google Translate")
            .requires_api_key(false)
            .configured(true)
            .streaming(false)
            .with_languages(Language::ALL.iter().copied());
        GoogleFreeTranslator { transport, capability }
    }
}

impl Default for GoogleFreeTranslator {
    fn default() -> Self {
        GoogleFreeTranslator::new(Transport::default())
    }
}

#[async_trait]
impl Translator for GoogleFreeTranslator {
    fn capability(&self) -> &TranslatorCapability {
        &self.capability
    }

    async fn translate_internal(
        &self,
        request: &TranslationRequest,
        cancel: CancellationToken,
    ) -> Result<TranslationResult, TranslationError> {
        let from_code = request.from_language().provider_code("google");
        let to_code = request.to_language().provider_code("google");

        let builder = self.transport.request(Method::GET, ENDPOINT).query(&[
            ("client", "gtx"),
            ("sl", from_code.as_str()),
            ("tl", to_code.as_str()),
            ("dt", "t"),
            ("dt", "bd"),
            ("dj", "1"),
            ("q", request.text()),
        ]);

        let response = send("google-free", builder, &cancel).await?;
        let status = response.status();
        if !status.is_success() {
            let kind = if status.as_u16() == 429 {
                ErrorKind::RateLimited
            } else {
                ErrorKind::ServiceUnavailable
            };
            let text = response.text().await.unwrap_or_default();
            return Err(TranslationError::new(kind, "google-free", text));
        }

        let parsed: GoogleFreeResponse = response
            .json()
            .await
            .map_err(|e| map_transport_error("google-free", e))?;

        let translated_text: String = parsed
            .sentences
            .iter()
            .filter_map(|s| s.trans.as_deref())
            .collect();
        if translated_text.is_empty() {
            return Err(TranslationError::invalid_response(
                "google-free",
                "response carried no translated sentences",
            ));
        }

        let detected_language = parsed
            .src
            .as_deref()
            .map(Language::from_provider_code)
            .unwrap_or(Language::Auto);

        let alternatives: Vec<String> = parsed
            .alternative_translations
            .iter()
            .flat_map(|group| group.alternative.iter())
            .filter_map(|alt| alt.word_postproc.clone())
            .collect();

        Ok(TranslationResult {
            translated_text,
            original_text: request.text().to_string(),
            detected_language,
            target_language: request.to_language(),
            service_name: "Google Translate".to_string(),
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
    fn is_always_configured() {
        let translator = GoogleFreeTranslator::default();
        assert!(translator.capability().is_configured);
        assert!(!translator.capability().requires_api_key);
    }
}
