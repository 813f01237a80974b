use async_trait::async_trait;
use reqwest::Method;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;
use translate_provider::{Translator, TranslatorCapability};
use translate_transport::{send, Transport};
use translate_types::{ErrorKind, Language, TranslationError, TranslationRequest, TranslationResult};

#[derive(Deserialize)]
struct DeepLTranslation {
    text: String,
    detected_source_language: Option<String>,
}

#[derive(Deserialize)]
struct DeepLApiResponseBody {
    translations: Vec<DeepLTranslation>,
}

/// DeepL's authenticated REST endpoint:
/// free-tier keys (ending `:fx`) route to `api-free.deepl.com`, paid keys
/// to `api.deepl.com`.
pub struct DeepLApiTranslator {
    api_key: String,
    transport: Transport,
    capability: TranslatorCapability,
}

impl DeepLApiTranslator {
    pub fn new(api_key: impl Into<String>, transport: Transport) -> Self {
        let api_key = api_key.into();
        let is_configured = !api_key.is_empty();
        let capability = TranslatorCapability::new("deepl-api", "DeepL")
            .requires_api_key(true)
            .configured(is_configured)
            .streaming(false)
            .with_languages(Language::ALL.iter().copied());
        DeepLApiTranslator {
            api_key,
            transport,
            capability,
        }
    }

    fn base_url(&self) -> &'static str {
        if self.api_key.ends_with(":fx") {
            "https://api-free.deepl.com/v2/translate"
        } else {
            "https://api.deepl.com/v2/translate"
        }
    }
}

#[async_trait]
impl Translator for DeepLApiTranslator {
    fn capability(&self) -> &TranslatorCapability {
        &self.capability
    }

    async fn translate_internal(
        &self,
        request: &TranslationRequest,
        cancel: CancellationToken,
    ) -> Result<TranslationResult, TranslationError> {
        let mut form = vec![
            ("text".to_string(), request.text().to_string()),
            ("target_lang".to_string(), request.to_language().provider_code("deepl-web")),
        ];
        if request.from_language() != Language::Auto {
            form.push(("source_lang".to_string(), request.from_language().provider_code("deepl-web")));
        }

        let builder = self
            .transport
            .request(Method::POST, self.base_url())
            .header("Authorization", format!("DeepL-Auth-Key {}", self.api_key))
            .form(&form);

        let response = send("deepl-api", builder, &cancel).await?;
        let status = response.status();
        if !status.is_success() {
            let kind = match status.as_u16() {
                403 => ErrorKind::InvalidApiKey,
                429 | 456 => ErrorKind::RateLimited,
                500..=599 => ErrorKind::ServiceUnavailable,
                _ => ErrorKind::InvalidResponse,
            };
            let text = response.text().await.unwrap_or_default();
            return Err(TranslationError::new(kind, "deepl-api", text));
        }

        let parsed: DeepLApiResponseBody = response
            .json()
            .await
            .map_err(|e| translate_provider_utils::map_transport_error("deepl-api", e))?;
        let translation = parsed.translations.into_iter().next().ok_or_else(|| {
            TranslationError::invalid_response("deepl-api", "response carried no translation")
        })?;

        let detected_language = translation
            .detected_source_language
            .map(|code| Language::from_provider_code(&code))
            .unwrap_or(Language::Auto);

        Ok(TranslationResult {
            translated_text: translation.text,
            original_text: request.text().to_string(),
            detected_language,
            target_language: request.to_language(),
            service_name: "DeepL".to_string(),
            timing_ms: 0,
            from_cache: false,
            alternatives: None,
            word_result: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_tier_key_routes_to_the_free_host() {
        let translator = DeepLApiTranslator::new("abcd:fx", Transport::default());
        assert_eq!(translator.base_url(), "https://api-free.deepl.com/v2/translate");
    }

    #[test]
    fn paid_key_routes_to_the_paid_host() {
        let translator = DeepLApiTranslator::new("abcd1234", Transport::default());
        assert_eq!(translator.base_url(), "https://api.deepl.com/v2/translate");
    }
}
