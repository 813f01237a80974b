use crate::deepl_api::DeepLApiTranslator;
use async_trait::async_trait;
use rand::Rng;
use reqwest::Method;
use serde::Deserialize;
use serde_json::json;
use tokio_util::sync::CancellationToken;
use translate_provider::{Translator, TranslatorCapability};
use translate_signing::deepl_web::{align_timestamp, now_millis, render_method_field, sample_request_id};
use translate_transport::{send, Transport};
use translate_types::{Language, TranslationError, TranslationRequest, TranslationResult};

#[derive(Debug, Clone, Default)]
pub struct DeepLWebSettings {
    pub api_key: Option<String>,
    pub use_web_first: bool,
}

impl DeepLWebSettings {
    pub fn new() -> Self {
        DeepLWebSettings {
            api_key: None,
            use_web_first: true,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_web_first(mut self, use_web_first: bool) -> Self {
        self.use_web_first = use_web_first;
        self
    }
}

#[derive(Deserialize)]
struct JsonRpcText {
    text: String,
}

#[derive(Deserialize)]
struct JsonRpcResult {
    texts: Vec<JsonRpcText>,
    lang: Option<String>,
}

#[derive(Deserialize)]
struct JsonRpcResponse {
    result: Option<JsonRpcResult>,
}

/// DeepL's unauthenticated `www2.deepl.com/jsonrpc` endpoint ("DeepL — Web
/// mode"), with a configured fallback to [`DeepLApiTranslator`] when a key
/// is present and the web call fails.
pub struct DeepLWebTranslator {
    settings: DeepLWebSettings,
    transport: Transport,
    capability: TranslatorCapability,
}

impl DeepLWebTranslator {
    pub fn new(settings: DeepLWebSettings, transport: Transport) -> Self {
        let capability = TranslatorCapability::new("deepl-web", "DeepL")
            .requires_api_key(false)
            .configured(true)
            .streaming(false)
            .with_languages(Language::ALL.iter().copied());
        DeepLWebTranslator {
            settings,
            transport,
            capability,
        }
    }

    async fn translate_via_web(
        &self,
        request: &TranslationRequest,
        cancel: &CancellationToken,
    ) -> Result<TranslationResult, TranslationError> {
        let request_id = sample_request_id(rand::thread_rng().gen());
        let timestamp = align_timestamp(now_millis(), request.text());

        let params = json!({
            "jobs": [{
                "kind": "default",
                "sentences": [{ "text": request.text(), "id": 0, "prefix": "" }],
                "raw_en_context_before": [],
                "raw_en_context_after": [],
                "quality": "normal",
            }],
            "lang": {
                "target_lang": request.to_language().provider_code("deepl-web"),
                "source_lang_user_selected": if request.from_language() == Language::Auto {
                    "auto".to_string()
                } else {
                    request.from_language().provider_code("deepl-web")
                },
            },
            "priority": 1,
            "timestamp": timestamp,
        });

        let method_field = render_method_field(request_id, "LMT_handle_texts");
        let envelope = format!(
            "{{\"jsonrpc\":\"2.0\",\"id\":{request_id},{method_field},\"params\":{params}}}",
            request_id = request_id,
            method_field = method_field,
            params = params,
        );

        let builder = self
            .transport
            .request(Method::POST, "https://www2.deepl.com/jsonrpc")
            .header("content-type", "application/json")
            .body(envelope);

        let response = send("deepl-web", builder, cancel).await?;
        if !response.status().is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(TranslationError::service_unavailable("deepl-web", text));
        }

        let parsed: JsonRpcResponse = response
            .json()
            .await
            .map_err(|e| translate_provider_utils::map_transport_error("deepl-web", e))?;
        let result = parsed
            .result
            .ok_or_else(|| TranslationError::invalid_response("deepl-web", "response carried no result"))?;
        let translated_text = result
            .texts
            .into_iter()
            .next()
            .map(|t| t.text)
            .ok_or_else(|| TranslationError::invalid_response("deepl-web", "response carried no translation"))?;
        let detected_language = result
            .lang
            .map(|code| Language::from_provider_code(&code))
            .unwrap_or(Language::Auto);

        Ok(TranslationResult {
            translated_text,
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

#[async_trait]
impl Translator for DeepLWebTranslator {
    fn capability(&self) -> &TranslatorCapability {
        &self.capability
    }

    async fn translate_internal(
        &self,
        request: &TranslationRequest,
        cancel: CancellationToken,
    ) -> Result<TranslationResult, TranslationError> {
        let configured_key = self.settings.api_key.as_deref().filter(|k| !k.is_empty());

        if !self.settings.use_web_first {
            if let Some(key) = configured_key {
                return DeepLApiTranslator::new(key.to_string(), self.transport.clone())
                    .translate_internal(request, cancel)
                    .await;
            }
        }

        match self.translate_via_web(request, &cancel).await {
            Ok(result) => Ok(result),
            Err(web_err) => match configured_key {
                Some(key) => {
                    DeepLApiTranslator::new(key.to_string(), self.transport.clone())
                        .translate_internal(request, cancel)
                        .await
                }
                None => Err(web_err),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_usable_without_any_key() {
        let translator = DeepLWebTranslator::new(DeepLWebSettings::new(), Transport::default());
        assert!(translator.capability().is_configured);
        assert!(!translator.capability().requires_api_key);
    }

    #[test]
    fn with_api_key_enables_fallback_settings() {
        let settings = DeepLWebSettings::new().with_api_key("abcd:fx").with_web_first(false);
        assert_eq!(settings.api_key.as_deref(), Some("abcd:fx"));
        assert!(!settings.use_web_first);
    }
}
