use async_trait::async_trait;
use reqwest::Method;
use serde::Serialize;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use translate_provider::{Translator, TranslatorCapability, TranslationStream};
use translate_provider_utils::{collapse_stream, status_to_kind};
use translate_transport::{decode_doubao_sse, send, Transport};
use translate_types::{ErrorKind, Language, TranslationError, TranslationRequest, TranslationResult};

#[derive(Debug, Clone)]
pub struct DoubaoSettings {
    pub api_key: String,
    pub model: String,
}

impl Default for DoubaoSettings {
    fn default() -> Self {
        DoubaoSettings {
            api_key: String::new(),
            model: "doubao-pro-translation".to_string(),
        }
    }
}

impl DoubaoSettings {
    pub fn new(api_key: impl Into<String>) -> Self {
        DoubaoSettings {
            api_key: api_key.into(),
            ..Default::default()
        }
    }
}

#[derive(Serialize)]
struct TranslationOptions {
    source_language: String,
    target_language: String,
}

#[derive(Serialize)]
struct InputContent {
    #[serde(rename = "type")]
    kind: &'static str,
    text: String,
    translation_options: TranslationOptions,
}

#[derive(Serialize)]
struct InputItem {
    role: &'static str,
    content: Vec<InputContent>,
}

#[derive(Serialize)]
struct DoubaoRequestBody {
    model: String,
    stream: bool,
    input: Vec<InputItem>,
}

/// ByteDance's Doubao "responses" API: a named-event SSE body
/// driven by an explicit `translation_options` hint rather than a natural-
/// language prompt.
pub struct DoubaoTranslator {
    settings: DoubaoSettings,
    transport: Transport,
    capability: TranslatorCapability,
}

impl DoubaoTranslator {
    pub fn new(settings: DoubaoSettings, transport: Transport) -> Self {
        let is_configured = !settings.api_key.is_empty();
        let capability = TranslatorCapability::new("doubao", "Doubao")
            .requires_api_key(true)
            .configured(is_configured)
            .streaming(true)
            .with_languages(Language::ALL.iter().copied());
        DoubaoTranslator {
            settings,
            transport,
            capability,
        }
    }
}

#[async_trait]
impl Translator for DoubaoTranslator {
    fn capability(&self) -> &TranslatorCapability {
        &self.capability
    }

    async fn translate_internal(
        &self,
        request: &TranslationRequest,
        cancel: CancellationToken,
    ) -> Result<TranslationResult, TranslationError> {
        let stream = self.translate_stream_internal(request, cancel).await?;
        let translated_text = collapse_stream(stream).await?;
        Ok(TranslationResult {
            translated_text,
            original_text: request.text().to_string(),
            detected_language: request.from_language(),
            target_language: request.to_language(),
            service_name: "Doubao".to_string(),
            timing_ms: 0,
            from_cache: false,
            alternatives: None,
            word_result: None,
        })
    }

    async fn translate_stream_internal(
        &self,
        request: &TranslationRequest,
        cancel: CancellationToken,
    ) -> Result<TranslationStream, TranslationError> {
        let body = DoubaoRequestBody {
            model: self.settings.model.clone(),
            stream: true,
            input: vec![InputItem {
                role: "user",
                content: vec![InputContent {
                    kind: "input_text",
                    text: request.text().to_string(),
                    translation_options: TranslationOptions {
                        source_language: request.from_language().iso_code().to_string(),
                        target_language: request.to_language().iso_code().to_string(),
                    },
                }],
            }],
        };

        let builder = self
            .transport
            .request(Method::POST, "https://ark.cn-beijing.volces.com/api/v3/responses")
            .timeout(Duration::from_secs(60))
            .bearer_auth(&self.settings.api_key)
            .json(&body);

        let response = send("doubao", builder, &cancel).await?;
        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            let kind = match status.as_u16() {
                401 => ErrorKind::InvalidApiKey,
                429 => ErrorKind::RateLimited,
                500..=599 => ErrorKind::ServiceUnavailable,
                _ => status_to_kind(status),
            };
            return Err(TranslationError::new(kind, "doubao", body_text));
        }

        Ok(decode_doubao_sse("doubao", response.bytes_stream(), cancel))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_unconfigured_without_a_key() {
        let translator = DoubaoTranslator::new(DoubaoSettings::default(), Transport::default());
        assert!(!translator.capability().is_configured);
    }

    #[test]
    fn reports_configured_with_a_key() {
        let translator = DoubaoTranslator::new(DoubaoSettings::new("key"), Transport::default());
        assert!(translator.capability().is_configured);
    }
}
