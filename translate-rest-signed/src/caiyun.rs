use async_trait::async_trait;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use translate_provider::{Translator, TranslatorCapability};
use translate_provider_utils::status_to_kind;
use translate_transport::{send, Transport};
use translate_types::{Language, TranslationError, TranslationRequest, TranslationResult};
use uuid::Uuid;

const ENDPOINT: &str = "https://api.interpreter.caiyunai.com/v1/translator";

#[derive(Debug, Clone)]
pub struct CaiyunSettings {
    pub api_key: String,
}

impl CaiyunSettings {
    pub fn new(api_key: impl Into<String>) -> Self {
        CaiyunSettings {
            api_key: api_key.into(),
        }
    }
}

#[derive(Serialize)]
struct CaiyunRequestBody {
    source: Vec<String>,
    trans_type: String,
    request_id: String,
    media: &'static str,
}

#[derive(Deserialize)]
struct CaiyunResponseBody {
    #[serde(default)]
    target: Vec<String>,
}

/// Caiyun's short-text translation endpoint, keyed by a bare token header
///. Caiyun only supports zh/en/ja pairs; callers outside that
/// set get `InvalidResponse` from the server rather than a local check.
pub struct CaiyunTranslator {
    settings: CaiyunSettings,
    transport: Transport,
    capability: TranslatorCapability,
}

impl CaiyunTranslator {
    pub fn new(settings: CaiyunSettings, transport: Transport) -> Self {
        let is_configured = !settings.api_key.is_empty();
        let capability = TranslatorCapability::new("caiyun", "Caiyun")
            .requires_api_key(true)
            .configured(is_configured)
            .streaming(false)
            .with_languages([Language::SimplifiedChinese, Language::English, Language::Japanese]);
        CaiyunTranslator {
            settings,
            transport,
            capability,
        }
    }
}

#[async_trait]
impl Translator for CaiyunTranslator {
    fn capability(&self) -> &TranslatorCapability {
        &self.capability
    }

    async fn translate_internal(
        &self,
        request: &TranslationRequest,
        cancel: CancellationToken,
    ) -> Result<TranslationResult, TranslationError> {
        let trans_type = format!(
            "{}2{}",
            request.from_language().provider_code("caiyun"),
            request.to_language().provider_code("caiyun"),
        );
        let body = CaiyunRequestBody {
            source: vec![request.text().to_string()],
            trans_type,
            request_id: Uuid::new_v4().to_string(),
            media: "text",
        };

        let builder = self
            .transport
            .request(Method::POST, ENDPOINT)
            .header("content-type", "application/json")
            .header("X-Authorization", format!("token {}", self.settings.api_key))
            .json(&body);

        let response = send("caiyun", builder, &cancel).await?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(TranslationError::new(status_to_kind(status), "caiyun", text));
        }

        let parsed: CaiyunResponseBody = response
            .json()
            .await
            .map_err(|e| translate_provider_utils::map_transport_error("caiyun", e))?;
        let translated_text = parsed
            .target
            .into_iter()
            .next()
            .ok_or_else(|| TranslationError::invalid_response("caiyun", "response carried no translation"))?;

        Ok(TranslationResult {
            translated_text,
            original_text: request.text().to_string(),
            detected_language: request.from_language(),
            target_language: request.to_language(),
            service_name: "Caiyun".to_string(),
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
    fn reports_unconfigured_without_a_key() {
        let translator = CaiyunTranslator::new(CaiyunSettings::new(""), Transport::default());
        assert!(!translator.capability().is_configured);
    }

    #[test]
    fn only_supports_zh_en_ja() {
        let translator = CaiyunTranslator::new(CaiyunSettings::new("key"), Transport::default());
        assert!(translator.capability().supports(Language::SimplifiedChinese));
        assert!(!translator.capability().supports(Language::French));
    }
}
