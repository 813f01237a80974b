use async_trait::async_trait;
use chrono::Utc;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use translate_provider::{Translator, TranslatorCapability};
use translate_signing::sign_volcano;
use translate_transport::{send, Transport};
use translate_types::{ErrorKind, Language, TranslationError, TranslationRequest, TranslationResult};

const HOST: &str = "translate.volcengineapi.com";
const QUERY: &str = "Action=TranslateText&Version=2020-06-01";
const MAX_TEXT_LEN: usize = 5000;

#[derive(Debug, Clone)]
pub struct VolcanoSettings {
    pub access_key_id: String,
    pub secret_access_key: String,
}

impl VolcanoSettings {
    pub fn new(access_key_id: impl Into<String>, secret_access_key: impl Into<String>) -> Self {
        VolcanoSettings {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
        }
    }
}

#[derive(Serialize)]
struct VolcanoRequestBody {
    #[serde(rename = "TargetLanguage")]
    target_language: String,
    #[serde(rename = "SourceLanguage", skip_serializing_if = "Option::is_none")]
    source_language: Option<String>,
    #[serde(rename = "TextList")]
    text_list: Vec<String>,
}

#[derive(Deserialize)]
struct VolcanoTranslation {
    #[serde(rename = "Translation")]
    translation: String,
    #[serde(rename = "DetectedSourceLanguage", default)]
    detected_source_language: Option<String>,
}

#[derive(Deserialize, Default)]
struct VolcanoError {
    #[serde(rename = "Code", default)]
    code: String,
    #[serde(rename = "Message", default)]
    message: String,
}

#[derive(Deserialize, Default)]
struct ResponseMetadata {
    #[serde(rename = "Error", default)]
    error: Option<VolcanoError>,
}

#[derive(Deserialize)]
struct VolcanoResponseBody {
    #[serde(rename = "ResponseMetadata", default)]
    response_metadata: ResponseMetadata,
    #[serde(rename = "TranslationList", default)]
    translation_list: Vec<VolcanoTranslation>,
}

/// Volcano Engine's translation API, AWS-SigV4-style signed.
pub struct VolcanoTranslator {
    settings: VolcanoSettings,
    transport: Transport,
    capability: TranslatorCapability,
}

impl VolcanoTranslator {
    pub fn new(settings: VolcanoSettings, transport: Transport) -> Self {
        let is_configured = !settings.access_key_id.is_empty() && !settings.secret_access_key.is_empty();
        let capability = TranslatorCapability::new("volcano", "Volcano")
            .requires_api_key(true)
            .configured(is_configured)
            .streaming(false)
            .with_languages(Language::ALL.iter().copied());
        VolcanoTranslator {
            settings,
            transport,
            capability,
        }
    }
}

#[async_trait]
impl Translator for VolcanoTranslator {
    fn capability(&self) -> &TranslatorCapability {
        &self.capability
    }

    fn max_text_len(&self) -> usize {
        MAX_TEXT_LEN
    }

    async fn translate_internal(
        &self,
        request: &TranslationRequest,
        cancel: CancellationToken,
    ) -> Result<TranslationResult, TranslationError> {
        let source_language = if request.from_language() == Language::Auto {
            None
        } else {
            Some(request.from_language().provider_code("volcano"))
        };
        let body = VolcanoRequestBody {
            target_language: request.to_language().provider_code("volcano"),
            source_language,
            text_list: vec![request.text().to_string()],
        };
        let body_bytes = serde_json::to_vec(&body)
            .map_err(|e| TranslationError::invalid_response("volcano", e.to_string()))?;

        let x_date = Utc::now().format("%Y%m%dT%H%M%SZ").to_string();
        let authorization = sign_volcano(
            &self.settings.access_key_id,
            &self.settings.secret_access_key,
            QUERY,
            &body_bytes,
            &x_date,
        );

        let builder = self
            .transport
            .request(
                Method::POST,
                &format!("https://{}/?{}", HOST, QUERY),
            )
            .header("content-type", "application/json")
            .header("host", HOST)
            .header("x-date", &x_date)
            .header("Authorization", &authorization)
            .body(body_bytes);

        let response = send("volcano", builder, &cancel).await?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(TranslationError::service_unavailable("volcano", text));
        }

        let parsed: VolcanoResponseBody = response
            .json()
            .await
            .map_err(|e| translate_provider_utils::map_transport_error("volcano", e))?;

        if let Some(error) = parsed.response_metadata.error {
            return Err(TranslationError::new(
                ErrorKind::ServiceUnavailable,
                "volcano",
                format!("{}: {}", error.code, error.message),
            ));
        }

        let translation = parsed.translation_list.into_iter().next().ok_or_else(|| {
            TranslationError::invalid_response("volcano", "response carried no translation")
        })?;

        let detected_language = translation
            .detected_source_language
            .map(|code| Language::from_provider_code(&code))
            .unwrap_or(Language::Auto);

        Ok(TranslationResult {
            translated_text: translation.translation,
            original_text: request.text().to_string(),
            detected_language,
            target_language: request.to_language(),
            service_name: "Volcano".to_string(),
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
    fn rejects_text_over_five_thousand_chars() {
        let translator = VolcanoTranslator::new(VolcanoSettings::new("id", "secret"), Transport::default());
        assert_eq!(translator.max_text_len(), 5000);
    }

    #[test]
    fn reports_unconfigured_without_credentials() {
        let translator = VolcanoTranslator::new(VolcanoSettings::new("", ""), Transport::default());
        assert!(!translator.capability().is_configured);
    }
}
