use async_trait::async_trait;
use chrono::Utc;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use translate_provider::{Translator, TranslatorCapability};
use translate_provider_utils::status_to_kind;
use translate_signing::sign_niutrans;
use translate_transport::{send, Transport};
use translate_types::{ErrorKind, Language, TranslationError, TranslationRequest, TranslationResult};

const HOST: &str = "ntrans.xfyun.cn";
const PATH: &str = "/v1/trans";

#[derive(Debug, Clone)]
pub struct NiuTransSettings {
    pub api_key: String,
}

impl NiuTransSettings {
    pub fn new(api_key: impl Into<String>) -> Self {
        NiuTransSettings {
            api_key: api_key.into(),
        }
    }
}

#[derive(Serialize)]
struct NiuTransRequestBody<'a> {
    text: &'a str,
    from: String,
    to: String,
}

#[derive(Deserialize)]
struct NiuTransResponseBody {
    #[serde(default)]
    translation: Vec<String>,
    #[serde(default)]
    error_msg: Option<String>,
}

pub struct NiuTransTranslator {
    settings: NiuTransSettings,
    transport: Transport,
    capability: TranslatorCapability,
}

impl NiuTransTranslator {
    pub fn new(settings: NiuTransSettings, transport: Transport) -> Self {
        let is_configured = !settings.api_key.is_empty();
        let capability = TranslatorCapability::new("niutrans", "NiuTrans")
            .requires_api_key(true)
            .configured(is_configured)
            .streaming(false)
            .with_languages(Language::ALL.iter().copied());
        NiuTransTranslator {
            settings,
            transport,
            capability,
        }
    }
}

#[async_trait]
impl Translator for NiuTransTranslator {
    fn capability(&self) -> &TranslatorCapability {
        &self.capability
    }

    async fn translate_internal(
        &self,
        request: &TranslationRequest,
        cancel: CancellationToken,
    ) -> Result<TranslationResult, TranslationError> {
        let body = NiuTransRequestBody {
            text: request.text(),
            from: request.from_language().iso_code().to_string(),
            to: request.to_language().iso_code().to_string(),
        };
        let body_bytes = serde_json::to_vec(&body)
            .map_err(|e| TranslationError::invalid_response("niutrans", e.to_string()))?;

        let date = Utc::now().format("%a, %d %b %Y %H:%M:%S GMT").to_string();
        let signature = sign_niutrans(HOST, PATH, &body_bytes, &self.settings.api_key, &date);

        let builder = self
            .transport
            .request(Method::POST, &format!("https://{}{}", HOST, PATH))
            .header("host", HOST)
            .header("date", &signature.date)
            .header("digest", &signature.digest)
            .header("authorization", &signature.authorization)
            .header("content-type", "application/json")
            .body(body_bytes);

        let response = send("niutrans", builder, &cancel).await?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(TranslationError::new(status_to_kind(status), "niutrans", text));
        }

        let parsed: NiuTransResponseBody = response
            .json()
            .await
            .map_err(|e| translate_provider_utils::map_transport_error("niutrans", e))?;

        if let Some(message) = parsed.error_msg {
            return Err(TranslationError::new(ErrorKind::ServiceUnavailable, "niutrans", message));
        }
        let translated_text = parsed.translation.into_iter().next().ok_or_else(|| {
            TranslationError::invalid_response("niutrans", "response carried no translation")
        })?;

        Ok(TranslationResult {
            translated_text,
            original_text: request.text().to_string(),
            detected_language: request.from_language(),
            target_language: request.to_language(),
            service_name: "NiuTrans".to_string(),
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
        let translator = NiuTransTranslator::new(NiuTransSettings::new(""), Transport::default());
        assert!(!translator.capability().is_configured);
    }
}
