use async_trait::async_trait;
use reqwest::Method;
use serde::Serialize;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use translate_provider::{Translator, TranslatorCapability, TranslationStream};
use translate_provider_utils::{collapse_stream, status_to_kind};
use translate_transport::{decode_gemini_sse, send, Transport};
use translate_types::{ErrorKind, Language, TranslationError, TranslationRequest, TranslationResult};

const SYSTEM_INSTRUCTION: &str = "You are a translation expert specializing in accurate, \
natural-sounding translations between languages. Only return the translated text, without \
including redundant quotes or additional notes.";

#[derive(Debug, Clone)]
pub struct GeminiSettings {
    pub api_key: String,
    pub model: String,
    pub temperature: f32,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        GeminiSettings {
            api_key: String::new(),
            model: "gemini-1.5-flash".to_string(),
            temperature: 0.3,
        }
    }
}

impl GeminiSettings {
    pub fn new(api_key: impl Into<String>) -> Self {
        GeminiSettings {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
struct Content {
    role: &'static str,
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct SystemInstruction {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Serialize)]
struct GeminiRequestBody {
    contents: Vec<Content>,
    #[serde(rename = "systemInstruction")]
    system_instruction: SystemInstruction,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

fn user_prompt(request: &TranslationRequest) -> String {
    let source = if request.from_language() == Language::Auto {
        "the detected language".to_string()
    } else {
        request.from_language().display_name().to_string()
    };
    format!(
        "Translate the following {source} text into {target} text: \"\"\"{text}\"\"\"",
        source = source,
        target = request.to_language().display_name(),
        text = request.text(),
    )
}

/// Gemini's bespoke `streamGenerateContent?alt=sse` endpoint:
/// the API key travels as a query parameter, never an `Authorization`
/// header.
pub struct GeminiTranslator {
    settings: GeminiSettings,
    transport: Transport,
    capability: TranslatorCapability,
}

impl GeminiTranslator {
    pub fn new(settings: GeminiSettings, transport: Transport) -> Self {
        let is_configured = !settings.api_key.is_empty();
        let capability = TranslatorCapability::new("gemini", "Gemini")
            .requires_api_key(true)
            .configured(is_configured)
            .streaming(true)
            .with_languages(Language::ALL.iter().copied());
        GeminiTranslator {
            settings,
            transport,
            capability,
        }
    }

    fn url(&self) -> String {
        format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{model}:streamGenerateContent?alt=sse&key={key}",
            model = self.settings.model,
            key = self.settings.api_key,
        )
    }
}

#[async_trait]
impl Translator for GeminiTranslator {
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
            service_name: "Gemini".to_string(),
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
        let body = GeminiRequestBody {
            contents: vec![Content {
                role: "user",
                parts: vec![Part {
                    text: user_prompt(request),
                }],
            }],
            system_instruction: SystemInstruction {
                parts: vec![Part {
                    text: SYSTEM_INSTRUCTION.to_string(),
                }],
            },
            generation_config: GenerationConfig {
                temperature: self.settings.temperature,
            },
        };

        let builder = self
            .transport
            .request(Method::POST, &self.url())
            .timeout(Duration::from_secs(60))
            .json(&body);

        let response = send("gemini", builder, &cancel).await?;
        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            let kind = match status.as_u16() {
                401 | 403 => ErrorKind::InvalidApiKey,
                429 => ErrorKind::RateLimited,
                500..=599 => ErrorKind::ServiceUnavailable,
                _ => status_to_kind(status),
            };
            return Err(TranslationError::new(kind, "gemini", body_text));
        }

        Ok(decode_gemini_sse("gemini", response.bytes_stream(), cancel))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_key_travels_as_a_query_parameter() {
        let translator = GeminiTranslator::new(GeminiSettings::new("my-key"), Transport::default());
        let url = translator.url();
        assert!(url.contains("key=my-key"));
        assert!(url.contains("streamGenerateContent"));
    }

    #[test]
    fn reports_unconfigured_without_a_key() {
        let translator = GeminiTranslator::new(GeminiSettings::default(), Transport::default());
        assert!(!translator.capability().is_configured);
    }
}
