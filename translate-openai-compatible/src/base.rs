use async_trait::async_trait;
use reqwest::Method;
use serde::Serialize;
use std::collections::HashMap;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use translate_provider::{Translator, TranslatorCapability, TranslationStream};
use translate_provider_utils::{collapse_stream, status_to_kind, parse_retry_after};
use translate_transport::{decode_openai_sse, send, Transport};
use translate_types::{ErrorKind, Language, TranslationError, TranslationRequest, TranslationResult};

/// The system prompt every OpenAI-compatible provider sends verbatim
///: instructs the model to behave as a translator and to
/// return nothing but the translated text.
pub const SYSTEM_PROMPT: &str = "You are a translation expert specializing in accurate, \
natural-sounding translations between languages. Only return the translated text, without \
including redundant quotes or additional notes.";

/// Builds the user turn: `Translate the following {source} text into
/// {target} text: """{text}"""`, where `{source}` falls back
/// to "the detected language" when the request's `from_language` is
/// `Auto`.
pub fn build_user_prompt(request: &TranslationRequest) -> String {
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

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Serialize)]
struct ChatRequestBody<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
    stream: bool,
}

/// Configuration shared by every OpenAI-compatible-family provider: where
/// to send the request, how to authenticate, and which model/temperature
/// to use by default. `url` is a closure so Ollama can recompute its
/// endpoint from a mutable base while the rest just return a constant.
pub struct OpenAICompatibleConfig {
    pub service_id: String,
    pub display_name: String,
    pub model: String,
    pub temperature: f32,
    pub url: Box<dyn Fn() -> String + Send + Sync>,
    pub headers: Box<dyn Fn() -> HashMap<String, String> + Send + Sync>,
    pub requires_api_key: bool,
    pub is_configured: bool,
    pub timeout: Duration,
}

impl OpenAICompatibleConfig {
    /// Clamps a caller-supplied temperature to the `[0, 2]` range the
    /// configuration surface promises.
    pub fn clamp_temperature(temperature: f32) -> f32 {
        temperature.clamp(0.0, 2.0)
    }
}

/// Drives an [`OpenAICompatibleConfig`] through the shared request/stream
/// logic: every model-specific provider in this crate is a thin wrapper
/// that builds one of these and implements [`Translator::capability`].
pub struct OpenAICompatibleTranslator {
    config: OpenAICompatibleConfig,
    transport: Transport,
    capability: TranslatorCapability,
}

impl OpenAICompatibleTranslator {
    pub fn new(config: OpenAICompatibleConfig, transport: Transport) -> Self {
        let capability = TranslatorCapability::new(config.service_id.clone(), config.display_name.clone())
            .requires_api_key(config.requires_api_key)
            .configured(config.is_configured)
            .streaming(true)
            .with_languages(Language::ALL.iter().copied());
        OpenAICompatibleTranslator {
            config,
            transport,
            capability,
        }
    }

    fn request_body<'a>(&'a self, request: &TranslationRequest) -> ChatRequestBody<'a> {
        ChatRequestBody {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: build_user_prompt(request),
                },
            ],
            temperature: self.config.temperature,
            stream: true,
        }
    }
}

#[async_trait]
impl Translator for OpenAICompatibleTranslator {
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
            service_name: self.config.display_name.clone(),
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
        let body = self.request_body(request);
        let url = (self.config.url)();
        let mut builder = self
            .transport
            .request(Method::POST, &url)
            .timeout(self.config.timeout)
            .json(&body);
        for (key, value) in (self.config.headers)() {
            builder = builder.header(key, value);
        }

        let response = send(&self.config.service_id, builder, &cancel).await?;
        let status = response.status();
        if !status.is_success() {
            let retry_after = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(parse_retry_after);
            let body_text = response.text().await.unwrap_or_default();
            let kind = match status.as_u16() {
                401 => ErrorKind::InvalidApiKey,
                429 => ErrorKind::RateLimited,
                500..=599 => ErrorKind::ServiceUnavailable,
                _ => status_to_kind(status),
            };
            let mut err = TranslationError::new(kind, &self.config.service_id, body_text);
            if let Some(retry_after) = retry_after {
                err = err.with_retry_after(retry_after);
            }
            return Err(err);
        }

        let byte_stream = response.bytes_stream();
        Ok(decode_openai_sse(&self.config.service_id, byte_stream, cancel))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_prompt_falls_back_to_detected_language_on_auto() {
        let req = TranslationRequest::new("hi", Language::French);
        let prompt = build_user_prompt(&req);
        assert!(prompt.contains("the detected language"));
        assert!(prompt.contains("French"));
        assert!(prompt.contains(r#"""""#));
    }

    #[test]
    fn user_prompt_names_explicit_source_language() {
        let req = TranslationRequest::new("hi", Language::French).with_from_language(Language::English);
        let prompt = build_user_prompt(&req);
        assert!(prompt.contains("English"));
    }

    #[test]
    fn clamp_temperature_bounds_to_zero_two() {
        assert_eq!(OpenAICompatibleConfig::clamp_temperature(-1.0), 0.0);
        assert_eq!(OpenAICompatibleConfig::clamp_temperature(5.0), 2.0);
        assert_eq!(OpenAICompatibleConfig::clamp_temperature(0.7), 0.7);
    }

    fn config_for(url: String) -> OpenAICompatibleConfig {
        OpenAICompatibleConfig {
            service_id: "openai".to_string(),
            display_name: "OpenAI".to_string(),
            model: "gpt-4o-mini".to_string(),
            temperature: 0.3,
            url: Box::new(move || url.clone()),
            headers: Box::new(|| HashMap::new()),
            requires_api_key: true,
            is_configured: true,
            timeout: Duration::from_secs(5),
        }
    }

    #[tokio::test]
    async fn translate_internal_collapses_a_mocked_sse_response() {
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        let body = "data: {\"choices\":[{\"delta\":{\"content\":\"Bonjour\"}}]}\n\
                     data: {\"choices\":[{\"delta\":{\"content\":\", ca va\"}}]}\n\
                     data: [DONE]\n";
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/event-stream"))
            .mount(&server)
            .await;

        let translator = OpenAICompatibleTranslator::new(
            config_for(format!("{}/chat/completions", server.uri())),
            Transport::default(),
        );
        let request = TranslationRequest::new("Hi, how are you?", Language::French)
            .with_from_language(Language::English);
        let result = translator
            .translate_internal(&request, CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(result.translated_text, "Bonjour, ca va");
    }

    #[tokio::test]
    async fn translate_internal_maps_a_401_to_invalid_api_key() {
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid key"))
            .mount(&server)
            .await;

        let translator = OpenAICompatibleTranslator::new(
            config_for(format!("{}/chat/completions", server.uri())),
            Transport::default(),
        );
        let request = TranslationRequest::new("hi", Language::French);
        let err = translator
            .translate_internal(&request, CancellationToken::new())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidApiKey);
    }
}
