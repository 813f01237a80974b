use crate::base::{OpenAICompatibleConfig, OpenAICompatibleTranslator};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use translate_provider::{Translator, TranslatorCapability, TranslationStream};
use translate_signing::SecretStore;
use translate_transport::Transport;
use translate_types::{ErrorKind, TranslationError, TranslationRequest, TranslationResult};

/// Models the proxy is willing to forward.
const PROXY_MODEL_ALLOW_LIST: [&str; 2] = ["glm-4-flash", "glm-4-flash-250414"];

const PROXY_KEY_SECRET_NAME: &str = "TRANSLATE_BUILTIN_PROXY_KEY";
const PROXY_ORIGIN_SECRET_NAME: &str = "TRANSLATE_BUILTIN_PROXY_ORIGIN";

#[derive(Debug, Clone, Default)]
pub struct BuiltinSettings {
    pub model: String,
    pub api_key: Option<String>,
    pub device_id: Option<String>,
    pub device_token: Option<String>,
}

impl BuiltinSettings {
    pub fn new(model: impl Into<String>) -> Self {
        BuiltinSettings {
            model: model.into(),
            ..Default::default()
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_device(mut self, device_id: impl Into<String>, device_token: impl Into<String>) -> Self {
        self.device_id = Some(device_id.into());
        self.device_token = Some(device_token.into());
        self
    }
}

#[derive(Deserialize)]
struct RegisterDeviceResponse {
    device_token: String,
}

/// Routes to one of three destinations depending on what the caller
/// configured:
///
/// 1. caller-supplied key → direct connection to the model's own provider
///    (GLM for `glm-*`, Groq for `llama-*`);
/// 2. no key → the embedded proxy, authenticated with an embedded key and
///    `X-Device-Id`/`X-Device-Token` headers, restricted to
///    [`PROXY_MODEL_ALLOW_LIST`].
pub struct BuiltinTranslator {
    settings: BuiltinSettings,
    secrets: Arc<dyn SecretStore>,
    transport: Transport,
    capability: TranslatorCapability,
}

impl BuiltinTranslator {
    pub fn new(settings: BuiltinSettings, secrets: Arc<dyn SecretStore>, transport: Transport) -> Self {
        let capability = TranslatorCapability::new("builtin", "Built-in AI")
            .requires_api_key(false)
            .configured(true)
            .streaming(true)
            .with_languages(translate_types::Language::ALL.iter().copied());
        BuiltinTranslator {
            settings,
            secrets,
            transport,
            capability,
        }
    }

    fn direct_config(&self, api_key: &str) -> Result<OpenAICompatibleConfig, TranslationError> {
        let model = self.settings.model.clone();
        let (service_id, display_name, url): (&str, &str, &str) = if model.starts_with("glm-") {
            ("builtin-glm", "Built-in AI (GLM)", "https://open.bigmodel.cn/api/paas/v4/chat/completions")
        } else if model.starts_with("llama-") {
            ("builtin-groq", "Built-in AI (Groq)", "https://api.groq.com/openai/v1/chat/completions")
        } else {
            return Err(TranslationError::invalid_model("builtin", model));
        };
        let url = url.to_string();
        let api_key = api_key.to_string();

        Ok(OpenAICompatibleConfig {
            service_id: service_id.to_string(),
            display_name: display_name.to_string(),
            model,
            temperature: 0.3,
            url: Box::new(move || url.clone()),
            headers: Box::new(move || {
                let mut headers = HashMap::new();
                headers.insert("Authorization".to_string(), format!("Bearer {}", api_key));
                headers
            }),
            requires_api_key: true,
            is_configured: true,
            timeout: Duration::from_secs(60),
        })
    }

    fn proxy_config(&self) -> Result<OpenAICompatibleConfig, TranslationError> {
        if !PROXY_MODEL_ALLOW_LIST.contains(&self.settings.model.as_str()) {
            return Err(TranslationError::invalid_model("builtin", &self.settings.model));
        }
        let origin = self
            .secrets
            .get(PROXY_ORIGIN_SECRET_NAME)
            .ok_or_else(|| TranslationError::service_unavailable("builtin", "proxy origin is not configured"))?;
        let embedded_key = self
            .secrets
            .get(PROXY_KEY_SECRET_NAME)
            .ok_or_else(|| TranslationError::service_unavailable("builtin", "proxy key is not configured"))?;
        let device_id = self.settings.device_id.clone().unwrap_or_default();
        let device_token = self.settings.device_token.clone().unwrap_or_default();
        let url = format!("{}/v1/chat/completions", origin);

        Ok(OpenAICompatibleConfig {
            service_id: "builtin-proxy".to_string(),
            display_name: "Built-in AI".to_string(),
            model: self.settings.model.clone(),
            temperature: 0.3,
            url: Box::new(move || url.clone()),
            headers: Box::new(move || {
                let mut headers = HashMap::new();
                headers.insert("Authorization".to_string(), format!("Bearer {}", embedded_key));
                headers.insert("X-Device-Id".to_string(), device_id.clone());
                headers.insert("X-Device-Token".to_string(), device_token.clone());
                headers
            }),
            requires_api_key: false,
            is_configured: true,
            timeout: Duration::from_secs(60),
        })
    }

    fn inner(&self) -> Result<OpenAICompatibleTranslator, TranslationError> {
        let config = match &self.settings.api_key {
            Some(key) if !key.is_empty() => self.direct_config(key)?,
            _ => self.proxy_config()?,
        };
        Ok(OpenAICompatibleTranslator::new(config, self.transport.clone()))
    }

    /// POSTs to `{proxy-origin}/v1/device/register` with `X-Device-Id` and
    /// the embedded bearer, returning the freshly issued `device_token`.
    /// Any failure — missing secrets, transport error, malformed body —
    /// resolves to `None` without mutating `self`.
    pub async fn register_device(&self, device_id: &str) -> Option<String> {
        let origin = self.secrets.get(PROXY_ORIGIN_SECRET_NAME)?;
        let embedded_key = self.secrets.get(PROXY_KEY_SECRET_NAME)?;
        let url = format!("{}/v1/device/register", origin);

        let response = self
            .transport
            .post(&url)
            .bearer_auth(embedded_key)
            .header("X-Device-Id", device_id)
            .send()
            .await
            .ok()?;
        if !response.status().is_success() {
            return None;
        }
        let parsed: RegisterDeviceResponse = response.json().await.ok()?;
        Some(parsed.device_token)
    }
}

#[async_trait]
impl Translator for BuiltinTranslator {
    fn capability(&self) -> &TranslatorCapability {
        &self.capability
    }

    async fn translate_internal(
        &self,
        request: &TranslationRequest,
        cancel: CancellationToken,
    ) -> Result<TranslationResult, TranslationError> {
        self.inner()?.translate_internal(request, cancel).await
    }

    async fn translate_stream_internal(
        &self,
        request: &TranslationRequest,
        cancel: CancellationToken,
    ) -> Result<TranslationStream, TranslationError> {
        self.inner()?.translate_stream_internal(request, cancel).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap as StdHashMap;
    use std::sync::Mutex;

    struct FakeSecretStore(Mutex<StdHashMap<String, String>>);

    impl SecretStore for FakeSecretStore {
        fn get(&self, name: &str) -> Option<String> {
            self.0.lock().unwrap().get(name).cloned()
        }
    }

    fn empty_secrets() -> Arc<dyn SecretStore> {
        Arc::new(FakeSecretStore(Mutex::new(StdHashMap::new())))
    }

    #[tokio::test]
    async fn direct_mode_routes_glm_models_to_glm() {
        let translator = BuiltinTranslator::new(
            BuiltinSettings::new("glm-4-flash").with_api_key("user-key"),
            empty_secrets(),
            Transport::default(),
        );
        let config = translator.direct_config("user-key").unwrap();
        assert_eq!(config.service_id, "builtin-glm");
    }

    #[tokio::test]
    async fn direct_mode_routes_llama_models_to_groq() {
        let translator = BuiltinTranslator::new(
            BuiltinSettings::new("llama-3.3-70b").with_api_key("user-key"),
            empty_secrets(),
            Transport::default(),
        );
        let config = translator.direct_config("user-key").unwrap();
        assert_eq!(config.service_id, "builtin-groq");
    }

    #[tokio::test]
    async fn proxy_mode_rejects_models_outside_the_allow_list() {
        let translator = BuiltinTranslator::new(
            BuiltinSettings::new("gpt-4o"),
            empty_secrets(),
            Transport::default(),
        );
        let err = translator.proxy_config().unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidModel);
    }

    #[tokio::test]
    async fn register_device_fails_closed_without_secrets() {
        let translator = BuiltinTranslator::new(
            BuiltinSettings::new("glm-4-flash"),
            empty_secrets(),
            Transport::default(),
        );
        assert!(translator.register_device("device-1").await.is_none());
    }
}
