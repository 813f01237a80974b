use crate::base::{OpenAICompatibleConfig, OpenAICompatibleTranslator};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use translate_provider::{Translator, TranslatorCapability, TranslationStream};
use translate_transport::Transport;
use translate_types::{TranslationError, TranslationRequest, TranslationResult};

#[derive(Debug, Clone)]
pub struct OllamaSettings {
    pub endpoint: String,
    pub model: String,
}

impl Default for OllamaSettings {
    fn default() -> Self {
        OllamaSettings {
            endpoint: "http://localhost:11434".to_string(),
            model: "llama3.2".to_string(),
        }
    }
}

impl OllamaSettings {
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

#[derive(Deserialize)]
struct TagsResponse {
    models: Vec<TagsModel>,
}

#[derive(Deserialize)]
struct TagsModel {
    name: String,
}

/// Ollama: no API key, talks to a local server, and can refresh its active
/// model from whatever is actually pulled.
///
/// The active model lives behind an `RwLock` because
/// [`OllamaTranslator::refresh_local_models`] needs to mutate it after
/// construction while [`Translator`]'s methods only ever see `&self`.
pub struct OllamaTranslator {
    endpoint: String,
    model: Arc<RwLock<String>>,
    transport: Transport,
    capability: TranslatorCapability,
}

impl OllamaTranslator {
    pub fn new(settings: OllamaSettings, transport: Transport) -> Self {
        let capability = TranslatorCapability::new("ollama", "Ollama")
            .requires_api_key(false)
            .configured(true)
            .streaming(true)
            .with_languages(translate_types::Language::ALL.iter().copied());
        OllamaTranslator {
            endpoint: settings.endpoint,
            model: Arc::new(RwLock::new(settings.model)),
            transport,
            capability,
        }
    }

    fn current_model(&self) -> String {
        self.model.read().expect("ollama model lock is not poisoned").clone()
    }

    fn inner(&self) -> OpenAICompatibleTranslator {
        let endpoint = self.endpoint.clone();
        let config = OpenAICompatibleConfig {
            service_id: "ollama".to_string(),
            display_name: "Ollama".to_string(),
            model: self.current_model(),
            temperature: 0.3,
            url: Box::new(move || format!("{}/v1/chat/completions", endpoint)),
            headers: Box::new(HashMap::new),
            requires_api_key: false,
            is_configured: true,
            timeout: Duration::from_secs(60),
        };
        OpenAICompatibleTranslator::new(config, self.transport.clone())
    }

    /// GETs `{endpoint}/api/tags` and switches the active model to the
    /// first one listed if the current selection is no longer present.
    pub async fn refresh_local_models(&self) -> Result<Vec<String>, TranslationError> {
        let url = format!("{}/api/tags", self.endpoint);
        let response = self
            .transport
            .get(&url)
            .send()
            .await
            .map_err(|e| translate_provider_utils::map_transport_error("ollama", e))?;

        let tags: TagsResponse = response
            .json()
            .await
            .map_err(|e| translate_provider_utils::map_transport_error("ollama", e))?;
        let names: Vec<String> = tags.models.into_iter().map(|m| m.name).collect();

        let mut model = self.model.write().expect("ollama model lock is not poisoned");
        if !names.contains(&*model) {
            if let Some(first) = names.first() {
                log::info!("ollama: active model \"{model}\" is no longer pulled, switching to \"{first}\"");
                *model = first.clone();
            }
        }
        Ok(names)
    }
}

#[async_trait]
impl Translator for OllamaTranslator {
    fn capability(&self) -> &TranslatorCapability {
        &self.capability
    }

    async fn translate_internal(
        &self,
        request: &TranslationRequest,
        cancel: CancellationToken,
    ) -> Result<TranslationResult, TranslationError> {
        self.inner().translate_internal(request, cancel).await
    }

    async fn translate_stream_internal(
        &self,
        request: &TranslationRequest,
        cancel: CancellationToken,
    ) -> Result<TranslationStream, TranslationError> {
        self.inner().translate_stream_internal(request, cancel).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_localhost() {
        let translator = OllamaTranslator::new(OllamaSettings::default(), Transport::default());
        assert_eq!(translator.endpoint, "http://localhost:11434");
        assert!(translator.capability().is_configured);
        assert!(!translator.capability().requires_api_key);
    }
}
