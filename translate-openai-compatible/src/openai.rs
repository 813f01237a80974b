use crate::base::{OpenAICompatibleConfig, OpenAICompatibleTranslator};
use std::collections::HashMap;
use std::time::Duration;
use translate_transport::Transport;

/// Settings for the OpenAI provider.
#[derive(Debug, Clone)]
pub struct OpenAiSettings {
    pub api_key: String,
    pub endpoint: Option<String>,
    pub model: String,
    pub temperature: f32,
}

impl Default for OpenAiSettings {
    fn default() -> Self {
        OpenAiSettings {
            api_key: String::new(),
            endpoint: None,
            model: "gpt-4o-mini".to_string(),
            temperature: 0.3,
        }
    }
}

impl OpenAiSettings {
    pub fn new(api_key: impl Into<String>) -> Self {
        OpenAiSettings {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = OpenAICompatibleConfig::clamp_temperature(temperature);
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }
}

/// Builds the translator for OpenAI's `/v1/chat/completions` endpoint.
pub fn openai_translator(settings: OpenAiSettings, transport: Transport) -> OpenAICompatibleTranslator {
    let is_configured = !settings.api_key.is_empty();
    let endpoint = settings
        .endpoint
        .clone()
        .unwrap_or_else(|| "https://api.openai.com/v1/chat/completions".to_string());
    let api_key = settings.api_key.clone();

    let config = OpenAICompatibleConfig {
        service_id: "openai".to_string(),
        display_name: "OpenAI".to_string(),
        model: settings.model,
        temperature: settings.temperature,
        url: Box::new(move || endpoint.clone()),
        headers: Box::new(move || {
            let mut headers = HashMap::new();
            if !api_key.is_empty() {
                headers.insert("Authorization".to_string(), format!("Bearer {}", api_key));
            }
            headers
        }),
        requires_api_key: true,
        is_configured,
        timeout: Duration::from_secs(60),
    };

    OpenAICompatibleTranslator::new(config, transport)
}

#[cfg(test)]
mod tests {
    use super::*;
    use translate_provider::Translator;

    #[test]
    fn reports_unconfigured_without_a_key() {
        let translator = openai_translator(OpenAiSettings::default(), Transport::default());
        assert!(!translator.capability().is_configured);
    }

    #[test]
    fn reports_configured_with_a_key() {
        let translator = openai_translator(OpenAiSettings::new("sk-test"), Transport::default());
        assert!(translator.capability().is_configured);
        assert_eq!(translator.service_id(), "openai");
    }
}
