use crate::base::{OpenAICompatibleConfig, OpenAICompatibleTranslator};
use std::collections::HashMap;
use std::time::Duration;
use translate_transport::Transport;

/// Settings for a user-supplied OpenAI-compatible endpoint ("Custom"):
/// only `endpoint` is required.
#[derive(Debug, Clone)]
pub struct CustomSettings {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub model: String,
    pub temperature: f32,
    pub display_name: String,
}

impl CustomSettings {
    pub fn new(endpoint: impl Into<String>) -> Self {
        CustomSettings {
            endpoint: endpoint.into(),
            api_key: None,
            model: "gpt-4o-mini".to_string(),
            temperature: 0.3,
            display_name: "Custom".to_string(),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = OpenAICompatibleConfig::clamp_temperature(temperature);
        self
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }
}

pub fn custom_translator(settings: CustomSettings, transport: Transport) -> OpenAICompatibleTranslator {
    let endpoint = settings.endpoint.clone();
    let api_key = settings.api_key.clone().unwrap_or_default();

    let config = OpenAICompatibleConfig {
        service_id: "custom".to_string(),
        display_name: settings.display_name,
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
        requires_api_key: false,
        is_configured: true,
        timeout: Duration::from_secs(60),
    };

    OpenAICompatibleTranslator::new(config, transport)
}

#[cfg(test)]
mod tests {
    use super::*;
    use translate_provider::Translator;

    #[test]
    fn custom_endpoint_is_always_considered_configured() {
        let translator = custom_translator(CustomSettings::new("https://my-llm.example/v1/chat/completions"), Transport::default());
        assert!(translator.capability().is_configured);
        assert_eq!(translator.service_id(), "custom");
    }
}
