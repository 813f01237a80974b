use crate::base::{OpenAICompatibleConfig, OpenAICompatibleTranslator};
use std::collections::HashMap;
use std::time::Duration;
use translate_transport::Transport;

#[derive(Debug, Clone)]
pub struct GroqSettings {
    pub api_key: String,
    pub model: String,
    pub temperature: f32,
}

impl Default for GroqSettings {
    fn default() -> Self {
        GroqSettings {
            api_key: String::new(),
            model: "llama-3.3-70b-versatile".to_string(),
            temperature: 0.3,
        }
    }
}

impl GroqSettings {
    pub fn new(api_key: impl Into<String>) -> Self {
        GroqSettings {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

pub fn groq_translator(settings: GroqSettings, transport: Transport) -> OpenAICompatibleTranslator {
    let is_configured = !settings.api_key.is_empty();
    let api_key = settings.api_key.clone();

    let config = OpenAICompatibleConfig {
        service_id: "groq".to_string(),
        display_name: "Groq".to_string(),
        model: settings.model,
        temperature: settings.temperature,
        url: Box::new(|| "https://api.groq.com/openai/v1/chat/completions".to_string()),
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
    fn reports_groq_service_id() {
        let translator = groq_translator(GroqSettings::new("key"), Transport::default());
        assert_eq!(translator.service_id(), "groq");
    }
}
