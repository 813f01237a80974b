use crate::base::{OpenAICompatibleConfig, OpenAICompatibleTranslator};
use std::collections::HashMap;
use std::time::Duration;
use translate_transport::Transport;

/// Zhipu AI (BigModel) — one of the eight OpenAI-compatible providers,
/// a thin wrapper pointed at Zhipu's GLM endpoint.
#[derive(Debug, Clone)]
pub struct ZhipuSettings {
    pub api_key: String,
    pub model: String,
    pub temperature: f32,
}

impl Default for ZhipuSettings {
    fn default() -> Self {
        ZhipuSettings {
            api_key: String::new(),
            model: "glm-4-flash".to_string(),
            temperature: 0.3,
        }
    }
}

impl ZhipuSettings {
    pub fn new(api_key: impl Into<String>) -> Self {
        ZhipuSettings {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

pub fn zhipu_translator(settings: ZhipuSettings, transport: Transport) -> OpenAICompatibleTranslator {
    let is_configured = !settings.api_key.is_empty();
    let api_key = settings.api_key.clone();

    let config = OpenAICompatibleConfig {
        service_id: "zhipu".to_string(),
        display_name: "Zhipu AI".to_string(),
        model: settings.model,
        temperature: settings.temperature,
        url: Box::new(|| "https://open.bigmodel.cn/api/paas/v4/chat/completions".to_string()),
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
    fn reports_zhipu_service_id() {
        let translator = zhipu_translator(ZhipuSettings::new("key"), Transport::default());
        assert_eq!(translator.service_id(), "zhipu");
    }
}
