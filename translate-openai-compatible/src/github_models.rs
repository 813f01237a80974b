use crate::base::{OpenAICompatibleConfig, OpenAICompatibleTranslator};
use std::collections::HashMap;
use std::time::Duration;
use translate_transport::Transport;

#[derive(Debug, Clone)]
pub struct GitHubModelsSettings {
    pub api_key: String,
    pub model: String,
    pub temperature: f32,
}

impl Default for GitHubModelsSettings {
    fn default() -> Self {
        GitHubModelsSettings {
            api_key: String::new(),
            model: "gpt-4o-mini".to_string(),
            temperature: 0.3,
        }
    }
}

impl GitHubModelsSettings {
    pub fn new(api_key: impl Into<String>) -> Self {
        GitHubModelsSettings {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

/// GitHub Models — endpoint `models.github.ai/…`.
pub fn github_models_translator(
    settings: GitHubModelsSettings,
    transport: Transport,
) -> OpenAICompatibleTranslator {
    let is_configured = !settings.api_key.is_empty();
    let api_key = settings.api_key.clone();

    let config = OpenAICompatibleConfig {
        service_id: "github-models".to_string(),
        display_name: "GitHub Models".to_string(),
        model: settings.model,
        temperature: settings.temperature,
        url: Box::new(|| "https://models.github.ai/inference/chat/completions".to_string()),
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
    fn reports_github_models_service_id() {
        let translator = github_models_translator(GitHubModelsSettings::new("key"), Transport::default());
        assert_eq!(translator.service_id(), "github-models");
    }
}
