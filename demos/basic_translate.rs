/// Basic translation example demonstrating a single provider call through
/// the gateway facade.
///
/// This example shows how to:
/// - Build a `ProviderRegistry` with one configured provider
/// - Acquire a `TranslationGateway` over it
/// - Run a single translation and inspect the result
///
/// Run with:
/// ```bash
/// export OPENAI_API_KEY="your-api-key"
/// cargo run --example basic_translate
/// ```
use std::env;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use translate_openai_compatible::{openai_translator, OpenAiSettings};
use translate_provider::Translator;
use translate_registry::{ProviderRegistry, TranslationGateway};
use translate_transport::Transport;
use translate_types::{Language, TranslationRequest};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let api_key = env::var("OPENAI_API_KEY")
        .map_err(|_| "OPENAI_API_KEY environment variable not set")?;

    let transport = Transport::default();
    let openai = openai_translator(OpenAiSettings::new(api_key), transport);

    let registry = Arc::new(ProviderRegistry::new([Arc::new(openai) as Arc<dyn Translator>]));
    let gateway = TranslationGateway::new(registry);

    let request = TranslationRequest::new("Good morning, how are you?", Language::French)
        .with_from_language(Language::English);

    let result = gateway
        .translate("openai", &request, CancellationToken::new())
        .await?;

    println!("source:      {}", result.original_text);
    println!("translation: {}", result.translated_text);
    println!("via:         {} ({} ms)", result.service_name, result.timing_ms);

    Ok(())
}
