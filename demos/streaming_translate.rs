/// Streaming translation example demonstrating incremental chunk
/// consumption and cooperative cancellation.
///
/// This example shows how to:
/// - Call `translate_stream` on a streaming-capable provider
/// - Consume text deltas as they arrive
/// - Cancel an in-flight translation via a `CancellationToken`
///
/// Run with:
/// ```bash
/// export OPENAI_API_KEY="your-api-key"
/// cargo run --example streaming_translate
/// ```
use futures_util::StreamExt;
use std::env;
use tokio_util::sync::CancellationToken;
use translate_openai_compatible::{openai_translator, OpenAiSettings};
use translate_provider::Translator;
use translate_transport::Transport;
use translate_types::{Language, TranslationRequest};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let api_key = env::var("OPENAI_API_KEY")
        .map_err(|_| "OPENAI_API_KEY environment variable not set")?;

    let translator = openai_translator(OpenAiSettings::new(api_key), Transport::default());
    let request = TranslationRequest::new(
        "The quick brown fox jumps over the lazy dog.",
        Language::Japanese,
    )
    .with_from_language(Language::English);

    let cancel = CancellationToken::new();
    let mut stream = translator.translate_stream(&request, cancel.clone()).await?;

    print!("translation: ");
    while let Some(chunk) = stream.next().await {
        match chunk {
            Ok(text) => print!("{text}"),
            Err(err) => {
                eprintln!("\nstream failed: {err}");
                break;
            }
        }
    }
    println!();

    Ok(())
}
