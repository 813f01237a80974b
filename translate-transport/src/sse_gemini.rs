use bytes::Bytes;
use futures_util::{Stream, StreamExt};
use serde::Deserialize;
use tokio_util::sync::CancellationToken;
use translate_provider::TranslationStream;

#[derive(Deserialize)]
struct GeminiStreamChunk {
    candidates: Vec<GeminiCandidate>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: GeminiContent,
}

#[derive(Deserialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Deserialize)]
struct GeminiPart {
    text: Option<String>,
}

/// Decodes Gemini's `streamGenerateContent?alt=sse` body: each
/// line optionally carries a `data: ` prefix (stripped if present, not
/// required), and any `[DONE]` marker is ignored rather than treated as a
/// terminator — Gemini's stream simply ends when the connection closes.
///
/// `cancel` is checked between chunks, same as `translate-transport`'s
/// non-streaming `send`: a caller-initiated cancellation stops the decoder
/// mid-stream rather than waiting for the body to finish arriving.
pub fn decode_gemini_sse(
    service_id: &str,
    byte_stream: impl Stream<Item = Result<Bytes, reqwest::Error>> + Send + 'static,
    cancel: CancellationToken,
) -> TranslationStream {
    let service_id = service_id.to_string();
    Box::pin(async_stream::stream! {
        let mut buffer = String::new();
        let mut stream = Box::pin(byte_stream);

        loop {
            let next = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    log::warn!("{service_id}: stream decoder cancelled before completion");
                    break;
                }
                next = stream.next() => next,
            };
            let Some(result) = next else { break };
            let bytes = match result {
                Ok(bytes) => bytes,
                Err(e) => {
                    yield Err(translate_provider_utils::map_transport_error(&service_id, e));
                    break;
                }
            };
            let Ok(text) = std::str::from_utf8(&bytes) else { continue };
            buffer.push_str(text);

            while let Some(pos) = buffer.find('\n') {
                let line = buffer[..pos].trim().to_string();
                buffer.drain(..=pos);

                if line.is_empty() {
                    continue;
                }
                let data = line.strip_prefix("data: ").unwrap_or(&line);
                if data == "[DONE]" {
                    continue;
                }

                if let Ok(chunk) = serde_json::from_str::<GeminiStreamChunk>(data) {
                    if let Some(text) = chunk
                        .candidates
                        .into_iter()
                        .next()
                        .and_then(|c| c.content.parts.into_iter().next())
                        .and_then(|p| p.text)
                    {
                        if !text.is_empty() {
                            yield Ok(text);
                        }
                    }
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn byte_stream(
        lines: Vec<&'static str>,
    ) -> impl Stream<Item = Result<Bytes, reqwest::Error>> + Send + 'static {
        futures_util::stream::iter(
            lines
                .into_iter()
                .map(|l| Ok(Bytes::from(format!("{l}\n")))),
        )
    }

    #[tokio::test]
    async fn reads_text_with_data_prefix() {
        let stream = byte_stream(vec![
            r#"data: {"candidates":[{"content":{"parts":[{"text":"Bonjour"}]}}]}"#,
        ]);
        let decoded = decode_gemini_sse("gemini", stream, CancellationToken::new());
        let chunks: Vec<String> = decoded.collect::<Vec<_>>().await.into_iter().map(|r| r.unwrap()).collect();
        assert_eq!(chunks.join(""), "Bonjour");
    }

    #[tokio::test]
    async fn reads_text_without_data_prefix() {
        let stream = byte_stream(vec![
            r#"{"candidates":[{"content":{"parts":[{"text":"Hola"}]}}]}"#,
        ]);
        let decoded = decode_gemini_sse("gemini", stream, CancellationToken::new());
        let chunks: Vec<String> = decoded.collect::<Vec<_>>().await.into_iter().map(|r| r.unwrap()).collect();
        assert_eq!(chunks.join(""), "Hola");
    }

    #[tokio::test]
    async fn an_already_cancelled_token_stops_the_decoder_before_any_chunk() {
        let stream = byte_stream(vec![
            r#"data: {"candidates":[{"content":{"parts":[{"text":"Bonjour"}]}}]}"#,
        ]);
        let cancel = CancellationToken::new();
        cancel.cancel();
        let decoded = decode_gemini_sse("gemini", stream, cancel);
        let chunks: Vec<_> = decoded.collect().await;
        assert!(chunks.is_empty());
    }
}
