use bytes::Bytes;
use futures_util::{Stream, StreamExt};
use serde::Deserialize;
use tokio_util::sync::CancellationToken;
use translate_provider::TranslationStream;
use translate_types::TranslationError;

#[derive(Deserialize)]
struct OpenAIStreamChunk {
    choices: Vec<OpenAIStreamChoice>,
}

#[derive(Deserialize)]
struct OpenAIStreamChoice {
    delta: OpenAIStreamDelta,
}

#[derive(Deserialize, Default)]
struct OpenAIStreamDelta {
    content: Option<String>,
}

/// Decodes an OpenAI-compatible chat-completions SSE byte stream into text
/// chunks: each non-empty `data: ` line is either `[DONE]`
/// (terminate) or a JSON object whose `choices[0].delta.content`, if
/// present and non-empty, is yielded. Lines without the `data: ` prefix are
/// ignored.
///
/// `cancel` is checked between chunks, same as `translate-transport`'s
/// non-streaming `send`: a caller-initiated cancellation stops the decoder
/// mid-stream rather than waiting for the body to finish arriving.
pub fn decode_openai_sse(
    service_id: &str,
    byte_stream: impl Stream<Item = Result<Bytes, reqwest::Error>> + Send + 'static,
    cancel: CancellationToken,
) -> TranslationStream {
    let service_id = service_id.to_string();
    Box::pin(async_stream::stream! {
        let mut buffer = String::new();
        let mut stream = Box::pin(byte_stream);

        'outer: loop {
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
                let Some(data) = line.strip_prefix("data: ") else { continue };
                if data == "[DONE]" {
                    break 'outer;
                }

                if let Ok(chunk) = serde_json::from_str::<OpenAIStreamChunk>(data) {
                    if let Some(choice) = chunk.choices.into_iter().next() {
                        if let Some(content) = choice.delta.content {
                            if !content.is_empty() {
                                yield Ok(content);
                            }
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
    async fn concatenates_delta_content_in_order() {
        let stream = byte_stream(vec![
            r#"data: {"choices":[{"delta":{"content":"Hello"}}]}"#,
            r#"data: {"choices":[{"delta":{"content":" World"}}]}"#,
            "data: [DONE]",
        ]);
        let decoded = decode_openai_sse("openai", stream, CancellationToken::new());
        let chunks: Vec<String> = decoded.collect::<Vec<_>>().await.into_iter().map(|r| r.unwrap()).collect();
        assert_eq!(chunks.join(""), "Hello World");
    }

    #[tokio::test]
    async fn ignores_lines_without_data_prefix() {
        let stream = byte_stream(vec![
            ": comment",
            r#"data: {"choices":[{"delta":{"content":"Hi"}}]}"#,
            "data: [DONE]",
        ]);
        let decoded = decode_openai_sse("openai", stream, CancellationToken::new());
        let chunks: Vec<String> = decoded.collect::<Vec<_>>().await.into_iter().map(|r| r.unwrap()).collect();
        assert_eq!(chunks.join(""), "Hi");
    }

    #[tokio::test]
    async fn stops_at_done_marker() {
        let stream = byte_stream(vec![
            "data: [DONE]",
            r#"data: {"choices":[{"delta":{"content":"unreachable"}}]}"#,
        ]);
        let decoded = decode_openai_sse("openai", stream, CancellationToken::new());
        let chunks: Vec<String> = decoded.collect::<Vec<_>>().await.into_iter().map(|r| r.unwrap()).collect();
        assert!(chunks.is_empty());
    }

    #[tokio::test]
    async fn an_already_cancelled_token_stops_the_decoder_before_any_chunk() {
        let stream = byte_stream(vec![r#"data: {"choices":[{"delta":{"content":"Hello"}}]}"#]);
        let cancel = CancellationToken::new();
        cancel.cancel();
        let decoded = decode_openai_sse("openai", stream, cancel);
        let chunks: Vec<_> = decoded.collect().await;
        assert!(chunks.is_empty());
    }
}
