use bytes::Bytes;
use futures_util::{Stream, StreamExt};
use serde::Deserialize;
use tokio_util::sync::CancellationToken;
use translate_provider::TranslationStream;

#[derive(Deserialize)]
struct DoubaoDeltaEvent {
    delta: Option<String>,
}

/// Decodes Doubao's named-event SSE body: each event is an
/// `event: {name}\n` line followed by `data: {json}\n\n`; only
/// `response.output_text.delta` events carry translated text, in their
/// `delta` field. Every other named event (e.g. `response.created`) is
/// read and discarded so the line-buffer stays in sync.
///
/// `cancel` is checked between chunks, same as `translate-transport`'s
/// non-streaming `send`: a caller-initiated cancellation stops the decoder
/// mid-stream rather than waiting for the body to finish arriving.
pub fn decode_doubao_sse(
    service_id: &str,
    byte_stream: impl Stream<Item = Result<Bytes, reqwest::Error>> + Send + 'static,
    cancel: CancellationToken,
) -> TranslationStream {
    let service_id = service_id.to_string();
    Box::pin(async_stream::stream! {
        let mut buffer = String::new();
        let mut current_event: Option<String> = None;
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
                if let Some(name) = line.strip_prefix("event: ") {
                    current_event = Some(name.to_string());
                    continue;
                }
                let Some(data) = line.strip_prefix("data: ") else { continue };
                if data == "[DONE]" {
                    break 'outer;
                }

                if current_event.as_deref() == Some("response.output_text.delta") {
                    if let Ok(event) = serde_json::from_str::<DoubaoDeltaEvent>(data) {
                        if let Some(delta) = event.delta {
                            if !delta.is_empty() {
                                yield Ok(delta);
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
    async fn yields_only_delta_events() {
        let stream = byte_stream(vec![
            "event: response.created",
            r#"data: {"id":"resp_1"}"#,
            "",
            "event: response.output_text.delta",
            r#"data: {"delta":"Hello"}"#,
            "",
            "data: [DONE]",
        ]);
        let decoded = decode_doubao_sse("doubao", stream, CancellationToken::new());
        let chunks: Vec<String> = decoded.collect::<Vec<_>>().await.into_iter().map(|r| r.unwrap()).collect();
        assert_eq!(chunks, vec!["Hello".to_string()]);
    }

    #[tokio::test]
    async fn an_already_cancelled_token_stops_the_decoder_before_any_chunk() {
        let stream = byte_stream(vec![
            "event: response.output_text.delta",
            r#"data: {"delta":"Hello"}"#,
        ]);
        let cancel = CancellationToken::new();
        cancel.cancel();
        let decoded = decode_doubao_sse("doubao", stream, cancel);
        let chunks: Vec<_> = decoded.collect().await;
        assert!(chunks.is_empty());
    }
}
