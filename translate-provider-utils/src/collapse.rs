use futures::StreamExt;
use translate_provider::TranslationStream;
use translate_types::TranslationError;

/// Consumes an entire [`TranslationStream`], concatenating its chunks.
///
/// This is how a streaming-only provider implements `translate_internal`:
/// "consume the stream, concatenate, then post-process". The
/// concatenation happens in wire order with no buffering beyond what's
/// needed to join strings; the final value is handed to
/// [`trim_and_unquote`], never the intermediate chunks.
pub async fn collapse_stream(mut stream: TranslationStream) -> Result<String, TranslationError> {
    let mut text = String::new();
    while let Some(chunk) = stream.next().await {
        text.push_str(&chunk?);
    }
    Ok(trim_and_unquote(&text))
}

/// Trims surrounding whitespace and, if the result begins and ends with a
/// matching quote character (straight or curly), strips that one pair.
///
/// LLM-backed providers often wrap their answer in quotes despite being
/// told not to; this must only ever run on the fully-assembled text, never
/// on an individual chunk.
pub fn trim_and_unquote(text: &str) -> String {
    let trimmed = text.trim();
    let pairs: [(char, char); 3] = [('"', '"'), ('\u{201C}', '\u{201D}'), ('\'', '\'')];
    for (open, close) in pairs {
        if trimmed.len() >= open.len_utf8() + close.len_utf8() {
            let mut chars = trimmed.chars();
            let first = chars.next();
            let last = trimmed.chars().next_back();
            if first == Some(open) && last == Some(close) {
                let inner_start = open.len_utf8();
                let inner_end = trimmed.len() - close.len_utf8();
                if inner_start <= inner_end {
                    return trimmed[inner_start..inner_end].trim().to_string();
                }
            }
        }
    }
    trimmed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;
    use std::pin::Pin;

    fn stream_of(chunks: Vec<&'static str>) -> TranslationStream {
        Pin::from(Box::new(stream::iter(
            chunks.into_iter().map(|c| Ok(c.to_string())),
        )))
    }

    #[tokio::test]
    async fn concatenates_in_order() {
        let s = stream_of(vec!["Hello", " World"]);
        let text = collapse_stream(s).await.unwrap();
        assert_eq!(text, "Hello World");
    }

    #[test]
    fn strips_matching_straight_quotes() {
        assert_eq!(trim_and_unquote("  \"Bonjour\"  "), "Bonjour");
    }

    #[test]
    fn strips_matching_curly_quotes() {
        assert_eq!(trim_and_unquote("\u{201C}Hola\u{201D}"), "Hola");
    }

    #[test]
    fn leaves_mismatched_quotes_alone() {
        assert_eq!(trim_and_unquote("\"Hello"), "\"Hello");
    }

    #[test]
    fn leaves_unquoted_text_alone() {
        assert_eq!(trim_and_unquote("  Hello World  "), "Hello World");
    }
}
