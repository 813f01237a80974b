use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use translate_provider::{Translator, TranslatorCapability};
use translate_provider_utils::map_transport_error;
use translate_transport::{send, Transport};
use translate_types::{
    resolve_detected_language, Accent, Definition, ErrorKind, Language, Phonetic, TranslationError,
    TranslationRequest, TranslationResult, WordResult,
};

const ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";

fn strip_bold_tags(text: &str) -> String {
    text.replace("<b>", "").replace("</b>", "")
}

fn sentences_text(root: &[Value]) -> String {
    root.first()
        .and_then(Value::as_array)
        .map(|sentences| {
            sentences
                .iter()
                .filter_map(|s| s.get(0).and_then(Value::as_str))
                .collect::<String>()
        })
        .unwrap_or_default()
}

fn source_romanization(root: &[Value]) -> Option<Phonetic> {
    let sentences = root.first()?.as_array()?;
    let last = sentences.last()?.as_array()?;
    let text = last.get(3)?.as_str()?.to_string();
    Some(Phonetic {
        text,
        accent: Some(Accent::Src),
        audio_url: None,
    })
}

fn dictionary(root: &[Value]) -> Vec<Definition> {
    let Some(entries) = root.get(1).and_then(Value::as_array) else {
        return Vec::new();
    };
    entries
        .iter()
        .filter_map(|entry| {
            let entry = entry.as_array()?;
            let part_of_speech = entry.first().and_then(Value::as_str).map(str::to_string);
            let meanings = entry
                .get(1)
                .and_then(Value::as_array)
                .map(|m| m.iter().filter_map(Value::as_str).map(str::to_string).collect())
                .unwrap_or_default();
            Some(Definition {
                part_of_speech,
                meanings,
            })
        })
        .collect()
}

fn examples(root: &[Value]) -> Vec<String> {
    let Some(groups) = root.get(13).and_then(Value::as_array) else {
        return Vec::new();
    };
    groups
        .first()
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.get(0).and_then(Value::as_str))
                .map(strip_bold_tags)
                .collect()
        })
        .unwrap_or_default()
}

fn detected_language(root: &[Value]) -> Language {
    let simple = root.get(2).and_then(Value::as_str).unwrap_or("");
    let rich = root
        .get(8)
        .and_then(Value::as_array)
        .and_then(|outer| outer.first())
        .and_then(Value::as_array)
        .and_then(|inner| inner.first())
        .and_then(Value::as_str)
        .unwrap_or("");
    resolve_detected_language(&[simple, rich])
}

/// Google's richer, unauthenticated dictionary endpoint: same base URL as
/// [`crate::google_free::GoogleFreeTranslator`] with `dj` omitted and a
/// wider `dt` set, decoded as a positional array rather than an object.
pub struct GoogleDictTranslator {
    transport: Transport,
    capability: TranslatorCapability,
}

impl GoogleDictTranslator {
    pub fn new(transport: Transport) -> Self {
        let capability = TranslatorCapability::new("google-dict", "Google Dictionary")
            .requires_api_key(false)
            .configured(true)
            .streaming(false)
            .with_languages(Language::ALL.iter().copied());
        GoogleDictTranslator { transport, capability }
    }
}

impl Default for GoogleDictTranslator {
    fn default() -> Self {
        GoogleDictTranslator::new(Transport::default())
    }
}

#[async_trait]
impl Translator for GoogleDictTranslator {
    fn capability(&self) -> &TranslatorCapability {
        &self.capability
    }

    async fn translate_internal(
        &self,
        request: &TranslationRequest,
        cancel: CancellationToken,
    ) -> Result<TranslationResult, TranslationError> {
        let from_code = request.from_language().provider_code("google-dict");
        let to_code = request.to_language().provider_code("google-dict");

        let builder = self.transport.request(Method::GET, ENDPOINT).query(&[
            ("client", "gtx"),
            ("sl", from_code.as_str()),
            ("tl", to_code.as_str()),
            ("dt", "t"),
            ("dt", "bd"),
            ("dt", "ex"),
            ("dt", "ld"),
            ("dt", "md"),
            ("dt", "rw"),
            ("dt", "rm"),
            ("dt", "ss"),
            ("q", request.text()),
        ]);

        let response = send("google-dict", builder, &cancel).await?;
        let status = response.status();
        if !status.is_success() {
            let kind = if status.as_u16() == 429 {
                ErrorKind::RateLimited
            } else {
                ErrorKind::ServiceUnavailable
            };
            let text = response.text().await.unwrap_or_default();
            return Err(TranslationError::new(kind, "google-dict", text));
        }

        let root: Vec<Value> = response
            .json()
            .await
            .map_err(|e| map_transport_error("google-dict", e))?;

        let translated_text = sentences_text(&root);
        if translated_text.is_empty() {
            return Err(TranslationError::invalid_response(
                "google-dict",
                "response carried no translated sentences",
            ));
        }

        let mut phonetics = Vec::new();
        phonetics.extend(source_romanization(&root));
        let definitions = dictionary(&root);
        let examples = examples(&root);
        let word_result = WordResult {
            phonetics,
            definitions,
            examples,
        };

        Ok(TranslationResult {
            translated_text,
            original_text: request.text().to_string(),
            detected_language: detected_language(&root),
            target_language: request.to_language(),
            service_name: "Google Dictionary".to_string(),
            timing_ms: 0,
            from_cache: false,
            alternatives: None,
            word_result: if word_result.is_empty() { None } else { Some(word_result) },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_bold_markup() {
        assert_eq!(strip_bold_tags("a <b>bold</b> word"), "a bold word");
    }

    #[test]
    fn extracts_sentence_text() {
        let root: Vec<Value> = serde_json::from_str(r#"[[["hola","hello",null,null,1]]]"#).unwrap();
        assert_eq!(sentences_text(&root), "hola");
    }

    #[test]
    fn falls_back_to_simple_detected_language_without_rich_entry() {
        let root: Vec<Value> = serde_json::from_str(r#"[[],null,"en"]"#).unwrap();
        assert_eq!(detected_language(&root), Language::English);
    }
}
