use async_trait::async_trait;
use reqwest::Method;
use serde::Deserialize;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use translate_provider::{Translator, TranslatorCapability};
use translate_provider_utils::{looks_like_word_query, map_transport_error};
use translate_signing::{sign_web_dict, WEB_DICT_LANGUAGES};
use translate_transport::{send, Transport};
use translate_types::{
    Definition, ErrorKind, Language, Phonetic, TranslationError, TranslationRequest, TranslationResult,
    WordResult,
};

const DICT_ENDPOINT: &str = "https://dict.youdao.com/jsonapi_s?doctype=json&jsonversion=4";
const TRANSLATE_ENDPOINT: &str = "https://fanyi.youdao.com/translate_o";

/// Normalizes Youdao's `simple.word`/`ec.word` fields, which arrive either
/// as a bare object or as a single-element array wrapping one.
fn normalize_word_shape(value: &Value) -> Option<&Value> {
    match value {
        Value::Array(items) => items.first(),
        Value::Object(_) => Some(value),
        _ => None,
    }
}

#[derive(Deserialize, Default)]
struct YoudaoTr {
    #[serde(default)]
    pos: Option<String>,
    #[serde(default)]
    tran: Option<String>,
}

#[derive(Deserialize, Default)]
struct YoudaoEcWord {
    #[serde(default)]
    trs: Vec<YoudaoTr>,
}

fn audio_url(speech: Option<&str>) -> Option<String> {
    speech.map(|s| format!("https://dict.youdao.com/dictvoice?audio={}", s))
}

#[derive(Debug, Clone, Default)]
pub struct YoudaoWebSettings;

/// Youdao's two unauthenticated web endpoints, combined behind one
/// translator per: a dictionary lookup for single-word queries
/// in `en/ja/fr/ko`, falling back to (or used directly for) the general
/// sentence-translation endpoint.
pub struct YoudaoWebTranslator {
    transport: Transport,
    capability: TranslatorCapability,
}

impl YoudaoWebTranslator {
    pub fn new(_settings: YoudaoWebSettings, transport: Transport) -> Self {
        let capability = TranslatorCapability::new("youdao-web", "Youdao")
            .requires_api_key(false)
            .configured(true)
            .streaming(false)
            .with_languages(Language::ALL.iter().copied());
        YoudaoWebTranslator { transport, capability }
    }

    /// The web-dict endpoint only has entries for Chinese paired with one
    /// of `en/ja/fr/ko`; anything else (including Auto on the Chinese side)
    /// falls back to the sentence endpoint.
    fn foreign_language_code(&self, request: &TranslationRequest) -> Option<&'static str> {
        let from = request.from_language();
        let to = request.to_language();
        let is_chinese = |l: Language| matches!(l, Language::SimplifiedChinese | Language::TraditionalChinese);
        if !is_chinese(from) && !is_chinese(to) {
            return None;
        }
        let other = if is_chinese(from) { to } else { from };
        let other_code = other.iso_code();
        WEB_DICT_LANGUAGES.iter().find(|code| other_code.starts_with(*code)).copied()
    }

    fn dict_eligible(&self, request: &TranslationRequest) -> bool {
        looks_like_word_query(request.text()) && self.foreign_language_code(request).is_some()
    }

    async fn translate_via_dict(
        &self,
        request: &TranslationRequest,
        cancel: &CancellationToken,
    ) -> Result<TranslationResult, TranslationError> {
        let signature = sign_web_dict(request.text());
        let form = [
            ("q", request.text().to_string()),
            ("le", self.foreign_language_code(request).unwrap_or("en").to_string()),
            ("t", signature.time.clone()),
            ("sign", signature.sign.clone()),
            ("client", "mobile".to_string()),
        ];

        let builder = self.transport.request(Method::POST, DICT_ENDPOINT).form(&form);
        let response = send("youdao-web", builder, cancel).await?;
        if !response.status().is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(TranslationError::service_unavailable("youdao-web", text));
        }

        let root: Value = response
            .json()
            .await
            .map_err(|e| map_transport_error("youdao-web", e))?;

        let simple_word = root.get("simple").and_then(|s| s.get("word")).and_then(normalize_word_shape);
        let ec_word_value = root.get("ec").and_then(|s| s.get("word")).and_then(normalize_word_shape);
        let ec_word: YoudaoEcWord = ec_word_value
            .map(|v| serde_json::from_value(v.clone()).unwrap_or_default())
            .unwrap_or_default();

        let mut phonetics = Vec::new();
        if let Some(word) = simple_word {
            if let Some(usphone) = word.get("usphone").and_then(Value::as_str) {
                phonetics.push(Phonetic {
                    text: usphone.to_string(),
                    accent: Some(translate_types::Accent::Us),
                    audio_url: audio_url(word.get("usspeech").and_then(Value::as_str)),
                });
            }
            if let Some(ukphone) = word.get("ukphone").and_then(Value::as_str) {
                phonetics.push(Phonetic {
                    text: ukphone.to_string(),
                    accent: Some(translate_types::Accent::Uk),
                    audio_url: audio_url(word.get("ukspeech").and_then(Value::as_str)),
                });
            }
        }

        let definitions: Vec<Definition> = ec_word
            .trs
            .iter()
            .filter(|tr| tr.tran.is_some())
            .map(|tr| Definition {
                part_of_speech: tr.pos.clone(),
                meanings: vec![tr.tran.clone().unwrap_or_default()],
            })
            .collect();

        let translated_text = definitions
            .first()
            .and_then(|d| d.meanings.first())
            .cloned()
            .ok_or_else(|| TranslationError::invalid_response("youdao-web", "dictionary carried no translation"))?;

        let word_result = WordResult {
            phonetics,
            definitions,
            examples: Vec::new(),
        };

        Ok(TranslationResult {
            translated_text,
            original_text: request.text().to_string(),
            detected_language: request.from_language(),
            target_language: request.to_language(),
            service_name: "Youdao".to_string(),
            timing_ms: 0,
            from_cache: false,
            alternatives: None,
            word_result: if word_result.is_empty() { None } else { Some(word_result) },
        })
    }

    async fn translate_via_sentence(
        &self,
        request: &TranslationRequest,
        cancel: &CancellationToken,
    ) -> Result<TranslationResult, TranslationError> {
        let from_code = request.from_language().provider_code("youdao-web");
        let to_code = request.to_language().provider_code("youdao-web");
        let form = [
            ("i", request.text().to_string()),
            ("from", from_code),
            ("to", to_code),
            ("doctype", "json".to_string()),
            ("smartresult", "dict".to_string()),
        ];

        let builder = self.transport.request(Method::POST, TRANSLATE_ENDPOINT).form(&form);
        let response = send("youdao-web", builder, cancel).await?;
        if !response.status().is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(TranslationError::service_unavailable("youdao-web", text));
        }

        let root: Value = response
            .json()
            .await
            .map_err(|e| map_transport_error("youdao-web", e))?;

        if let Some(code) = root.get("errorCode").and_then(Value::as_i64) {
            if code != 0 {
                return Err(TranslationError::new(
                    ErrorKind::ServiceUnavailable,
                    "youdao-web",
                    format!("translate_o reported errorCode {}", code),
                ));
            }
        }

        let translated_text: String = root
            .get("translateResult")
            .and_then(Value::as_array)
            .map(|rows| {
                rows.iter()
                    .filter_map(Value::as_array)
                    .flat_map(|row| row.iter())
                    .filter_map(|cell| cell.get("tgt").and_then(Value::as_str))
                    .collect()
            })
            .unwrap_or_default();

        if translated_text.is_empty() {
            return Err(TranslationError::invalid_response(
                "youdao-web",
                "translate_o carried no translateResult",
            ));
        }

        Ok(TranslationResult {
            translated_text,
            original_text: request.text().to_string(),
            detected_language: request.from_language(),
            target_language: request.to_language(),
            service_name: "Youdao".to_string(),
            timing_ms: 0,
            from_cache: false,
            alternatives: None,
            word_result: None,
        })
    }
}

#[async_trait]
impl Translator for YoudaoWebTranslator {
    fn capability(&self) -> &TranslatorCapability {
        &self.capability
    }

    async fn translate_internal(
        &self,
        request: &TranslationRequest,
        cancel: CancellationToken,
    ) -> Result<TranslationResult, TranslationError> {
        if self.dict_eligible(request) {
            if let Ok(result) = self.translate_via_dict(request, &cancel).await {
                return Ok(result);
            }
        }
        self.translate_via_sentence(request, &cancel).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn translator() -> YoudaoWebTranslator {
        YoudaoWebTranslator::new(YoudaoWebSettings::default(), Transport::default())
    }

    #[test]
    fn normalizes_array_wrapped_word_shape() {
        let value: Value = serde_json::from_str(r#"[{"usphone":"abc"}]"#).unwrap();
        let normalized = normalize_word_shape(&value).expect("present");
        assert_eq!(normalized.get("usphone").and_then(Value::as_str), Some("abc"));
    }

    #[test]
    fn normalizes_bare_object_word_shape() {
        let value: Value = serde_json::from_str(r#"{"usphone":"abc"}"#).unwrap();
        let normalized = normalize_word_shape(&value).expect("present");
        assert_eq!(normalized.get("usphone").and_then(Value::as_str), Some("abc"));
    }

    #[test]
    fn single_english_word_is_dict_eligible() {
        let t = translator();
        let request = TranslationRequest::new("hello", Language::SimplifiedChinese)
            .with_from_language(Language::English);
        assert!(t.dict_eligible(&request));
    }

    #[test]
    fn a_full_sentence_is_not_dict_eligible() {
        let t = translator();
        let request = TranslationRequest::new(
            "This is a whole sentence, not a word.",
            Language::SimplifiedChinese,
        )
        .with_from_language(Language::English);
        assert!(!t.dict_eligible(&request));
    }

    #[test]
    fn russian_pair_is_not_dict_eligible() {
        let t = translator();
        let request = TranslationRequest::new("привет", Language::English)
            .with_from_language(Language::Russian);
        assert!(!t.dict_eligible(&request));
    }
}
