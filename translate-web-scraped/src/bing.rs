use async_trait::async_trait;
use reqwest::Method;
use serde::Deserialize;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use translate_provider::{Translator, TranslatorCapability};
use translate_provider_utils::map_transport_error;
use translate_signing::scrape_bing_credentials;
use translate_transport::{send, Transport};
use translate_types::{Language, TranslationError, TranslationRequest, TranslationResult};

#[derive(Debug, Clone, Default)]
pub struct BingSettings {
    pub use_china_host: bool,
}

#[derive(Debug, Clone)]
struct CachedCredentials {
    ig: String,
    iid: String,
    token: String,
    timestamp: String,
    resolved_host: String,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct BingDetectedLanguage {
    #[serde(default)]
    language: Option<String>,
}

#[derive(Deserialize, Default)]
struct BingTranslation {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct BingTranslateItem {
    #[serde(default)]
    detected_language: Option<BingDetectedLanguage>,
    #[serde(default)]
    translations: Vec<BingTranslation>,
}

enum AttemptOutcome {
    Success(TranslationResult),
    RateLimited,
    Captcha,
}

/// Bing's unauthenticated `ttranslatev3` endpoint, credential-scraped from
/// the translator page HTML.
///
/// `cache` doubles as the single-flight guard: holding its lock across the
/// credential fetch means concurrent callers block on the in-flight
/// request instead of each issuing their own.
pub struct BingTranslator {
    settings: BingSettings,
    transport: Transport,
    capability: TranslatorCapability,
    cache: Mutex<Option<CachedCredentials>>,
    counter: AtomicU64,
}

impl BingTranslator {
    pub fn new(settings: BingSettings, transport: Transport) -> Self {
        let capability = TranslatorCapability::new("bing", "Bing Translator")
            .requires_api_key(false)
            .configured(true)
            .streaming(false)
            .with_languages(Language::ALL.iter().copied());
        BingTranslator {
            settings,
            transport,
            capability,
            cache: Mutex::new(None),
            counter: AtomicU64::new(0),
        }
    }

    fn host(&self) -> &'static str {
        if self.settings.use_china_host {
            "cn.bing.com"
        } else {
            "www.bing.com"
        }
    }

    async fn fetch_credentials(
        &self,
        cancel: &CancellationToken,
    ) -> Result<CachedCredentials, TranslationError> {
        let builder = self
            .transport
            .request(Method::GET, &format!("https://{}/translator", self.host()));
        let response = send("bing", builder, cancel).await?;
        let resolved_host = response
            .url()
            .host_str()
            .unwrap_or_else(|| self.host())
            .to_string();
        let html = response.text().await.map_err(|e| map_transport_error("bing", e))?;
        let creds = scrape_bing_credentials(&html).ok_or_else(|| {
            TranslationError::service_unavailable("bing", "Failed to extract Bing translator credentials")
        })?;
        Ok(CachedCredentials {
            ig: creds.ig,
            iid: creds.iid,
            token: creds.token,
            timestamp: creds.timestamp,
            resolved_host,
        })
    }

    async fn ensure_credentials(
        &self,
        cancel: &CancellationToken,
    ) -> Result<CachedCredentials, TranslationError> {
        let mut guard = self.cache.lock().await;
        if let Some(creds) = guard.as_ref() {
            return Ok(creds.clone());
        }
        let fresh = self.fetch_credentials(cancel).await?;
        *guard = Some(fresh.clone());
        Ok(fresh)
    }

    async fn refresh_credentials(
        &self,
        cancel: &CancellationToken,
    ) -> Result<CachedCredentials, TranslationError> {
        let mut guard = self.cache.lock().await;
        *guard = None;
        drop(guard);
        self.ensure_credentials(cancel).await
    }

    async fn attempt(
        &self,
        creds: &CachedCredentials,
        request: &TranslationRequest,
        cancel: &CancellationToken,
    ) -> Result<AttemptOutcome, TranslationError> {
        let sfx = self.counter.fetch_add(1, Ordering::SeqCst);
        let from_code = if request.from_language() == Language::Auto {
            "auto-detect".to_string()
        } else {
            request.from_language().provider_code("bing")
        };
        let to_code = request.to_language().provider_code("bing");

        let url = format!(
            "https://{host}/ttranslatev3?IG={ig}&IID={iid}&edgepdftranslator=1&isVertical=1&ref=TThis&SFX={sfx}",
            host = creds.resolved_host,
            ig = creds.ig,
            iid = creds.iid,
            sfx = sfx,
        );
        let form = [
            ("text", request.text()),
            ("fromLang", from_code.as_str()),
            ("to", to_code.as_str()),
            ("token", creds.token.as_str()),
            ("key", creds.timestamp.as_str()),
        ];

        let builder = self
            .transport
            .request(Method::POST, &url)
            .header("Origin", format!("https://{}", creds.resolved_host))
            .header("Referer", format!("https://{}/translator", creds.resolved_host))
            .form(&form);

        let response = send("bing", builder, cancel).await?;
        if response.status().as_u16() == 429 {
            return Ok(AttemptOutcome::RateLimited);
        }
        if !response.status().is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(TranslationError::service_unavailable("bing", text));
        }

        let body = response.text().await.map_err(|e| map_transport_error("bing", e))?;
        let Ok(items) = serde_json::from_str::<Vec<BingTranslateItem>>(&body) else {
            return Ok(AttemptOutcome::Captcha);
        };
        let Some(item) = items.into_iter().next() else {
            return Ok(AttemptOutcome::Captcha);
        };
        let Some(translated_text) = item.translations.into_iter().next().and_then(|t| t.text) else {
            return Ok(AttemptOutcome::Captcha);
        };
        if translated_text.is_empty() {
            return Ok(AttemptOutcome::Captcha);
        }

        let detected_language = item
            .detected_language
            .and_then(|d| d.language)
            .as_deref()
            .map(Language::from_provider_code)
            .unwrap_or(Language::Auto);

        Ok(AttemptOutcome::Success(TranslationResult {
            translated_text,
            original_text: request.text().to_string(),
            detected_language,
            target_language: request.to_language(),
            service_name: "Bing Translator".to_string(),
            timing_ms: 0,
            from_cache: false,
            alternatives: None,
            word_result: None,
        }))
    }
}

#[async_trait]
impl Translator for BingTranslator {
    fn capability(&self) -> &TranslatorCapability {
        &self.capability
    }

    async fn translate_internal(
        &self,
        request: &TranslationRequest,
        cancel: CancellationToken,
    ) -> Result<TranslationResult, TranslationError> {
        let creds = self.ensure_credentials(&cancel).await?;
        match self.attempt(&creds, request, &cancel).await? {
            AttemptOutcome::Success(result) => Ok(result),
            AttemptOutcome::RateLimited | AttemptOutcome::Captcha => {
                log::warn!("bing: first attempt was rejected, refreshing credentials and retrying once");
                let creds = self.refresh_credentials(&cancel).await?;
                match self.attempt(&creds, request, &cancel).await? {
                    AttemptOutcome::Success(result) => Ok(result),
                    AttemptOutcome::RateLimited => {
                        Err(TranslationError::rate_limited("bing", "rate limited after re-credentialing"))
                    }
                    AttemptOutcome::Captcha => Err(TranslationError::invalid_response(
                        "bing",
                        "captcha challenge persisted after re-credentialing",
                    )),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn china_host_setting_selects_cn_bing() {
        let translator = BingTranslator::new(
            BingSettings { use_china_host: true },
            Transport::default(),
        );
        assert_eq!(translator.host(), "cn.bing.com");
    }

    #[test]
    fn counter_strictly_increases_across_calls() {
        let translator = BingTranslator::new(BingSettings::default(), Transport::default());
        let first = translator.counter.fetch_add(1, Ordering::SeqCst);
        let second = translator.counter.fetch_add(1, Ordering::SeqCst);
        assert!(second > first);
    }
}
