use crate::capability::TranslatorCapability;
use crate::stream::TranslationStream;
use async_trait::async_trait;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use translate_types::{ErrorKind, TranslationError, TranslationRequest, TranslationResult};

/// The single contract every concrete provider implements.
///
/// Concrete providers only need to supply [`Translator::capability`] and
/// [`Translator::translate_internal`] (and, for the streaming-capable
/// families, [`Translator::translate_stream_internal`]); [`Translator::translate`]
/// and the default [`Translator::validate`] give every provider the same
/// validation, timing, and streaming-unsupported behavior without
/// duplicating it per provider.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Static description of this instance: id, display name, configured
    /// state, supported languages, streaming support.
    fn capability(&self) -> &TranslatorCapability;

    fn service_id(&self) -> &str {
        &self.capability().service_id
    }

    /// Provider-specific maximum input length, in characters. Defaults to
    /// unbounded; providers with a documented limit (Volcano: 5000) override
    /// this.
    fn max_text_len(&self) -> usize {
        usize::MAX
    }

    /// Shared request validation: empty text, unsupported language pair,
    /// missing credentials, text length. Concrete providers should not
    /// need to override this.
    fn validate(&self, request: &TranslationRequest) -> Result<(), TranslationError> {
        if request.is_empty() {
            return Err(TranslationError::empty_text(self.service_id()));
        }

        let cap = self.capability();
        if !cap.supports(request.from_language()) || !cap.supports(request.to_language()) {
            return Err(TranslationError::unsupported_language(self.service_id()));
        }
        if cap.requires_api_key && !cap.is_configured {
            return Err(TranslationError::invalid_api_key(self.service_id()));
        }
        let len = request.text().chars().count();
        if len > self.max_text_len() {
            return Err(TranslationError::text_too_long(
                self.service_id(),
                self.max_text_len(),
            ));
        }
        Ok(())
    }

    /// Provider-specific translation logic. Implementations are expected to
    /// have already mapped transport failures to the right [`ErrorKind`]
    /// (see `translate-provider-utils::map_transport_error`); `timing_ms` on
    /// the returned result is overwritten by [`Translator::translate`], so
    /// implementations may leave it at `0`.
    async fn translate_internal(
        &self,
        request: &TranslationRequest,
        cancel: CancellationToken,
    ) -> Result<TranslationResult, TranslationError>;

    /// Runs [`Translator::validate`], then [`Translator::translate_internal`]
    /// under a stopwatch, stamping the elapsed time onto the result.
    async fn translate(
        &self,
        request: &TranslationRequest,
        cancel: CancellationToken,
    ) -> Result<TranslationResult, TranslationError> {
        self.validate(request)?;
        let start = Instant::now();
        let mut result = self.translate_internal(request, cancel).await?;
        result.timing_ms = start.elapsed().as_millis() as u64;
        Ok(result)
    }

    /// Streaming-capable providers override this to yield decoded text
    /// chunks in wire order. The default implementation reports the
    /// provider as non-streaming.
    async fn translate_stream_internal(
        &self,
        _request: &TranslationRequest,
        _cancel: CancellationToken,
    ) -> Result<TranslationStream, TranslationError> {
        Err(TranslationError::new(
            ErrorKind::Unknown,
            self.service_id(),
            "this provider does not support streaming",
        ))
    }

    /// Runs [`Translator::validate`] then delegates to
    /// [`Translator::translate_stream_internal`].
    async fn translate_stream(
        &self,
        request: &TranslationRequest,
        cancel: CancellationToken,
    ) -> Result<TranslationStream, TranslationError> {
        self.validate(request)?;
        self.translate_stream_internal(request, cancel).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use translate_types::Language;

    struct Stub {
        cap: TranslatorCapability,
    }

    #[async_trait]
    impl Translator for Stub {
        fn capability(&self) -> &TranslatorCapability {
            &self.cap
        }

        async fn translate_internal(
            &self,
            request: &TranslationRequest,
            _cancel: CancellationToken,
        ) -> Result<TranslationResult, TranslationError> {
            Ok(TranslationResult {
                translated_text: format!("[{}]", request.text()),
                original_text: request.text().to_string(),
                detected_language: Language::English,
                target_language: request.to_language(),
                service_name: self.service_id().to_string(),
                timing_ms: 0,
                from_cache: false,
                alternatives: None,
                word_result: None,
            })
        }
    }

    fn stub() -> Stub {
        Stub {
            cap: TranslatorCapability::new("stub", "Stub")
                .with_languages([Language::English, Language::French]),
        }
    }

    #[tokio::test]
    async fn empty_text_fails_unknown() {
        let t = stub();
        let req = TranslationRequest::new("   ", Language::French);
        let err = t.translate(&req, CancellationToken::new()).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unknown);
    }

    #[tokio::test]
    async fn unsupported_pair_fails() {
        let t = stub();
        let req = TranslationRequest::new("hi", Language::Japanese);
        let err = t.translate(&req, CancellationToken::new()).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnsupportedLanguage);
    }

    #[tokio::test]
    async fn missing_api_key_fails() {
        let mut t = stub();
        t.cap = t.cap.requires_api_key(true).configured(false);
        let req = TranslationRequest::new("hi", Language::French);
        let err = t.translate(&req, CancellationToken::new()).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidApiKey);
    }

    #[tokio::test]
    async fn unsupported_language_is_reported_before_a_missing_api_key() {
        let mut t = stub();
        t.cap = t.cap.requires_api_key(true).configured(false);
        let req = TranslationRequest::new("hi", Language::Japanese);
        let err = t.translate(&req, CancellationToken::new()).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnsupportedLanguage);
    }

    #[tokio::test]
    async fn success_stamps_timing() {
        let t = stub();
        let req = TranslationRequest::new("hi", Language::French);
        let result = t.translate(&req, CancellationToken::new()).await.unwrap();
        assert_eq!(result.translated_text, "[hi]");
    }

    #[tokio::test]
    async fn non_streaming_provider_reports_unsupported() {
        let t = stub();
        let req = TranslationRequest::new("hi", Language::French);
        let err = t
            .translate_stream(&req, CancellationToken::new())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unknown);
    }
}
