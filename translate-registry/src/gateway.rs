use crate::registry::{Handle, ProviderRegistry};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use translate_provider::{TranslationStream, Translator, TranslatorCapability};
use translate_types::{ErrorKind, TranslationError, TranslationRequest, TranslationResult};

/// The caller-facing entry point: acquires a registry handle for the
/// duration of one call, looks up the requested provider, and delegates to
/// [`Translator::translate`] / [`Translator::translate_stream`] — the
/// facade gluing the registry to the trait.
pub struct TranslationGateway {
    registry: Arc<ProviderRegistry>,
}

impl TranslationGateway {
    pub fn new(registry: Arc<ProviderRegistry>) -> Self {
        TranslationGateway { registry }
    }

    pub async fn translate(
        &self,
        service_id: &str,
        request: &TranslationRequest,
        cancel: CancellationToken,
    ) -> Result<TranslationResult, TranslationError> {
        let handle = self.registry.acquire();
        let provider = self.resolve(&handle, service_id)?;
        provider.translate(request, cancel).await
    }

    pub async fn translate_stream(
        &self,
        service_id: &str,
        request: &TranslationRequest,
        cancel: CancellationToken,
    ) -> Result<TranslationStream, TranslationError> {
        let handle = self.registry.acquire();
        let provider = self.resolve(&handle, service_id)?;
        provider.translate_stream(request, cancel).await
    }

    /// Swaps in a (re)configured provider instance under the given id.
    pub async fn configure(&self, service_id: impl Into<String>, provider: Arc<dyn Translator>) {
        self.registry.configure(service_id, provider).await;
    }

    pub fn list_capabilities(&self) -> Vec<TranslatorCapability> {
        self.registry.list_capabilities()
    }

    /// Looks up `service_id` within an already-acquired handle, so the
    /// handle (and the snapshot it pins) stays alive across the caller's
    /// subsequent `.await` on the provider, not just across the lookup.
    fn resolve(&self, handle: &Handle, service_id: &str) -> Result<Arc<dyn Translator>, TranslationError> {
        handle.get(service_id).ok_or_else(|| {
            log::warn!("gateway: no provider registered under service id \"{service_id}\"");
            TranslationError::new(
                ErrorKind::Unknown,
                service_id,
                format!("no provider is registered under service id \"{service_id}\""),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use translate_types::Language;

    struct Stub(TranslatorCapability);

    #[async_trait]
    impl Translator for Stub {
        fn capability(&self) -> &TranslatorCapability {
            &self.0
        }

        async fn translate_internal(
            &self,
            request: &TranslationRequest,
            _cancel: CancellationToken,
        ) -> Result<TranslationResult, TranslationError> {
            Ok(TranslationResult {
                translated_text: request.text().to_uppercase(),
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

    fn stub(id: &str) -> Arc<dyn Translator> {
        Arc::new(Stub(
            TranslatorCapability::new(id, id).with_languages([Language::English, Language::French]),
        ))
    }

    #[tokio::test]
    async fn translates_through_a_resolved_provider() {
        let registry = Arc::new(ProviderRegistry::new([stub("echo")]));
        let gateway = TranslationGateway::new(registry);
        let request = TranslationRequest::new("hi", Language::French).with_from_language(Language::English);
        let result = gateway.translate("echo", &request, CancellationToken::new()).await.unwrap();
        assert_eq!(result.translated_text, "HI");
    }

    #[tokio::test]
    async fn unknown_service_id_fails_without_panicking() {
        let registry = Arc::new(ProviderRegistry::new([stub("echo")]));
        let gateway = TranslationGateway::new(registry);
        let request = TranslationRequest::new("hi", Language::French).with_from_language(Language::English);
        let err = gateway
            .translate("missing", &request, CancellationToken::new())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unknown);
    }

    #[tokio::test]
    async fn configure_swaps_in_a_new_instance() {
        let registry = Arc::new(ProviderRegistry::new([stub("echo")]));
        let gateway = TranslationGateway::new(registry);
        gateway.configure("echo", stub("echo")).await;
        let caps = gateway.list_capabilities();
        assert_eq!(caps.len(), 1);
    }
}
