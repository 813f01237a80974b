use std::time::Duration;
use thiserror::Error;

/// The ten-kind failure taxonomy every provider ultimately reports through.
///
/// This is total: every failure a provider can produce, from a malformed
/// response to a network timeout, is reshaped into one of these variants
/// before it reaches the caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    #[error("network error")]
    NetworkError,
    #[error("request timed out")]
    Timeout,
    #[error("rate limited")]
    RateLimited,
    #[error("invalid api key")]
    InvalidApiKey,
    #[error("invalid model")]
    InvalidModel,
    #[error("unsupported language pair")]
    UnsupportedLanguage,
    #[error("text too long")]
    TextTooLong,
    #[error("invalid response")]
    InvalidResponse,
    #[error("service unavailable")]
    ServiceUnavailable,
    #[error("unknown error")]
    Unknown,
}

/// A tagged translation failure.
///
/// Carries the `service_id` of the provider that failed, a short
/// human-readable message (callers own localization), the
/// underlying cause when there is one, and — for [`ErrorKind::RateLimited`]
/// — a `retry_after` hint parsed from the provider's `Retry-After` header
/// when it sent one.
#[derive(Debug, Error)]
#[error("{service_id}: {message}")]
pub struct TranslationError {
    pub kind: ErrorKind,
    pub service_id: String,
    pub message: String,
    pub retry_after: Option<Duration>,
    #[source]
    pub cause: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl TranslationError {
    pub fn new(kind: ErrorKind, service_id: impl Into<String>, message: impl Into<String>) -> Self {
        TranslationError {
            kind,
            service_id: service_id.into(),
            message: message.into(),
            retry_after: None,
            cause: None,
        }
    }

    pub fn with_cause(
        mut self,
        cause: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    pub fn with_retry_after(mut self, retry_after: Duration) -> Self {
        self.retry_after = Some(retry_after);
        self
    }

    pub fn network(service_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NetworkError, service_id, message)
    }

    pub fn timeout(service_id: impl Into<String>) -> Self {
        Self::new(ErrorKind::Timeout, service_id, "request timed out")
    }

    pub fn rate_limited(service_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RateLimited, service_id, message)
    }

    pub fn invalid_api_key(service_id: impl Into<String>) -> Self {
        Self::new(
            ErrorKind::InvalidApiKey,
            service_id,
            "missing or invalid API key",
        )
    }

    pub fn invalid_model(service_id: impl Into<String>, model_id: impl Into<String>) -> Self {
        let model_id = model_id.into();
        Self::new(
            ErrorKind::InvalidModel,
            service_id,
            format!("unsupported model: {}", model_id),
        )
    }

    pub fn unsupported_language(service_id: impl Into<String>) -> Self {
        Self::new(
            ErrorKind::UnsupportedLanguage,
            service_id,
            "language pair is not supported by this provider",
        )
    }

    pub fn text_too_long(service_id: impl Into<String>, limit: usize) -> Self {
        Self::new(
            ErrorKind::TextTooLong,
            service_id,
            format!("text exceeds the {} character limit", limit),
        )
    }

    pub fn invalid_response(service_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidResponse, service_id, message)
    }

    pub fn service_unavailable(service_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ServiceUnavailable, service_id, message)
    }

    pub fn unknown(service_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unknown, service_id, message)
    }

    pub fn empty_text(service_id: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unknown, service_id, "text must not be empty")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_service_and_message() {
        let err = TranslationError::invalid_api_key("bing");
        assert_eq!(err.to_string(), "bing: missing or invalid API key");
    }

    #[test]
    fn retry_after_is_attached_not_inferred() {
        let err = TranslationError::rate_limited("openai", "too many requests")
            .with_retry_after(Duration::from_secs(5));
        assert_eq!(err.retry_after, Some(Duration::from_secs(5)));
        assert_eq!(err.kind, ErrorKind::RateLimited);
    }
}
