use std::time::Duration;
use translate_types::{ErrorKind, TranslationError};

/// Maps a [`reqwest::Error`] to the right [`ErrorKind`], so no individual
/// provider adapter has to re-derive "was this a timeout, or a connect
/// failure, or something else" from `reqwest`'s error shape.
pub fn map_transport_error(service_id: &str, err: reqwest::Error) -> TranslationError {
    let kind = if err.is_timeout() {
        ErrorKind::Timeout
    } else if err.is_connect() || err.is_request() {
        ErrorKind::NetworkError
    } else if let Some(status) = err.status() {
        status_to_kind(status)
    } else {
        ErrorKind::Unknown
    };
    TranslationError::new(kind, service_id, err.to_string()).with_cause(err)
}

/// Maps an HTTP status code to an [`ErrorKind`] for providers that inspect
/// the response status directly rather than relying on `reqwest`'s own
/// error classification (e.g. after reading an error body for `message`).
pub fn status_to_kind(status: reqwest::StatusCode) -> ErrorKind {
    match status.as_u16() {
        401 | 403 => ErrorKind::InvalidApiKey,
        404 => ErrorKind::InvalidModel,
        408 => ErrorKind::Timeout,
        429 => ErrorKind::RateLimited,
        500..=599 => ErrorKind::ServiceUnavailable,
        _ => ErrorKind::InvalidResponse,
    }
}

/// Parses a `Retry-After` header value per RFC 9110 §10.2.3: either a
/// non-negative integer number of seconds, or an HTTP-date. Only the
/// delay-seconds form is used by the providers in this gateway, but the
/// date form is still recognized so a malformed upstream doesn't silently
/// lose the hint.
pub fn parse_retry_after(value: &str) -> Option<Duration> {
    let value = value.trim();
    if let Ok(secs) = value.parse::<u64>() {
        return Some(Duration::from_secs(secs));
    }
    let date = chrono::DateTime::parse_from_rfc2822(value).ok()?;
    let now = chrono::Utc::now();
    (date.to_utc() - now).to_std().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_client_error_statuses() {
        assert_eq!(
            status_to_kind(reqwest::StatusCode::UNAUTHORIZED),
            ErrorKind::InvalidApiKey
        );
        assert_eq!(
            status_to_kind(reqwest::StatusCode::TOO_MANY_REQUESTS),
            ErrorKind::RateLimited
        );
    }

    #[test]
    fn maps_server_error_statuses() {
        assert_eq!(
            status_to_kind(reqwest::StatusCode::BAD_GATEWAY),
            ErrorKind::ServiceUnavailable
        );
    }

    #[test]
    fn falls_back_to_invalid_response() {
        assert_eq!(
            status_to_kind(reqwest::StatusCode::IM_A_TEAPOT),
            ErrorKind::InvalidResponse
        );
    }

    #[test]
    fn parses_delay_seconds() {
        assert_eq!(parse_retry_after("120"), Some(Duration::from_secs(120)));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_retry_after("not-a-date"), None);
    }
}
