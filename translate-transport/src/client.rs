use reqwest::{Client, Method, RequestBuilder};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use translate_provider_utils::map_transport_error;
use translate_types::TranslationError;

/// The single pooled [`reqwest::Client`] every provider adapter shares.
///
/// Cloning a [`Transport`] clones the underlying `Arc` inside `reqwest`'s
/// client, so every provider can own one cheaply without losing connection
/// pooling.
#[derive(Debug, Clone)]
pub struct Transport {
    client: Client,
}

impl Default for Transport {
    fn default() -> Self {
        Transport::new(Duration::from_secs(30))
    }
}

impl Transport {
    pub fn new(timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("reqwest client configuration is valid");
        Transport { client }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.client.request(method, url)
    }

    pub fn get(&self, url: &str) -> RequestBuilder {
        self.client.get(url)
    }

    pub fn post(&self, url: &str) -> RequestBuilder {
        self.client.post(url)
    }
}

/// Runs a request to completion, racing it against `cancel`.
///
/// A timeout is a transport-level failure: `reqwest`'s own configured
/// deadline expires, `request.send()` resolves with an error, and that
/// maps to `TranslationError` with `ErrorKind::Timeout` same as any other
/// transport error. A caller-initiated cancellation is different: it is
/// not a failure of the request, so it does not produce a `TranslationError`
/// at all. `cancel.run_until_cancelled` drops the in-flight request (so the
/// connection is released) and hands back `None`; this function then never
/// resolves, leaving the caller's own task to be dropped or aborted, the
/// same "neutral cancellation" every other `.await` point in this crate
/// exhibits.
pub async fn send(
    service_id: &str,
    request: RequestBuilder,
    cancel: &CancellationToken,
) -> Result<reqwest::Response, TranslationError> {
    match cancel.run_until_cancelled(request.send()).await {
        None => {
            log::warn!("{service_id}: request cancelled before completion");
            std::future::pending().await
        }
        Some(result) => result.map_err(|e| {
            let err = map_transport_error(service_id, e);
            log::warn!("{service_id}: request failed: {err}");
            err
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn send_returns_the_response_on_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ping"))
            .respond_with(ResponseTemplate::new(200).set_body_string("pong"))
            .mount(&server)
            .await;

        let transport = Transport::default();
        let builder = transport.get(&format!("{}/ping", server.uri()));
        let response = send("test", builder, &CancellationToken::new()).await.unwrap();
        assert_eq!(response.text().await.unwrap(), "pong");
    }

    #[tokio::test]
    async fn a_caller_initiated_cancellation_never_resolves_as_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ping"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
            .mount(&server)
            .await;

        let transport = Transport::default();
        let builder = transport.get(&format!("{}/ping", server.uri()));
        let cancel = CancellationToken::new();
        cancel.cancel();

        // A cancelled call never produces a `TranslationError`; it simply
        // never resolves. Bound the wait so the test itself doesn't hang.
        let outcome = tokio::time::timeout(Duration::from_millis(200), send("test", builder, &cancel)).await;
        assert!(outcome.is_err(), "cancelled send should not resolve at all");
    }
}
