use crate::digest::{hmac_sha256_base64, sha256_base64};

/// NiuTrans's header-signing scheme: a canonical `host/date/request-line/
/// digest` block, HMAC-SHA256'd with the API key and base64-encoded.
///
/// Returns `(date, digest, authorization)` so the caller can set all three
/// headers; `date` must be sent verbatim (RFC 1123) since it is part of
/// what was signed.
pub fn sign(host: &str, path: &str, body: &[u8], api_key: &str, date: &str) -> NiuTransSignature {
    let digest = format!("SHA-256={}", sha256_base64(body));
    let canonical = format!(
        "host:{host}\ndate:{date}\nPOST {path} HTTP/1.1\ndigest: {digest}",
        host = host,
        date = date,
        path = path,
        digest = digest,
    );
    let signature = hmac_sha256_base64(api_key.as_bytes(), canonical.as_bytes());
    let authorization = format!(
        "algorithm=\"hmac-sha256\", headers=\"host date request-line digest\", signature=\"{}\"",
        signature
    );
    NiuTransSignature {
        date: date.to_string(),
        digest,
        authorization,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NiuTransSignature {
    pub date: String,
    pub digest: String,
    pub authorization: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_is_a_pure_function_of_its_inputs() {
        let a = sign(
            "ntrans.xfyun.cn",
            "/v1/trans",
            b"{\"text\":\"hi\"}",
            "secret",
            "Tue, 01 Jan 2030 00:00:00 GMT",
        );
        let b = sign(
            "ntrans.xfyun.cn",
            "/v1/trans",
            b"{\"text\":\"hi\"}",
            "secret",
            "Tue, 01 Jan 2030 00:00:00 GMT",
        );
        assert_eq!(a, b);
    }

    #[test]
    fn differing_bodies_yield_differing_digests() {
        let a = sign("h", "/p", b"one", "secret", "date");
        let b = sign("h", "/p", b"two", "secret", "date");
        assert_ne!(a.digest, b.digest);
        assert_ne!(a.authorization, b.authorization);
    }
}
