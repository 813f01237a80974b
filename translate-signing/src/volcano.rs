use crate::digest::{hmac_sha256, hmac_sha256_hex, sha256_hex};

const REGION: &str = "cn-north-1";
const SERVICE: &str = "translate";

/// Volcano's SigV4-style authorization header.
///
/// `x_date` must be `YYYYMMDDTHHMMSSZ` and `query` the request's literal
/// query string (without the leading `?`); both are folded into the
/// signature, so the caller must send exactly what was signed here.
pub fn sign(
    access_key_id: &str,
    secret_access_key: &str,
    query: &str,
    body: &[u8],
    x_date: &str,
) -> String {
    let short_date = &x_date[..8];
    let host = "translate.volcengineapi.com";

    let canonical_headers = format!("content-type:application/json\nhost:{host}\nx-date:{x_date}\n");
    let signed_headers = "content-type;host;x-date";
    let body_hash = sha256_hex(body);

    let canonical_request = format!(
        "POST\n/\n{query}\n{canonical_headers}\n{signed_headers}\n{body_hash}",
        query = query,
        canonical_headers = canonical_headers,
        signed_headers = signed_headers,
        body_hash = body_hash,
    );

    let credential_scope = format!("{short_date}/{REGION}/{SERVICE}/request");
    let string_to_sign = format!(
        "HMAC-SHA256\n{x_date}\n{scope}\n{hash}",
        x_date = x_date,
        scope = credential_scope,
        hash = sha256_hex(canonical_request.as_bytes()),
    );

    let k_date = hmac_sha256(secret_access_key.as_bytes(), short_date.as_bytes());
    let k_region = hmac_sha256(&k_date, REGION.as_bytes());
    let k_service = hmac_sha256(&k_region, SERVICE.as_bytes());
    let k_signing = hmac_sha256(&k_service, b"request");
    let signature = hmac_sha256_hex(&k_signing, string_to_sign.as_bytes());

    format!(
        "HMAC-SHA256 Credential={akid}/{scope}, SignedHeaders={signed_headers}, Signature={signature}",
        akid = access_key_id,
        scope = credential_scope,
        signed_headers = signed_headers,
        signature = signature,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_is_a_pure_function_of_its_inputs() {
        let a = sign("akid", "secret", "Action=TranslateText&Version=2020-06-01", b"{}", "20300101T000000Z");
        let b = sign("akid", "secret", "Action=TranslateText&Version=2020-06-01", b"{}", "20300101T000000Z");
        assert_eq!(a, b);
    }

    #[test]
    fn differing_bodies_yield_differing_signatures() {
        let a = sign("akid", "secret", "q", b"one", "20300101T000000Z");
        let b = sign("akid", "secret", "q", b"two", "20300101T000000Z");
        assert_ne!(a, b);
    }

    #[test]
    fn header_contains_credential_scope() {
        let header = sign("akid", "secret", "q", b"{}", "20300615T120000Z");
        assert!(header.contains("akid/20300615/cn-north-1/translate/request"));
    }
}
