use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use hmac::{Hmac, Mac};
use md5::Md5;
use sha2::{Digest, Sha256};

type HmacSha256 = Hmac<Sha256>;

/// `SHA256(data)`, raw bytes.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// `hex(SHA256(data))`, the form Volcano's canonical request and body hash
/// both want.
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(sha256(data))
}

/// `base64(SHA256(data))`, the form NiuTrans's `digest` header wants.
pub fn sha256_base64(data: &[u8]) -> String {
    BASE64.encode(sha256(data))
}

/// `MD5(data)`, hex-encoded. Used only by Youdao's legacy web-dict
/// signature; nothing security-sensitive depends on MD5 here, it is simply
/// the algorithm the wire protocol mandates.
pub fn md5_hex(data: &[u8]) -> String {
    let mut hasher = Md5::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// `HMAC-SHA256(key, data)`, raw bytes.
pub fn hmac_sha256(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC accepts any key length");
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}

/// `hex(HMAC-SHA256(key, data))`, the form Volcano's final signature wants.
pub fn hmac_sha256_hex(key: &[u8], data: &[u8]) -> String {
    hex::encode(hmac_sha256(key, data))
}

/// `base64(HMAC-SHA256(key, data))`, the form NiuTrans's signature wants.
pub fn hmac_sha256_base64(key: &[u8], data: &[u8]) -> String {
    BASE64.encode(hmac_sha256(key, data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha256_hex_matches_known_vector() {
        assert_eq!(
            sha256_hex(b"hello"),
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
    }

    #[test]
    fn md5_hex_matches_known_vector() {
        assert_eq!(md5_hex(b""), "d41d8cd98f00b204e9800998ecf8427e");
    }

    #[test]
    fn hmac_is_deterministic_per_key() {
        let a = hmac_sha256_hex(b"key", b"data");
        let b = hmac_sha256_hex(b"key", b"data");
        let c = hmac_sha256_hex(b"other-key", b"data");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
