use crate::digest::md5_hex;

/// The fixed `key` constant baked into Youdao's web-dict JS client. Not a
/// secret, it's a static salt the signature formula expects.
const WEB_DICT_KEY: &str = "asdjnjfenknafdfsdfsd";

/// Youdao web-dict's `sign = md5("web" + text + time + key + salt)`
/// signature, plus the `time`/`salt` values the caller must also send as
/// form fields.
pub fn sign_web_dict(text: &str) -> WebDictSignature {
    let salt = md5_hex(format!("{text}webdict").as_bytes());
    let time = (format!("{text}webdict").chars().count() % 10).to_string();
    let sign = md5_hex(format!("web{text}{time}{WEB_DICT_KEY}{salt}").as_bytes());
    WebDictSignature { time, salt, sign }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebDictSignature {
    pub time: String,
    pub salt: String,
    pub sign: String,
}

/// Foreign languages the web-dict endpoint has phonetics/definitions data
/// for; anything else should fall back to web-translate.
pub const WEB_DICT_LANGUAGES: [&str; 4] = ["en", "ja", "fr", "ko"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_is_deterministic() {
        let a = sign_web_dict("hello");
        let b = sign_web_dict("hello");
        assert_eq!(a, b);
    }

    #[test]
    fn differing_text_yields_differing_signature() {
        let a = sign_web_dict("hello");
        let b = sign_web_dict("world");
        assert_ne!(a.sign, b.sign);
        assert_ne!(a.salt, b.salt);
    }
}
