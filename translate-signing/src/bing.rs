use regex::Regex;
use std::sync::OnceLock;

/// Credentials scraped from `{host}/translator`'s HTML: the `IG` token, the
/// `IID` token, and the `token`/`expiry` pair embedded in
/// `params_AbusePreventionHelper`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BingCredentials {
    pub ig: String,
    pub iid: String,
    pub token: String,
    pub timestamp: String,
    pub expiry_millis: u64,
}

fn ig_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"IG:"([^"]+)""#).expect("valid regex"))
}

fn iid_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"data-iid="([^"]+)""#).expect("valid regex"))
}

fn abuse_helper_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"params_AbusePreventionHelper\s*=\s*\[\s*(\d+)\s*,\s*"([^"]+)"\s*,\s*(\d+)\s*\]"#)
            .expect("valid regex")
    })
}

/// Scrapes the three Bing translator credentials out of the `/translator`
/// page HTML. Returns `None` if any of the three regex captures is missing,
/// which the caller should surface as `ServiceUnavailable`.
pub fn scrape(html: &str) -> Option<BingCredentials> {
    let ig = ig_pattern().captures(html)?.get(1)?.as_str().to_string();
    let iid = iid_pattern().captures(html)?.get(1)?.as_str().to_string();
    let abuse = abuse_helper_pattern().captures(html)?;
    let timestamp = abuse.get(1)?.as_str().to_string();
    let token = abuse.get(2)?.as_str().to_string();
    let expiry_millis: u64 = abuse.get(3)?.as_str().parse().ok()?;

    Some(BingCredentials {
        ig,
        iid,
        token,
        timestamp,
        expiry_millis,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <script>
        var IG:"ABCDEF1234567890ABCDEF1234567890";
        var params_AbusePreventionHelper = [1700000000000,"TOKEN_VALUE_123",1700003600000];
        </script>
        <div id="tta_outGDcont" data-iid="translator.5023.1"></div>
    "#;

    #[test]
    fn scrapes_all_three_credentials() {
        let creds = scrape(PAGE).expect("credentials present");
        assert_eq!(creds.ig, "ABCDEF1234567890ABCDEF1234567890");
        assert_eq!(creds.iid, "translator.5023.1");
        assert_eq!(creds.token, "TOKEN_VALUE_123");
        assert_eq!(creds.expiry_millis, 1_700_003_600_000);
    }

    #[test]
    fn returns_none_when_ig_is_missing() {
        let html = r#"var params_AbusePreventionHelper = [1,"t",2];"#;
        assert!(scrape(html).is_none());
    }
}
