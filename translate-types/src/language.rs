use serde::{Deserialize, Serialize};

/// The closed set of languages the gateway understands.
///
/// Every provider speaks its own dialect of language codes (`zh-CN` vs
/// `zh-Hans` vs `zh-CHS`, `nb` vs `no`, ...). Callers and providers always
/// work in terms of this enum; [`Language::provider_code`] is the only
/// place a provider-specific string ever gets produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    /// Let the provider detect the source language.
    Auto,
    SimplifiedChinese,
    TraditionalChinese,
    ClassicalChinese,
    Cantonese,
    English,
    Japanese,
    Korean,
    French,
    German,
    Spanish,
    Portuguese,
    Italian,
    Russian,
    Dutch,
    Swedish,
    Norwegian,
    Danish,
    Finnish,
    Polish,
    Czech,
    Slovak,
    Hungarian,
    Romanian,
    Bulgarian,
    Greek,
    Ukrainian,
    Turkish,
    Arabic,
    Hebrew,
    Persian,
    Hindi,
    Bengali,
    Urdu,
    Tamil,
    Telugu,
    Vietnamese,
    Thai,
    Indonesian,
    Malay,
    Filipino,
    Burmese,
    Khmer,
    Lao,
    Mongolian,
    Swahili,
    Amharic,
}

impl Language {
    /// Canonical ISO 639 / BCP-47 code. This is the fallback used by
    /// [`Language::provider_code`] for any provider without an explicit
    /// override entry.
    pub fn iso_code(&self) -> &'static str {
        match self {
            Language::Auto => "auto",
            Language::SimplifiedChinese => "zh-CN",
            Language::TraditionalChinese => "zh-TW",
            Language::ClassicalChinese => "lzh",
            Language::Cantonese => "yue",
            Language::English => "en",
            Language::Japanese => "ja",
            Language::Korean => "ko",
            Language::French => "fr",
            Language::German => "de",
            Language::Spanish => "es",
            Language::Portuguese => "pt",
            Language::Italian => "it",
            Language::Russian => "ru",
            Language::Dutch => "nl",
            Language::Swedish => "sv",
            Language::Norwegian => "no",
            Language::Danish => "da",
            Language::Finnish => "fi",
            Language::Polish => "pl",
            Language::Czech => "cs",
            Language::Slovak => "sk",
            Language::Hungarian => "hu",
            Language::Romanian => "ro",
            Language::Bulgarian => "bg",
            Language::Greek => "el",
            Language::Ukrainian => "uk",
            Language::Turkish => "tr",
            Language::Arabic => "ar",
            Language::Hebrew => "he",
            Language::Persian => "fa",
            Language::Hindi => "hi",
            Language::Bengali => "bn",
            Language::Urdu => "ur",
            Language::Tamil => "ta",
            Language::Telugu => "te",
            Language::Vietnamese => "vi",
            Language::Thai => "th",
            Language::Indonesian => "id",
            Language::Malay => "ms",
            Language::Filipino => "tl",
            Language::Burmese => "my",
            Language::Khmer => "km",
            Language::Lao => "lo",
            Language::Mongolian => "mn",
            Language::Swahili => "sw",
            Language::Amharic => "am",
        }
    }

    /// Human-facing display name, e.g. for a language picker.
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::Auto => "Detect Language",
            Language::SimplifiedChinese => "Chinese (Simplified)",
            Language::TraditionalChinese => "Chinese (Traditional)",
            Language::ClassicalChinese => "Chinese (Classical)",
            Language::Cantonese => "Cantonese",
            Language::English => "English",
            Language::Japanese => "Japanese",
            Language::Korean => "Korean",
            Language::French => "French",
            Language::German => "German",
            Language::Spanish => "Spanish",
            Language::Portuguese => "Portuguese",
            Language::Italian => "Italian",
            Language::Russian => "Russian",
            Language::Dutch => "Dutch",
            Language::Swedish => "Swedish",
            Language::Norwegian => "Norwegian",
            Language::Danish => "Danish",
            Language::Finnish => "Finnish",
            Language::Polish => "Polish",
            Language::Czech => "Czech",
            Language::Slovak => "Slovak",
            Language::Hungarian => "Hungarian",
            Language::Romanian => "Romanian",
            Language::Bulgarian => "Bulgarian",
            Language::Greek => "Greek",
            Language::Ukrainian => "Ukrainian",
            Language::Turkish => "Turkish",
            Language::Arabic => "Arabic",
            Language::Hebrew => "Hebrew",
            Language::Persian => "Persian",
            Language::Hindi => "Hindi",
            Language::Bengali => "Bengali",
            Language::Urdu => "Urdu",
            Language::Tamil => "Tamil",
            Language::Telugu => "Telugu",
            Language::Vietnamese => "Vietnamese",
            Language::Thai => "Thai",
            Language::Indonesian => "Indonesian",
            Language::Malay => "Malay",
            Language::Filipino => "Filipino",
            Language::Burmese => "Burmese",
            Language::Khmer => "Khmer",
            Language::Lao => "Lao",
            Language::Mongolian => "Mongolian",
            Language::Swahili => "Swahili",
            Language::Amharic => "Amharic",
        }
    }

    /// Maps this language to the dialect a specific provider expects.
    ///
    /// Looks up a provider-specific override table first, falling back to
    /// [`Language::iso_code`] when the provider has no quirky spelling for
    /// this language.
    pub fn provider_code(&self, provider: &str) -> String {
        if let Some(code) = provider_override(provider, *self) {
            return code.to_string();
        }
        self.iso_code().to_string()
    }

    /// Maps a provider-dialect code back to a [`Language`], case-insensitive
    /// prefix matching the well-known Chinese-script aliases. Unknown codes
    /// map to [`Language::Auto`] rather than panicking or erroring.
    pub fn from_provider_code(code: &str) -> Language {
        let c = code.trim();
        if c.is_empty() {
            return Language::Auto;
        }
        let lower = c.to_ascii_lowercase();
        match lower.as_str() {
            "zh-cn" | "zh-hans" | "zh-chs" | "zh" | "zh_cn" => return Language::SimplifiedChinese,
            "zh-tw" | "zh-hant" | "zh-cht" | "zh_tw" | "zh-hk" => {
                return Language::TraditionalChinese;
            }
            "yue" | "zh-yue" => return Language::Cantonese,
            "auto" | "auto-detect" | "" => return Language::Auto,
            _ => {}
        }
        for lang in Language::ALL {
            if lang.iso_code().eq_ignore_ascii_case(c) {
                return *lang;
            }
            if lower.starts_with(&format!("{}-", lang.iso_code().to_ascii_lowercase()))
                || lower.starts_with(&format!("{}_", lang.iso_code().to_ascii_lowercase()))
            {
                return *lang;
            }
        }
        Language::Auto
    }

    /// Every variant, used for reverse lookups and capability sets.
    pub const ALL: &'static [Language] = &[
        Language::Auto,
        Language::SimplifiedChinese,
        Language::TraditionalChinese,
        Language::ClassicalChinese,
        Language::Cantonese,
        Language::English,
        Language::Japanese,
        Language::Korean,
        Language::French,
        Language::German,
        Language::Spanish,
        Language::Portuguese,
        Language::Italian,
        Language::Russian,
        Language::Dutch,
        Language::Swedish,
        Language::Norwegian,
        Language::Danish,
        Language::Finnish,
        Language::Polish,
        Language::Czech,
        Language::Slovak,
        Language::Hungarian,
        Language::Romanian,
        Language::Bulgarian,
        Language::Greek,
        Language::Ukrainian,
        Language::Turkish,
        Language::Arabic,
        Language::Hebrew,
        Language::Persian,
        Language::Hindi,
        Language::Bengali,
        Language::Urdu,
        Language::Tamil,
        Language::Telugu,
        Language::Vietnamese,
        Language::Thai,
        Language::Indonesian,
        Language::Malay,
        Language::Filipino,
        Language::Burmese,
        Language::Khmer,
        Language::Lao,
        Language::Mongolian,
        Language::Swahili,
        Language::Amharic,
    ];
}

/// Per-provider quirky code overrides. Only entries that actually diverge
/// from the ISO code are listed; everything else falls through to
/// [`Language::iso_code`].
fn provider_override(provider: &str, lang: Language) -> Option<&'static str> {
    match provider {
        "google" | "google-dict" | "bing" => match lang {
            Language::Auto => Some("auto"),
            Language::SimplifiedChinese => Some("zh-CN"),
            Language::TraditionalChinese => Some("zh-TW"),
            Language::Filipino => Some("tl"),
            _ => None,
        },
        "deepl" | "deepl-web" => match lang {
            Language::TraditionalChinese => Some("ZH-HANT"),
            Language::SimplifiedChinese => Some("ZH"),
            Language::Portuguese => Some("PT-PT"),
            Language::Norwegian => Some("NB"),
            Language::English => Some("EN"),
            _ => None,
        },
        "youdao" | "youdao-web" | "youdao-open" => match lang {
            Language::Auto => Some("auto"),
            Language::SimplifiedChinese => Some("zh-CHS"),
            Language::TraditionalChinese => Some("zh-CHT"),
            _ => None,
        },
        "volcano" => match lang {
            Language::Auto => Some("auto"),
            Language::SimplifiedChinese => Some("zh"),
            _ => None,
        },
        "caiyun" => match lang {
            Language::SimplifiedChinese | Language::TraditionalChinese => Some("zh"),
            Language::Auto => Some("auto"),
            _ => None,
        },
        "linguee" => match lang {
            Language::SimplifiedChinese | Language::TraditionalChinese => Some("zh"),
            _ => None,
        },
        _ => None,
    }
}

/// Resolves every alternative code a provider returned for a detected
/// language, preferring later entries. Google Dict reports the detected
/// language at both index `[2]` and `[8]` of its response array, and `[8]`
/// is the one that reliably distinguishes `zh-TW` from `zh-CN`; this helper
/// lets that caller just hand over both strings in preference order.
pub fn resolve_detected_language(candidates: &[&str]) -> Language {
    let mut resolved = Language::Auto;
    for candidate in candidates {
        let lang = Language::from_provider_code(candidate);
        if !matches!(lang, Language::Auto) {
            resolved = lang;
        }
    }
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_iso_codes() {
        for lang in Language::ALL {
            assert_eq!(Language::from_provider_code(lang.iso_code()), *lang);
        }
    }

    #[test]
    fn chinese_script_aliases() {
        assert_eq!(
            Language::from_provider_code("zh-Hans"),
            Language::SimplifiedChinese
        );
        assert_eq!(
            Language::from_provider_code("zh-CHS"),
            Language::SimplifiedChinese
        );
        assert_eq!(
            Language::from_provider_code("zh-Hant"),
            Language::TraditionalChinese
        );
        assert_eq!(
            Language::from_provider_code("zh-TW"),
            Language::TraditionalChinese
        );
        assert_eq!(
            Language::from_provider_code("zh-CHT"),
            Language::TraditionalChinese
        );
    }

    #[test]
    fn unknown_code_maps_to_auto() {
        assert_eq!(Language::from_provider_code("xx-yy"), Language::Auto);
    }

    #[test]
    fn provider_override_falls_back_to_iso() {
        assert_eq!(Language::French.provider_code("openai"), "fr");
        assert_eq!(Language::English.provider_code("deepl"), "EN");
    }

    #[test]
    fn google_dict_prefers_later_candidate() {
        let resolved = resolve_detected_language(&["zh", "zh-TW"]);
        assert_eq!(resolved, Language::TraditionalChinese);
    }
}
