//! Translators for the web-scraped provider family: each one imitates a
//! browser client talking to a provider's own web frontend rather than a
//! published API, so the state here is page-scraping and anti-detection
//! bookkeeping instead of a documented request shape.

mod bing;
mod google_dict;
mod google_free;
mod youdao;

pub use bing::{BingSettings, BingTranslator};
pub use google_dict::GoogleDictTranslator;
pub use google_free::GoogleFreeTranslator;
pub use youdao::{YoudaoWebSettings, YoudaoWebTranslator};
