//! Translators for the REST-signed provider family: each request is a
//! single authenticated REST call, no streaming, signed or keyed in a way
//! distinct enough per-provider to warrant its own request-signing logic
//! rather than sharing the OpenAI-compatible config.

mod caiyun;
mod deepl_api;
mod deepl_web;
mod niutrans;
mod volcano;

pub use caiyun::{CaiyunSettings, CaiyunTranslator};
pub use deepl_api::DeepLApiTranslator;
pub use deepl_web::{DeepLWebSettings, DeepLWebTranslator};
pub use niutrans::{NiuTransSettings, NiuTransTranslator};
pub use volcano::{VolcanoSettings, VolcanoTranslator};
