//! The `Translator` trait and its capability descriptor.
//!
//! Every concrete provider in `translate-openai-compatible`,
//! `translate-bespoke-streaming`, `translate-web-scraped`,
//! `translate-rest-signed` and `translate-dictionary` implements
//! [`Translator`]; `translate-registry` only ever talks to providers
//! through this trait object.

pub mod capability;
pub mod stream;
pub mod translator;

pub use capability::TranslatorCapability;
pub use stream::TranslationStream;
pub use translator::Translator;
