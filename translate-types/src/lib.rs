//! Core data model for the translation gateway.
//!
//! This crate has no network or provider logic in it: it is the shared
//! vocabulary — [`Language`], [`TranslationRequest`], [`TranslationResult`]
//! and [`TranslationError`] — that every other crate in the workspace
//! builds on.

pub mod error;
pub mod language;
pub mod request;
pub mod result;

pub use error::{ErrorKind, TranslationError};
pub use language::{resolve_detected_language, Language};
pub use request::TranslationRequest;
pub use result::{Accent, Definition, Phonetic, TranslationResult, WordResult};
