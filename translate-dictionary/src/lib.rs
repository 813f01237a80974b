//! Translator for the dictionary provider family: a lookup whose result is
//! itself a list of candidate translations rather than one best sentence.

mod linguee;

pub use linguee::LingueeTranslator;
