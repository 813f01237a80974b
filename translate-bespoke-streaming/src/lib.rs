//! The two providers with a wire protocol of their own rather than an
//! OpenAI-compatible shape: Gemini and Doubao.

pub mod doubao;
pub mod gemini;

pub use doubao::{DoubaoSettings, DoubaoTranslator};
pub use gemini::{GeminiSettings, GeminiTranslator};
