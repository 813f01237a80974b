//! The shared pooled [`Transport`] every provider adapter sends requests
//! through, plus the three streaming-response decoders: OpenAI-style
//! `choices[].delta.content` SSE, Gemini's `candidates[]`
//! SSE-or-bare-JSON-lines, and Doubao's named-event SSE.

pub mod client;
pub mod sse_doubao;
pub mod sse_gemini;
pub mod sse_openai;

pub use client::{send, Transport};
pub use sse_doubao::decode_doubao_sse;
pub use sse_gemini::decode_gemini_sse;
pub use sse_openai::decode_openai_sse;
