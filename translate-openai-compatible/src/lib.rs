//! The eight OpenAI-compatible chat-completions providers:
//! OpenAI, DeepSeek, Groq, Zhipu, GitHub Models, Ollama, Custom, and
//! Built-in AI. All eight share [`base::OpenAICompatibleTranslator`]; each
//! submodule only supplies the settings struct and endpoint/auth wiring
//! that differs.

pub mod base;
pub mod builtin;
pub mod custom;
pub mod deepseek;
pub mod github_models;
pub mod groq;
pub mod ollama;
pub mod openai;
pub mod zhipu;

pub use base::{OpenAICompatibleConfig, OpenAICompatibleTranslator};
pub use builtin::{BuiltinSettings, BuiltinTranslator};
pub use custom::{custom_translator, CustomSettings};
pub use deepseek::{deepseek_translator, DeepSeekSettings};
pub use github_models::{github_models_translator, GitHubModelsSettings};
pub use groq::{groq_translator, GroqSettings};
pub use ollama::{OllamaSettings, OllamaTranslator};
pub use openai::{openai_translator, OpenAiSettings};
pub use zhipu::{zhipu_translator, ZhipuSettings};
