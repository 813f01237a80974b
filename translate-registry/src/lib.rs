//! Process-wide provider registry, the ref-counted handle that makes
//! reconfiguration safe under concurrent translations, and the
//! `TranslationGateway` facade callers actually talk to.

mod gateway;
mod registry;

pub use gateway::TranslationGateway;
pub use registry::{Handle, ProviderRegistry};
