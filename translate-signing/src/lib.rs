//! Signing and credential-scraping primitives, one module per provider
//! scheme: raw digests, NiuTrans's HMAC header signing, Volcano's SigV4-
//! style canonical request, Youdao's web-dict salt/hash, DeepL web's
//! anti-detection math, and Bing's HTML credential scraper.
//!
//! None of this crate talks to the network; it only turns provider secrets
//! and request bytes into the values a request needs to carry.

pub mod bing;
pub mod deepl_web;
pub mod digest;
pub mod niutrans;
pub mod secret_store;
pub mod volcano;
pub mod youdao;

pub use bing::{scrape as scrape_bing_credentials, BingCredentials};
pub use digest::{hmac_sha256, hmac_sha256_base64, hmac_sha256_hex, md5_hex, sha256, sha256_base64, sha256_hex};
pub use niutrans::{sign as sign_niutrans, NiuTransSignature};
pub use secret_store::{EnvSecretStore, SecretStore};
pub use volcano::sign as sign_volcano;
pub use youdao::{sign_web_dict, WebDictSignature, WEB_DICT_LANGUAGES};
