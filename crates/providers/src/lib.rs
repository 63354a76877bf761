//! Generative-language provider implementations for ASKBOT.
//!
//! All providers implement the `askbot_core::Provider` trait, so the
//! answer pipeline never knows which backend it is talking to.

pub mod gemini;

pub use gemini::GeminiProvider;
