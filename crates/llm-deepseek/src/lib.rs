//! DeepSeek completion client
//!
//! Non-streaming client for the DeepSeek chat-completions API
//! (OpenAI-compatible). Retries 429 and 5xx responses with exponential
//! backoff; everything above this crate makes one-shot calls.

mod client;
mod config;

pub use client::DeepSeekClient;
pub use config::DeepSeekConfig;
