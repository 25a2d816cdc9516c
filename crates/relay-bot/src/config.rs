//! Configuration management for relay-bot

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;

use anyhow::{Context, Result};
use llm_deepseek::DeepSeekConfig;
use serde::{Deserialize, Serialize};
use std::fs;

/// Complete bot configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub telegram: TelegramConfig,
    pub llm: LlmConfig,
    #[serde(default)]
    pub limits: LimitConfig,
}

/// Telegram specific configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    /// Bot token from BotFather
    pub bot_token: String,
}

/// Completion service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// DeepSeek API key
    pub api_key: String,
    /// Model name
    #[serde(default = "default_model")]
    pub model: String,
    /// Max tokens per completion
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

/// Pipeline limits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitConfig {
    /// Minimum seconds between accepted messages per user
    #[serde(default = "default_min_interval")]
    pub min_message_interval_secs: u64,
    /// Characters of the AI reply included in the log preview
    #[serde(default = "default_preview_chars")]
    pub reply_preview_chars: usize,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path))?;

        Ok(config)
    }

    /// Build configuration from secrets resolved outside a config
    /// file (CLI flags, with their environment-variable fallbacks
    /// already applied by the argument parser).
    ///
    /// The two secrets are required; missing either is a fatal startup
    /// error and the process does not start.
    pub fn from_secrets(bot_token: Option<String>, api_key: Option<String>) -> Result<Self> {
        let bot_token = bot_token.context("TELEGRAM_BOT_TOKEN not set")?;
        let api_key = api_key.context("DEEPSEEK_API_KEY not set")?;

        let model = std::env::var("DEEPSEEK_MODEL").unwrap_or_else(|_| default_model());

        Ok(Config {
            telegram: TelegramConfig { bot_token },
            llm: LlmConfig {
                api_key,
                model,
                max_tokens: default_max_tokens(),
                temperature: default_temperature(),
            },
            limits: LimitConfig::default(),
        })
    }
}

impl LlmConfig {
    /// Translate into the completion client's own config type
    pub fn to_deepseek_config(&self) -> DeepSeekConfig {
        DeepSeekConfig {
            api_key: self.api_key.clone(),
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            ..DeepSeekConfig::default()
        }
    }
}

fn default_model() -> String {
    "deepseek-chat".to_string()
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_temperature() -> f32 {
    0.3
}

fn default_min_interval() -> u64 {
    2
}

fn default_preview_chars() -> usize {
    100
}

impl Default for LimitConfig {
    fn default() -> Self {
        Self {
            min_message_interval_secs: default_min_interval(),
            reply_preview_chars: default_preview_chars(),
        }
    }
}
