use std::time::Duration;

/// DeepSeek API configuration
#[derive(Debug, Clone)]
pub struct DeepSeekConfig {
    /// API key (`DEEPSEEK_API_KEY`)
    pub api_key: String,
    /// Base URL of the OpenAI-compatible endpoint.
    /// Default: `https://api.deepseek.com/v1`.
    pub base_url: String,
    /// Model name. Default: `deepseek-chat`.
    pub model: String,
    /// Max tokens per completion. Default: `1024`.
    pub max_tokens: u32,
    /// Sampling temperature. Default: `0.3`.
    pub temperature: f32,
    /// Number of attempts for 429 / 5xx errors. Default: `3`.
    pub retry_attempts: u32,
    /// Backoff before the first retry; doubles on each subsequent one.
    pub initial_backoff: Duration,
    /// Whole-request timeout on the HTTP client. Default: `120s`.
    pub request_timeout: Duration,
}

impl Default for DeepSeekConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://api.deepseek.com/v1".to_string(),
            model: "deepseek-chat".to_string(),
            max_tokens: 1024,
            temperature: 0.3,
            retry_attempts: 3,
            initial_backoff: Duration::from_secs(1),
            request_timeout: Duration::from_secs(120),
        }
    }
}

impl DeepSeekConfig {
    /// Config with the given key and all defaults
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }
}
