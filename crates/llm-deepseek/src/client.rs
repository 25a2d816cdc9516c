//! HTTP client for the DeepSeek chat-completions endpoint

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use relay_types::CompletionClient;
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::DeepSeekConfig;

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    max_tokens: u32,
    temperature: f32,
    messages: Vec<ChatMessage>,
    stream: bool,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: String,
}

/// DeepSeek API client
pub struct DeepSeekClient {
    http: HttpClient,
    config: DeepSeekConfig,
}

impl DeepSeekClient {
    /// Create a new client. Fails only if the HTTP client cannot be built.
    pub fn new(config: DeepSeekConfig) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(config.request_timeout)
            .build()
            .context("Failed to build HTTP client for DeepSeek")?;

        Ok(Self { http, config })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    /// Send one prompt and return the generated text.
    ///
    /// Retries 429 and 5xx responses (and transport errors) with
    /// doubling backoff, up to `retry_attempts` total attempts. Any
    /// other failure is returned on the first occurrence.
    pub async fn complete_text(&self, prompt: &str) -> Result<String> {
        let request_body = ChatRequest {
            model: self.config.model.clone(),
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt.to_string(),
            }],
            stream: false,
        };

        let url = self.completions_url();
        let attempts = self.config.retry_attempts.max(1);
        let mut delay = self.config.initial_backoff;

        // ── Retry loop ────────────────────────────────────────────────────────
        for attempt in 0..attempts {
            let send_result = self
                .http
                .post(&url)
                .header("authorization", format!("Bearer {}", self.config.api_key))
                .json(&request_body)
                .send()
                .await;

            match send_result {
                Ok(resp) => {
                    let status = resp.status();
                    if status.is_success() {
                        let parsed: ChatResponse = resp
                            .json()
                            .await
                            .context("Failed to parse DeepSeek API response")?;

                        let content = parsed
                            .choices
                            .into_iter()
                            .next()
                            .map(|c| c.message.content)
                            .unwrap_or_default();

                        if content.is_empty() {
                            bail!("DeepSeek API returned an empty completion");
                        }

                        debug!(model = %self.config.model, "Received DeepSeek completion");
                        return Ok(content);
                    }

                    let body = resp.text().await.unwrap_or_default();
                    let retryable = status.as_u16() == 429 || status.is_server_error();
                    if retryable && attempt + 1 < attempts {
                        warn!(
                            attempt = attempt + 1,
                            %status,
                            retry_in = ?delay,
                            "DeepSeek API retryable error, retrying"
                        );
                        tokio::time::sleep(delay).await;
                        delay *= 2;
                    } else {
                        bail!("DeepSeek API {status}: {body}");
                    }
                }
                Err(e) => {
                    if attempt + 1 < attempts {
                        warn!(attempt = attempt + 1, error = %e, "HTTP error, retrying");
                        tokio::time::sleep(delay).await;
                        delay *= 2;
                    } else {
                        return Err(anyhow::Error::new(e).context("DeepSeek request failed"));
                    }
                }
            }
        }

        bail!("DeepSeek API: exhausted retries")
    }
}

#[async_trait]
impl CompletionClient for DeepSeekClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        self.complete_text(prompt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(server_uri: &str, retry_attempts: u32) -> DeepSeekConfig {
        DeepSeekConfig {
            api_key: "sk-test".to_string(),
            base_url: server_uri.to_string(),
            retry_attempts,
            initial_backoff: Duration::from_millis(10),
            request_timeout: Duration::from_secs(5),
            ..DeepSeekConfig::default()
        }
    }

    fn completion_body(text: &str) -> serde_json::Value {
        serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": text}}]
        })
    }

    #[tokio::test]
    async fn test_complete_returns_generated_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_partial_json(serde_json::json!({
                "model": "deepseek-chat",
                "stream": false,
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("42.")))
            .expect(1)
            .mount(&server)
            .await;

        let client = DeepSeekClient::new(test_config(&server.uri(), 3)).expect("client");
        let reply = client.complete_text("meaning of life?").await.expect("completion");
        assert_eq!(reply, "42.");
    }

    #[tokio::test]
    async fn test_prompt_is_sent_as_user_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_partial_json(serde_json::json!({
                "messages": [{"role": "user", "content": "hello"}],
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("hi")))
            .expect(1)
            .mount(&server)
            .await;

        let client = DeepSeekClient::new(test_config(&server.uri(), 1)).expect("client");
        client.complete_text("hello").await.expect("completion");
    }

    #[tokio::test]
    async fn test_client_error_is_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
            .expect(1)
            .mount(&server)
            .await;

        let client = DeepSeekClient::new(test_config(&server.uri(), 3)).expect("client");
        let err = client.complete_text("hello").await.expect_err("should fail");
        assert!(err.to_string().contains("401"));
    }

    #[tokio::test]
    async fn test_server_error_retried_then_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
            .expect(2)
            .mount(&server)
            .await;

        let client = DeepSeekClient::new(test_config(&server.uri(), 2)).expect("client");
        let err = client.complete_text("hello").await.expect_err("should fail");
        assert!(err.to_string().contains("500"));
    }

    #[tokio::test]
    async fn test_empty_completion_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("")))
            .mount(&server)
            .await;

        let client = DeepSeekClient::new(test_config(&server.uri(), 1)).expect("client");
        let err = client.complete_text("hello").await.expect_err("should fail");
        assert!(err.to_string().contains("empty completion"));
    }
}
