//! Stateless JSON-mode chat-completions client shared by every generation stage.
//!
//! Every call is funneled through a [`rate_limit::RateLimiter`] and retried with
//! exponential backoff on transport errors and recoverable status codes.

#![deny(missing_docs)]

use std::time::Duration;

use config::LlmConfig;
use model::{ClipForgeError, Result};
use rate_limit::RateLimiter;
use serde::{Deserialize, Serialize};
use serde_json::Value;

const BACKOFF_SCHEDULE: [Duration; 3] = [Duration::from_secs(1), Duration::from_secs(2), Duration::from_secs(4)];

/// A stateless client against one configured chat-completions endpoint.
#[derive(Clone)]
pub struct LlmClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
    max_retries: u32,
    rate_limiter: RateLimiter,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

impl LlmClient {
    /// Build a client from configuration, the rate limiter it must share with every
    /// other caller, and the API key resolved from the environment.
    pub fn new(config: &LlmConfig, api_key: String, rate_limiter: RateLimiter) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .unwrap_or_default();

        Self {
            http,
            base_url: config.base_url.clone(),
            model: config.model.clone(),
            api_key,
            max_retries: config.max_retries,
            rate_limiter,
        }
    }

    /// Send a system/user message pair in JSON-response mode and return the parsed body.
    ///
    /// Retries transport errors and 429/5xx status codes with exponential backoff
    /// (1s, 2s, 4s), up to `max_retries` attempts. JSON parse failures are not retried.
    pub async fn chat_json(&self, system: &str, user: &str) -> Result<Value> {
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let delay = BACKOFF_SCHEDULE[(attempt - 1) as usize % BACKOFF_SCHEDULE.len()];
                log::warn!("llm call attempt {attempt} retrying after {delay:?}: {:?}", last_error);
                tokio::time::sleep(delay).await;
            }

            self.rate_limiter.acquire().await;

            match self.try_once(system, user).await {
                Ok(text) => return parse_response(&text),
                Err(Retryable::Timeout) => last_error = Some(ClipForgeError::LlmTimeout),
                Err(Retryable::RateLimited) => last_error = Some(ClipForgeError::LlmRateLimited),
                Err(Retryable::Terminal(err)) => return Err(err),
            }
        }

        Err(last_error.unwrap_or(ClipForgeError::LlmRateLimited))
    }

    async fn try_once(&self, system: &str, user: &str) -> std::result::Result<String, Retryable> {
        let url = format!("{}/chat/completions", self.base_url);
        let request = ChatRequest {
            model: &self.model,
            messages: [ChatMessage { role: "system", content: system }, ChatMessage { role: "user", content: user }],
            response_format: ResponseFormat { kind: "json_object" },
        };

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|err| if err.is_timeout() { Retryable::Timeout } else { Retryable::RateLimited })?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
            return Err(Retryable::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Retryable::Terminal(ClipForgeError::LlmParseFailed(format!(
                "llm returned {status}: {body}"
            ))));
        }

        response.text().await.map_err(|_| Retryable::Timeout)
    }
}

enum Retryable {
    Timeout,
    RateLimited,
    Terminal(ClipForgeError),
}

impl std::fmt::Debug for Retryable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Timeout => write!(f, "timeout"),
            Self::RateLimited => write!(f, "rate-limited/5xx"),
            Self::Terminal(err) => write!(f, "terminal: {err}"),
        }
    }
}

fn parse_response(raw: &str) -> Result<Value> {
    let envelope: ChatResponse =
        serde_json::from_str(raw).map_err(|_| ClipForgeError::LlmParseFailed(raw.to_string()))?;

    let content = envelope
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .ok_or_else(|| ClipForgeError::LlmParseFailed(raw.to_string()))?;

    serde_json::from_str(&content).map_err(|_| ClipForgeError::LlmParseFailed(content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn parses_nested_json_content() {
        let raw = indoc! {r#"
            {"choices": [{"message": {"content": "{\"ideas\": []}"}}]}
        "#};

        let parsed = parse_response(raw).unwrap();
        assert_eq!(parsed["ideas"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn malformed_envelope_is_parse_failed() {
        let err = parse_response("not json").unwrap_err();
        assert_eq!(err.kind(), "llm-parse-failed");
    }

    #[test]
    fn content_that_is_not_json_is_parse_failed() {
        let raw = indoc! {r#"
            {"choices": [{"message": {"content": "plain text, not json"}}]}
        "#};

        let err = parse_response(raw).unwrap_err();
        assert_eq!(err.kind(), "llm-parse-failed");
    }
}
