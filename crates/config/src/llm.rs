use serde::Deserialize;

/// Configuration for the single LLM Client the generation pipeline calls.
///
/// `spec.md` §1 scopes "LLM vendor specifics" out of this system; only the generic
/// JSON-mode chat-completions shape is modeled here.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LlmConfig {
    /// Base URL of the chat-completions endpoint. Overridable by `CLIPFORGE_LLM_BASE_URL`.
    pub base_url: String,
    /// Model identifier sent with every request.
    pub model: String,
    /// Soft per-call timeout in seconds (`spec.md` §5: default 60s).
    pub request_timeout_secs: u64,
    /// Maximum retry attempts on transport errors / 429 / 5xx (`spec.md` §4.6: 3).
    pub max_retries: u32,
    /// Rate limiter configuration shared by every LLM caller.
    pub rate_limit: RateLimitConfig,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            request_timeout_secs: 60,
            max_retries: 3,
            rate_limit: RateLimitConfig::default(),
        }
    }
}

/// Sliding-window RPM + daily-count gate for external LLM calls (`spec.md` §4.1).
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RateLimitConfig {
    /// Maximum calls allowed in any trailing 60 second window.
    pub requests_per_minute: u32,
    /// Maximum calls allowed per calendar day (process clock).
    pub requests_per_day: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            requests_per_minute: 10,
            requests_per_day: 250,
        }
    }
}
