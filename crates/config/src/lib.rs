//! Field-limits, style registry, and application configuration for ClipForge.

#![deny(missing_docs)]

mod limits;
mod llm;
mod loader;
mod server;
mod style;

pub use limits::{FieldLimits, TWEET_HARD_CAP};
pub use llm::{LlmConfig, RateLimitConfig};
pub use server::ServerConfig;
pub use style::{StyleBlock, StyleRegistry};

use serde::Deserialize;

/// The fully-resolved, process-wide ClipForge configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// LLM client settings.
    pub llm: LlmConfig,
    /// Process-wide default field limits; per-request overrides layer on top of these.
    pub field_limits: FieldLimits,
    /// LLM API key. Never deserialized from the TOML file itself (would leak into
    /// version-controlled config); always supplied via `CLIPFORGE_LLM_API_KEY`.
    #[serde(skip)]
    pub llm_api_key: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            llm: LlmConfig::default(),
            field_limits: FieldLimits::default(),
            llm_api_key: None,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file path, applying environment overrides.
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> anyhow::Result<Self> {
        loader::load(path)
    }

    /// Load the default configuration with only environment overrides applied.
    pub fn load_default() -> anyhow::Result<Self> {
        loader::load_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_deserialize_from_empty_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.listen_address, "127.0.0.1:8080");
        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert_eq!(config.field_limits.max_ideas, 8);
    }
}
