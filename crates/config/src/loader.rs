use std::path::Path;

use anyhow::{Context, bail};

use crate::Config;

/// Load configuration from a TOML file, then layer in the two environment-provided
/// secrets `spec.md` §6 names ("Environment inputs"): the LLM API key (required) and
/// base URL (optional).
pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Config> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).with_context(|| format!("reading config file {}", path.display()))?;
    let mut config: Config = toml::from_str(&content).with_context(|| format!("parsing config file {}", path.display()))?;

    apply_env_overrides(&mut config)?;
    config.field_limits.validate()?;

    Ok(config)
}

/// Load the default configuration with only environment overrides applied; used by
/// tests and by `clipforge` when no `--config` path is given.
pub fn load_default() -> anyhow::Result<Config> {
    let mut config = Config::default();
    apply_env_overrides(&mut config)?;
    config.field_limits.validate()?;
    Ok(config)
}

fn apply_env_overrides(config: &mut Config) -> anyhow::Result<()> {
    match std::env::var("CLIPFORGE_LLM_API_KEY") {
        Ok(key) if !key.is_empty() => config.llm_api_key = Some(key),
        _ => {}
    }

    if let Ok(base_url) = std::env::var("CLIPFORGE_LLM_BASE_URL") {
        if !base_url.is_empty() {
            config.llm.base_url = base_url;
        }
    }

    if config.llm_api_key.is_none() {
        bail!(
            "CLIPFORGE_LLM_API_KEY must be set (or pass --llm-api-key); ClipForge cannot call the generation LLM without it"
        );
    }

    Ok(())
}
