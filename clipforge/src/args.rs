use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

/// Turn long-form video and documents into short-form social content.
#[derive(Debug, Parser)]
#[command(name = "clipforge", version)]
pub struct Args {
    /// Path to a TOML configuration file. Defaults are used for anything unset when
    /// no path (or no file at that path) is given.
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Socket address to bind, overriding the configuration file's `server.listen-address`.
    #[arg(long)]
    pub listen_address: Option<SocketAddr>,

    /// Log filter string, `env_logger`-style, e.g. `"info"` or `"server=debug,brain=debug"`.
    #[arg(long, env = "CLIPFORGE_LOG", default_value = "info")]
    pub log_filter: String,

    /// LLM API key. Overrides `CLIPFORGE_LLM_API_KEY` when both are set.
    #[arg(long, env = "CLIPFORGE_LLM_API_KEY", hide_env_values = true)]
    pub llm_api_key: Option<String>,
}
