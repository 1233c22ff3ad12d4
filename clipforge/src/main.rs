use clap::Parser;
use tokio_util::sync::CancellationToken;

use args::Args;

mod args;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    server::init_logger(&args.log_filter);

    let mut config = match &args.config {
        Some(path) => config::Config::load(path)?,
        None => config::Config::load_default()?,
    };

    if let Some(key) = args.llm_api_key {
        config.llm_api_key = Some(key);
    }

    let shutdown_signal = CancellationToken::new();
    let shutdown_on_ctrl_c = shutdown_signal.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            shutdown_on_ctrl_c.cancel();
        }
    });

    server::serve(server::ServeConfig {
        listen_address: args.listen_address,
        config,
        shutdown_signal,
        version: env!("CARGO_PKG_VERSION").to_string(),
        bound_addr_sender: None,
    })
    .await
}
