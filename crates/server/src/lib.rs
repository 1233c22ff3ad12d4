//! ClipForge server library.
//!
//! Provides a reusable server function to serve ClipForge either for the binary, or
//! for integration tests.

#![deny(missing_docs)]

mod auth;
mod generation;
mod logger;
mod routes;
mod sse;
mod state;
mod video_id;

use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::anyhow;
use axum::Router;
use axum::middleware;
use config::Config;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use logger::init as init_logger;
pub use state::AppState;

/// Configuration for serving ClipForge.
pub struct ServeConfig {
    /// The socket address (IP and port) the server will bind to. Overrides
    /// `config.server.listen_address` when set.
    pub listen_address: Option<SocketAddr>,
    /// The deserialized ClipForge TOML configuration.
    pub config: Config,
    /// Cancellation token for graceful shutdown.
    pub shutdown_signal: CancellationToken,
    /// The version string to log on startup.
    pub version: String,
    /// Optional oneshot sender to send back the bound address (useful if port 0 was
    /// specified).
    pub bound_addr_sender: Option<tokio::sync::oneshot::Sender<SocketAddr>>,
}

/// Starts and runs the ClipForge server with the provided configuration.
pub async fn serve(
    ServeConfig { listen_address, config, shutdown_signal, version, bound_addr_sender }: ServeConfig,
) -> anyhow::Result<()> {
    log::info!("ClipForge {version}");

    let listen_address = match listen_address {
        Some(address) => address,
        None => SocketAddr::from_str(&config.server.listen_address)
            .map_err(|err| anyhow!("invalid listen address {}: {err}", config.server.listen_address))?,
    };

    let state = Arc::new(state::AppState::new(config)?);

    let app = Router::new()
        .merge(routes::router())
        .layer(middleware::from_fn_with_state(Arc::clone(&state), auth::require_api_key))
        .layer(tower::ServiceBuilder::new().layer(CorsLayer::permissive()).layer(TraceLayer::new_for_http()))
        .with_state(state);

    let listener = TcpListener::bind(listen_address).await.map_err(|err| anyhow!("failed to bind to {listen_address}: {err}"))?;

    if let Some(sender) = bound_addr_sender {
        sender.send(listener.local_addr()?).expect("failed to send back bound address");
    }

    log::info!("listening on http://{listen_address}");

    tokio::select! {
        result = axum::serve(listener, app.into_make_service()) => {
            result.map_err(|err| anyhow!("server error: {err}"))?;
        }
        _ = shutdown_signal.cancelled() => {
            log::info!("received shutdown signal, shutting down gracefully...");
        }
    }

    Ok(())
}
