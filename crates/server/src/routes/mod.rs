//! All HTTP route groups, merged into one router by [`router`].

mod brain;
mod config_routes;
mod editing;
mod ingestion;
mod process;
pub(crate) mod style_input;

use std::sync::Arc;

use axum::Router;

use crate::state::AppState;

/// Build the full application router: ingestion, generation, brain, editing, and
/// configuration endpoints merged together.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .merge(ingestion::router())
        .merge(process::router())
        .merge(brain::router())
        .merge(editing::router())
        .merge(config_routes::router())
}
