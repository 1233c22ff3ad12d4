//! Style registry and field-limits inspection endpoints.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::{Json, Router, routing::get};
use config::{FieldLimits, StyleBlock};
use model::{ClipForgeError, Result};

use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/content-styles/presets/", get(list_presets))
        .route("/content-styles/presets/{name}", get(get_preset))
        .route("/content-config/default", get(default_config))
        .route("/content-config/current", get(current_config))
}

async fn list_presets(State(state): State<Arc<AppState>>) -> Json<Vec<&'static str>> {
    Json(state.style_registry.preset_names())
}

async fn get_preset(State(state): State<Arc<AppState>>, Path(name): Path<String>) -> Result<Json<StyleBlock>> {
    state.style_registry.get(&name).map(|style| Json(style.clone())).map_err(|_| ClipForgeError::InvalidPreset(name))
}

async fn default_config() -> Json<FieldLimits> {
    Json(FieldLimits::default())
}

async fn current_config(State(state): State<Arc<AppState>>) -> Json<FieldLimits> {
    Json(state.config.field_limits)
}
