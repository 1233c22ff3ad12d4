//! `POST /edit-content/`: apply a natural-language edit instruction to an existing
//! content artifact.

use std::sync::Arc;

use axum::extract::State;
use axum::{Json, Router, routing::post};
use content_engine::edit;
use model::{ClipForgeError, ContentArtifact, Result};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/edit-content/", post(edit_content))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct EditContentRequest {
    #[serde(default)]
    source_id: Option<String>,
    content_piece_id: String,
    edit_prompt: String,
    #[serde(default)]
    content_type: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
struct EditContentResponse {
    success: bool,
    original: ContentArtifact,
    edited: ContentArtifact,
    changes: Vec<String>,
}

async fn edit_content(State(state): State<Arc<AppState>>, Json(request): Json<EditContentRequest>) -> Result<Json<EditContentResponse>> {
    let current = state
        .repo
        .get_artifact(&request.content_piece_id)
        .await
        .ok_or_else(|| ClipForgeError::ValidationFailed(format!("no content piece with id {}", request.content_piece_id)))?;

    if let Some(source_id) = &request.source_id {
        let prefix = format!("{source_id}_");
        if !current.content_id().starts_with(&prefix) {
            return Err(ClipForgeError::ValidationFailed(format!("content piece {} does not belong to source {source_id}", request.content_piece_id)));
        }
    }

    let outcome = edit(&state.llm, current, &state.config.field_limits, &request.edit_prompt).await?;
    state.repo.put_artifact(outcome.after.clone()).await;

    Ok(Json(EditContentResponse { success: true, original: outcome.before, edited: outcome.after, changes: outcome.changes }))
}
