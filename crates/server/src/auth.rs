use std::sync::Arc;

use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;
use model::ClipForgeError;

use crate::state::AppState;

const API_KEY_HEADER: &str = "x-api-key";

/// When `config.server.api_key` is set, reject any request whose `X-Api-Key` header
/// does not match. When unset, every request passes through unauthenticated.
pub async fn require_api_key(State(state): State<Arc<AppState>>, request: Request<axum::body::Body>, next: Next) -> Response {
    let Some(expected) = state.config.server.api_key.as_deref() else {
        return next.run(request).await;
    };

    let provided = request.headers().get(API_KEY_HEADER).and_then(|value| value.to_str().ok());

    match provided {
        Some(key) if key == expected => next.run(request).await,
        _ => {
            use axum::response::IntoResponse;
            ClipForgeError::Unauthorized("missing or invalid X-Api-Key header".to_string()).into_response()
        }
    }
}
