//! Brain knowledge-base endpoints: source CRUD, search, and the three generation
//! modes (vision, full-AI, hybrid).

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{delete, get, patch, post};
use axum::{Json, Router};
use brain::{ComposeRequest, SearchFilter, compose, decide_auto_count, index, search};
use model::{BrainMode, BrainSession, ClipForgeError, ContentArtifact, ContentIdea, HybridStrategy, Result, Source, SourceKind};
use serde::{Deserialize, Serialize};

use crate::generation::generate_for_source;
use crate::routes::style_input::{CustomStyleBody, resolve_style};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/brain/sources/", post(create_source).get(list_sources))
        .route("/brain/sources/{id}", get(get_source).patch(patch_source).delete(delete_source))
        .route("/brain/search", post(search_sources))
        .route("/brain/generate/vision", post(generate_vision))
        .route("/brain/generate/auto", post(generate_auto))
        .route("/brain/generate/hybrid", post(generate_hybrid))
}

// --- Source CRUD ---

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct CreateSourceRequest {
    kind: SourceKind,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    video_id: Option<String>,
}

async fn create_source(State(state): State<Arc<AppState>>, Json(request): Json<CreateSourceRequest>) -> Result<Json<Source>> {
    let id = uuid::Uuid::new_v4().to_string();

    let source = match request.kind {
        SourceKind::Raw => {
            let text = request.text.ok_or_else(|| ClipForgeError::TextTooShort(0))?;
            let title = request.title.unwrap_or_else(|| id.clone());
            Source::new(&id, SourceKind::Raw, title, text).ok_or(ClipForgeError::TextTooShort(0))?
        }
        SourceKind::Url => {
            let url = request.url.ok_or_else(|| ClipForgeError::InvalidUrl("missing url".to_string()))?;
            let extracted = documents::extract_url(&state.http_client, &url).await?;
            let title = request.title.or_else(|| extracted.metadata.get("title").cloned()).unwrap_or_else(|| url.clone());
            Source::new(&id, SourceKind::Url, title, extracted.markdown).ok_or(ClipForgeError::TextTooShort(0))?
        }
        SourceKind::Video => {
            let video_id = request.video_id.ok_or_else(|| ClipForgeError::InvalidVideoId("missing video-id".to_string()))?;
            crate::video_id::validate(&video_id)?;
            let result = state.transcripts.get_english(&video_id, &transcripts::Preferences::default()).await?;
            let title = request.title.unwrap_or_else(|| video_id.clone());
            Source::new(&video_id, SourceKind::Video, title, result.text).ok_or(ClipForgeError::TextTooShort(0))?
        }
        SourceKind::Document => return Err(ClipForgeError::UnsupportedFormat("document sources are created via process-document".to_string())),
    };

    let indexed = index(&state.llm, source).await?;
    state.repo.put_source(indexed.clone()).await;

    Ok(Json(indexed))
}

async fn list_sources(State(state): State<Arc<AppState>>) -> Json<Vec<Source>> {
    Json(state.repo.list_sources().await)
}

async fn get_source(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> Result<Json<Source>> {
    state.repo.get_source(&id).await.map(Json).ok_or_else(|| ClipForgeError::SourceNotFound(id))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct PatchSourceRequest {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    tags: Option<Vec<String>>,
}

async fn patch_source(State(state): State<Arc<AppState>>, Path(id): Path<String>, Json(request): Json<PatchSourceRequest>) -> Result<Json<Source>> {
    let mut source = state.repo.get_source(&id).await.ok_or_else(|| ClipForgeError::SourceNotFound(id.clone()))?;

    if let Some(title) = request.title {
        source.title = title;
    }
    if let Some(tags) = request.tags {
        source.tags = tags;
    }

    state.repo.put_source(source.clone()).await;
    Ok(Json(source))
}

async fn delete_source(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> Result<()> {
    if state.repo.delete_source(&id).await { Ok(()) } else { Err(ClipForgeError::SourceNotFound(id)) }
}

// --- Search ---

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
struct SearchFilters {
    #[serde(default)]
    source_kind: Option<SourceKind>,
    #[serde(default)]
    min_score: Option<f32>,
    #[serde(default)]
    limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct SearchRequest {
    query: String,
    #[serde(default)]
    filters: SearchFilters,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
struct SearchResultBody {
    source_id: String,
    score: f32,
    snippet: String,
}

async fn search_sources(State(state): State<Arc<AppState>>, Json(request): Json<SearchRequest>) -> Json<Vec<SearchResultBody>> {
    let defaults = SearchFilter::default();
    let filter = SearchFilter {
        source_kind: request.filters.source_kind,
        min_score: request.filters.min_score.unwrap_or(defaults.min_score),
        limit: request.filters.limit.unwrap_or(defaults.limit),
    };

    let candidates = state.repo.list_sources().await;
    let results = search(&candidates, &request.query, &filter);

    Json(results.into_iter().map(|r| SearchResultBody { source_id: r.source_id, score: r.score, snippet: r.snippet }).collect())
}

// --- Generation ---

#[derive(Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
struct BrainGenerateResponse {
    session_id: String,
    mode: BrainMode,
    primary_source_ids: Vec<String>,
    supporting_source_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    chosen_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rationale: Option<String>,
    ideas: Vec<ContentIdea>,
    content_pieces: Vec<ContentArtifact>,
}

async fn run_compose_and_generate(state: &AppState, request: ComposeRequest, style_preset: Option<&str>, custom_style: Option<CustomStyleBody>) -> Result<BrainGenerateResponse> {
    let (style, base_limits) = resolve_style(state, style_preset, custom_style)?;
    let candidates = state.repo.list_sources().await;
    let mut composed = compose(&candidates, request, &base_limits)?;

    let mut session = composed.session;
    session.status = model::SessionStatus::Generating;

    if session.mode == BrainMode::AutoAuto {
        let (count, rationale) = decide_auto_count(&state.llm, &composed.source_text, &composed.limits).await?;
        composed.limits.min_ideas = count;
        composed.limits.max_ideas = count;
        session.chosen_count = Some(count);
        session.rationale = Some(rationale);
    }

    let outcome = generate_for_source(state, None, &session.id, &composed.source_text, &style, &composed.limits).await?;

    session.generated_content_ids = outcome.artifacts.iter().map(|a| a.content_id().to_string()).collect();
    session.status = model::SessionStatus::Complete;
    state.repo.put_session(session.clone()).await;

    Ok(BrainGenerateResponse {
        session_id: session.id,
        mode: session.mode,
        primary_source_ids: composed.primary_source_ids,
        supporting_source_ids: composed.supporting_source_ids,
        chosen_count: session.chosen_count,
        rationale: session.rationale,
        ideas: outcome.ideas,
        content_pieces: outcome.artifacts,
    })
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct VisionRequest {
    vision: String,
    #[serde(default)]
    style_preset: Option<String>,
    #[serde(default)]
    custom_style: Option<CustomStyleBody>,
}

async fn generate_vision(State(state): State<Arc<AppState>>, Json(request): Json<VisionRequest>) -> Result<Json<BrainGenerateResponse>> {
    let compose_request = ComposeRequest::Vision { vision: request.vision };
    let response = run_compose_and_generate(&state, compose_request, request.style_preset.as_deref(), request.custom_style).await?;
    Ok(Json(response))
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
enum AutoMode {
    Single,
    Multiple,
    Auto,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct AutoRequest {
    source_ids: Vec<String>,
    mode: AutoMode,
    #[serde(default)]
    count: Option<u32>,
    #[serde(default)]
    style_preset: Option<String>,
    #[serde(default)]
    custom_style: Option<CustomStyleBody>,
}

async fn generate_auto(State(state): State<Arc<AppState>>, Json(request): Json<AutoRequest>) -> Result<Json<BrainGenerateResponse>> {
    let compose_request = match request.mode {
        AutoMode::Single => ComposeRequest::Single { source_ids: request.source_ids },
        AutoMode::Multiple => {
            let count = request.count.ok_or_else(|| ClipForgeError::InvalidFieldLimit("count is required for mode=multiple".to_string()))?;
            ComposeRequest::Multiple { source_ids: request.source_ids, count }
        }
        AutoMode::Auto => ComposeRequest::Auto { source_ids: request.source_ids },
    };

    let response = run_compose_and_generate(&state, compose_request, request.style_preset.as_deref(), request.custom_style).await?;
    Ok(Json(response))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct AiAugmentBody {
    strategy: HybridStrategy,
    #[serde(default)]
    hint: Option<String>,
    #[serde(default)]
    target_count: Option<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct HybridRequest {
    user_source_ids: Vec<String>,
    ai_augment: AiAugmentBody,
    #[serde(default)]
    style_preset: Option<String>,
    #[serde(default)]
    custom_style: Option<CustomStyleBody>,
}

async fn generate_hybrid(State(state): State<Arc<AppState>>, Json(request): Json<HybridRequest>) -> Result<Json<BrainGenerateResponse>> {
    let compose_request = ComposeRequest::Hybrid {
        source_ids: request.user_source_ids,
        strategy: request.ai_augment.strategy,
        hint_query: request.ai_augment.hint,
        fill_target: request.ai_augment.target_count,
    };

    let response = run_compose_and_generate(&state, compose_request, request.style_preset.as_deref(), request.custom_style).await?;
    Ok(Json(response))
}
