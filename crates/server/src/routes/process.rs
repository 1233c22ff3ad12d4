//! Generation endpoints: `/process-video/`, `/process-video-stream/`,
//! `/process-videos-bulk/`, `/process-document/`, `/process-document-stream/`.

use std::path::Path;
use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::{Json, Router, routing::post};
use brain::index;
use config::{FieldLimits, StyleBlock};
use model::{ClipForgeError, ContentArtifact, ContentIdea, Result, Source, SourceKind, Stage};
use progress::TaskContext;
use serde::{Deserialize, Serialize};
use transcripts::Preferences;

use crate::generation::generate_for_source;
use crate::routes::style_input::{CustomStyleBody, resolve_style};
use crate::sse;
use crate::state::AppState;
use crate::video_id;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/process-video/", post(process_video))
        .route("/process-video-stream/", post(process_video_stream))
        .route("/process-videos-bulk/", post(process_videos_bulk))
        .route("/process-document/", post(process_document))
        .route("/process-document-stream/", post(process_document_stream))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct ProcessVideoRequest {
    video_id: String,
    #[serde(default)]
    force_regenerate: bool,
    #[serde(default)]
    style_preset: Option<String>,
    #[serde(default)]
    custom_style: Option<CustomStyleBody>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
struct ProcessVideoResponse {
    id: String,
    video_id: String,
    title: String,
    transcript: String,
    status: &'static str,
    ideas: Vec<ContentIdea>,
    content_pieces: Vec<ContentArtifact>,
}

async fn process_video(State(state): State<Arc<AppState>>, Json(request): Json<ProcessVideoRequest>) -> Result<Json<ProcessVideoResponse>> {
    let (style, limits) = resolve_style(&state, request.style_preset.as_deref(), request.custom_style)?;
    let response = process_video_core(&state, None, &request.video_id, request.force_regenerate, &style, &limits).await?;
    Ok(Json(response))
}

async fn process_video_stream(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ProcessVideoRequest>,
) -> Result<axum::response::Response> {
    let (style, limits) = resolve_style(&state, request.style_preset.as_deref(), request.custom_style)?;
    video_id::validate(&request.video_id)?;

    let video_id = request.video_id.clone();
    let force_regenerate = request.force_regenerate;
    let state_for_task = Arc::clone(&state);

    let task_id = state
        .task_manager
        .spawn(move |task| async move {
            run_and_report(&task, process_video_core(&state_for_task, Some(&task), &video_id, force_regenerate, &style, &limits)).await;
        })
        .await;

    use axum::response::IntoResponse;
    Ok(sse::stream_task(state.task_manager.store(), task_id).await.into_response())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct ProcessVideosBulkRequest {
    video_ids: Vec<String>,
    #[serde(default)]
    force_regenerate: bool,
    #[serde(default)]
    style_preset: Option<String>,
    #[serde(default)]
    custom_style: Option<CustomStyleBody>,
}

#[derive(Debug, Serialize)]
struct ErrorInfo {
    kind: &'static str,
    message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
struct BulkResultEntry {
    video_id: String,
    result: Option<ProcessVideoResponse>,
    error: Option<ErrorInfo>,
}

async fn process_videos_bulk(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ProcessVideosBulkRequest>,
) -> Result<Json<Vec<BulkResultEntry>>> {
    let (style, limits) = resolve_style(&state, request.style_preset.as_deref(), request.custom_style)?;

    let mut results = Vec::with_capacity(request.video_ids.len());
    for video_id in request.video_ids {
        match process_video_core(&state, None, &video_id, request.force_regenerate, &style, &limits).await {
            Ok(response) => results.push(BulkResultEntry { video_id, result: Some(response), error: None }),
            Err(err) => results.push(BulkResultEntry { video_id, result: None, error: Some(ErrorInfo { kind: err.kind(), message: err.to_string() }) }),
        }
    }

    Ok(Json(results))
}

async fn process_video_core(
    state: &AppState,
    task: Option<&TaskContext>,
    video_id_str: &str,
    force_regenerate: bool,
    style: &StyleBlock,
    limits: &FieldLimits,
) -> Result<ProcessVideoResponse> {
    video_id::validate(video_id_str)?;

    if let Some(task) = task {
        task.report(Stage::Started, "started").await;
    }

    if !force_regenerate {
        if let Some(existing) = state.repo.get_source(video_id_str).await {
            let artifacts = state.repo.list_artifacts_for_source(video_id_str).await;
            if !artifacts.is_empty() {
                if let Some(task) = task {
                    task.report(Stage::FoundExisting, "found existing content").await;
                }
                return Ok(ProcessVideoResponse {
                    id: video_id_str.to_string(),
                    video_id: video_id_str.to_string(),
                    title: existing.title,
                    transcript: existing.text,
                    status: "complete",
                    ideas: Vec::new(),
                    content_pieces: artifacts,
                });
            }
        }
    }

    if let Some(task) = task {
        task.report(Stage::FetchingInfo, "fetching video info").await;
        task.report(Stage::Transcribing, "acquiring transcript").await;
    }

    let transcript = state.transcripts.get_english(video_id_str, &Preferences::default()).await?;

    if let Some(task) = task {
        task.report(Stage::TranscriptReady, "transcript ready").await;
    }

    let source = Source::new(video_id_str, SourceKind::Video, video_id_str, transcript.text.clone())
        .ok_or_else(|| ClipForgeError::TextTooShort(transcript.text.trim().chars().count()))?;
    let source = index(&state.llm, source).await?;
    state.repo.put_source(source.clone()).await;

    let outcome = generate_for_source(state, task, video_id_str, &transcript.text, style, limits).await?;

    if let Some(task) = task {
        task.report(Stage::Finalizing, "finalizing").await;
    }

    Ok(ProcessVideoResponse {
        id: video_id_str.to_string(),
        video_id: video_id_str.to_string(),
        title: source.title,
        transcript: source.text,
        status: "complete",
        ideas: outcome.ideas,
        content_pieces: outcome.artifacts,
    })
}

async fn process_document(State(state): State<Arc<AppState>>, multipart: Multipart) -> Result<Json<ProcessVideoResponse>> {
    let (file_name, bytes, style_preset, custom_style) = read_document_multipart(multipart).await?;
    let (style, limits) = resolve_style(&state, style_preset.as_deref(), custom_style)?;
    let response = process_document_core(&state, None, &file_name, &bytes, &style, &limits).await?;
    Ok(Json(response))
}

async fn process_document_stream(State(state): State<Arc<AppState>>, multipart: Multipart) -> Result<axum::response::Response> {
    let (file_name, bytes, style_preset, custom_style) = read_document_multipart(multipart).await?;
    let (style, limits) = resolve_style(&state, style_preset.as_deref(), custom_style)?;

    let state_for_task = Arc::clone(&state);
    let task_id = state
        .task_manager
        .spawn(move |task| async move {
            run_and_report(&task, process_document_core(&state_for_task, Some(&task), &file_name, &bytes, &style, &limits)).await;
        })
        .await;

    use axum::response::IntoResponse;
    Ok(sse::stream_task(state.task_manager.store(), task_id).await.into_response())
}

async fn read_document_multipart(mut multipart: Multipart) -> Result<(String, Vec<u8>, Option<String>, Option<CustomStyleBody>)> {
    let mut file_name = None;
    let mut bytes = None;
    let mut style_preset = None;
    let mut custom_style = None;

    while let Some(field) = multipart.next_field().await.map_err(|err| ClipForgeError::UnsupportedFormat(err.to_string()))? {
        let field_name = field.name().unwrap_or_default().to_string();
        match field_name.as_str() {
            "file" => {
                file_name = field.file_name().map(str::to_string);
                bytes = Some(field.bytes().await.map_err(|err| ClipForgeError::UnsupportedFormat(err.to_string()))?.to_vec());
            }
            "style-preset" => {
                style_preset = Some(field.text().await.map_err(|err| ClipForgeError::UnsupportedFormat(err.to_string()))?);
            }
            "custom-style" => {
                let text = field.text().await.map_err(|err| ClipForgeError::UnsupportedFormat(err.to_string()))?;
                custom_style = Some(serde_json::from_str(&text).map_err(|err| ClipForgeError::UnsupportedFormat(err.to_string()))?);
            }
            _ => {}
        }
    }

    let file_name = file_name.ok_or_else(|| ClipForgeError::UnsupportedFormat("no file field in multipart request".to_string()))?;
    let bytes = bytes.ok_or_else(|| ClipForgeError::UnsupportedFormat("no file field in multipart request".to_string()))?;

    Ok((file_name, bytes, style_preset, custom_style))
}

async fn process_document_core(
    state: &AppState,
    task: Option<&TaskContext>,
    file_name: &str,
    bytes: &[u8],
    style: &StyleBlock,
    limits: &FieldLimits,
) -> Result<ProcessVideoResponse> {
    if let Some(task) = task {
        task.report(Stage::Started, "started").await;
        task.report(Stage::Uploading, "receiving document").await;
        task.report(Stage::Parsing, "parsing document").await;
    }

    let extracted = documents::extract_file(Path::new(file_name), bytes)?;

    if let Some(task) = task {
        task.report(Stage::TextExtracted, "text extracted").await;
    }

    let source_id = uuid::Uuid::new_v4().to_string();
    let source = Source::new(&source_id, SourceKind::Document, &extracted.detected_title, extracted.text.clone())
        .ok_or_else(|| ClipForgeError::TextTooShort(extracted.text.trim().chars().count()))?;
    let source = index(&state.llm, source).await?;
    state.repo.put_source(source.clone()).await;

    let outcome = generate_for_source(state, task, &source_id, &extracted.text, style, limits).await?;

    if let Some(task) = task {
        task.report(Stage::Finalizing, "finalizing").await;
    }

    Ok(ProcessVideoResponse {
        id: source_id.clone(),
        video_id: source_id,
        title: source.title,
        transcript: source.text,
        status: "complete",
        ideas: outcome.ideas,
        content_pieces: outcome.artifacts,
    })
}

async fn run_and_report<T: Serialize>(task: &TaskContext, result: impl std::future::Future<Output = Result<T>>) {
    match result.await {
        Ok(value) => {
            let payload = serde_json::to_value(value).ok();
            task.report_detailed(Stage::Complete, 100, "complete", payload).await;
        }
        Err(err) => {
            let payload = serde_json::json!({ "kind": err.kind(), "message": err.to_string() });
            task.report_detailed(Stage::Error, 100, err.to_string(), Some(payload)).await;
        }
    }
}
