//! Transcript acquisition endpoints: `/transcribe/`, `/transcribe-enhanced/`, and
//! `/analyze-transcripts/{video-id}`.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::{Json, routing::get, routing::post, Router};
use model::{Result, TranscriptPriority};
use serde::{Deserialize, Serialize};
use transcripts::Preferences;

use crate::state::AppState;
use crate::video_id;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/transcribe/", post(transcribe))
        .route("/transcribe-enhanced/", post(transcribe_enhanced))
        .route("/analyze-transcripts/{video_id}", get(analyze_transcripts))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct TranscribeRequest {
    video_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
struct TranscribeResponse {
    video_id: String,
    title: String,
    transcript: String,
    status: &'static str,
}

async fn transcribe(State(state): State<Arc<AppState>>, Json(request): Json<TranscribeRequest>) -> Result<Json<TranscribeResponse>> {
    video_id::validate(&request.video_id)?;

    let result = state.transcripts.get_english(&request.video_id, &Preferences::default()).await?;

    Ok(Json(TranscribeResponse {
        video_id: request.video_id.clone(),
        title: request.video_id,
        transcript: result.text,
        status: "complete",
    }))
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
struct PreferencesBody {
    #[serde(default)]
    prefer_manual: Option<bool>,
    #[serde(default)]
    require_english: Option<bool>,
    #[serde(default)]
    enable_translation: Option<bool>,
    #[serde(default)]
    fallback_languages: Option<Vec<String>>,
}

impl PreferencesBody {
    fn resolve(self) -> Preferences {
        let defaults = Preferences::default();
        Preferences {
            prefer_manual: self.prefer_manual.unwrap_or(defaults.prefer_manual),
            require_english: self.require_english.unwrap_or(defaults.require_english),
            enable_translation: self.enable_translation.unwrap_or(defaults.enable_translation),
            fallback_languages: self.fallback_languages.unwrap_or(defaults.fallback_languages),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct TranscribeEnhancedRequest {
    video_id: String,
    #[serde(default)]
    preferences: PreferencesBody,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
struct TranscribeEnhancedResponse {
    video_id: String,
    title: String,
    transcript: String,
    status: &'static str,
    language: String,
    generated_flag: bool,
    translated_flag: bool,
    priority: TranscriptPriority,
    confidence: f32,
    source_language: Option<String>,
    processing_notes: Vec<String>,
    available_languages: Vec<String>,
}

async fn transcribe_enhanced(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TranscribeEnhancedRequest>,
) -> Result<Json<TranscribeEnhancedResponse>> {
    video_id::validate(&request.video_id)?;

    let preferences = request.preferences.resolve();
    let available = state.transcripts.list_available(&request.video_id).await?;
    let result = state.transcripts.get_english(&request.video_id, &preferences).await?;

    let generated_flag = matches!(result.priority, TranscriptPriority::AutoEnglish | TranscriptPriority::AutoTranslated);
    let translated_flag = result.source_language.is_some();

    Ok(Json(TranscribeEnhancedResponse {
        video_id: request.video_id.clone(),
        title: request.video_id,
        transcript: result.text,
        status: "complete",
        language: result.language,
        generated_flag,
        translated_flag,
        priority: result.priority,
        confidence: result.confidence,
        source_language: result.source_language,
        processing_notes: result.processing_notes,
        available_languages: available.into_iter().map(|d| d.language_code).collect(),
    }))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
struct AnalyzeTranscriptsResponse {
    available_languages: Vec<String>,
    recommended_approach: &'static str,
}

async fn analyze_transcripts(State(state): State<Arc<AppState>>, Path(video_id): Path<String>) -> Result<Json<AnalyzeTranscriptsResponse>> {
    video_id::validate(&video_id)?;

    let available = state.transcripts.list_available(&video_id).await?;
    let has_manual_english = available.iter().any(|d| d.language_code == "en" && matches!(d.variant, model::TranscriptVariant::Manual));
    let has_auto_english = available.iter().any(|d| d.language_code == "en" && matches!(d.variant, model::TranscriptVariant::AutoGenerated));

    let recommended_approach = if has_manual_english {
        "manual-english"
    } else if has_auto_english {
        "auto-english"
    } else if available.iter().any(|d| d.is_translatable) {
        "translate"
    } else {
        "unavailable"
    };

    Ok(Json(AnalyzeTranscriptsResponse {
        available_languages: available.into_iter().map(|d| d.language_code).collect(),
        recommended_approach,
    }))
}
