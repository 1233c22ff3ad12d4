use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// The full ClipForge error taxonomy, carrying a stable kind tag (via [`ClipForgeError::kind`])
/// and a human message (via `Display`/`ToString`).
#[derive(Debug, Error)]
pub enum ClipForgeError {
    // --- Input errors (4xx) ---
    /// A YouTube video id was not an 11-character well-formed id.
    #[error("invalid video id: {0}")]
    InvalidVideoId(String),
    /// A supplied URL could not be parsed or was disallowed (private network, etc.).
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    /// An uploaded document had an unsupported file extension.
    #[error("unsupported document format: {0}")]
    UnsupportedFormat(String),
    /// An unknown style preset name was requested.
    #[error("unknown style preset: {0}")]
    InvalidPreset(String),
    /// A field-limits override violated an invariant (min<=max, tweet cap, etc.).
    #[error("invalid field limit: {0}")]
    InvalidFieldLimit(String),
    /// Extracted/supplied text was shorter than the minimum of 50 characters.
    #[error("text too short: {0} characters, minimum 50")]
    TextTooShort(usize),

    // --- Acquisition errors ---
    /// The video has captions disabled entirely.
    #[error("transcripts are disabled for this video")]
    TranscriptsDisabled,
    /// No usable transcript track was found.
    #[error("no transcript found for this video")]
    NoTranscriptFound,
    /// The video does not exist or is private/removed.
    #[error("video unavailable")]
    VideoUnavailable,
    /// Machine translation of a transcript failed.
    #[error("translation failed: {0}")]
    TranslationFailed(String),
    /// Fetching a URL's HTML failed (network error, timeout, non-2xx).
    #[error("failed to fetch url: {0}")]
    UrlFetchFailed(String),
    /// A URL fetch succeeded but yielded no extractable text.
    #[error("url yielded no extractable text")]
    UrlEmptyExtraction,
    /// A PDF had no text layer (image-only / scanned).
    #[error("pdf has no extractable text layer")]
    PdfNoText,

    // --- Generation errors ---
    /// Ideation produced zero valid ideas after the repair attempt.
    #[error("ideation failed: no valid ideas produced")]
    IdeationFailed,
    /// Materialization produced zero surviving artifacts across all types.
    #[error("materialization produced no artifacts")]
    MaterializationEmpty,
    /// The LLM rate limit was exceeded even after the retry budget.
    #[error("llm rate limited after retries")]
    LlmRateLimited,
    /// An LLM call exceeded its soft timeout.
    #[error("llm call timed out")]
    LlmTimeout,
    /// An LLM response could not be parsed as JSON.
    #[error("llm response was not valid json: {0}")]
    LlmParseFailed(String),

    // --- Persistence errors ---
    /// The repository backend is unreachable.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
    /// An attempted create collided with an existing identity.
    #[error("conflict: {0}")]
    Conflict(String),
    /// A referenced source id does not exist.
    #[error("source not found: {0}")]
    SourceNotFound(String),

    // --- Task errors ---
    /// No task exists with the given id (or it was already cleaned up).
    #[error("task not found: {0}")]
    TaskNotFound(String),
    /// The task was cancelled before completion.
    #[error("task cancelled")]
    TaskCancelled,
    /// The task exceeded its 5 minute ceiling.
    #[error("task timed out")]
    TaskTimeout,

    // --- Validation/editor errors ---
    /// A generated or edited artifact failed schema/length validation after all repairs.
    #[error("validation failed: {0}")]
    ValidationFailed(String),

    // --- Auth errors ---
    /// The request's `X-Api-Key` header was missing or did not match.
    #[error("unauthorized: {0}")]
    Unauthorized(String),
}

impl ClipForgeError {
    /// Stable, kebab-case error kind tag matching `spec.md`'s error taxonomy names.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidVideoId(_) => "invalid-video-id",
            Self::InvalidUrl(_) => "invalid-url",
            Self::UnsupportedFormat(_) => "unsupported-format",
            Self::InvalidPreset(_) => "invalid-preset",
            Self::InvalidFieldLimit(_) => "invalid-field-limit",
            Self::TextTooShort(_) => "text-too-short",
            Self::TranscriptsDisabled => "transcripts-disabled",
            Self::NoTranscriptFound => "no-transcript-found",
            Self::VideoUnavailable => "video-unavailable",
            Self::TranslationFailed(_) => "translation-failed",
            Self::UrlFetchFailed(_) => "url-fetch-failed",
            Self::UrlEmptyExtraction => "url-empty-extraction",
            Self::PdfNoText => "pdf-no-text",
            Self::IdeationFailed => "ideation-failed",
            Self::MaterializationEmpty => "materialization-empty",
            Self::LlmRateLimited => "llm-rate-limited",
            Self::LlmTimeout => "llm-timeout",
            Self::LlmParseFailed(_) => "llm-parse-failed",
            Self::StorageUnavailable(_) => "storage-unavailable",
            Self::Conflict(_) => "conflict",
            Self::SourceNotFound(_) => "source-not-found",
            Self::TaskNotFound(_) => "task-not-found",
            Self::TaskCancelled => "task-cancelled",
            Self::TaskTimeout => "task-timeout",
            Self::ValidationFailed(_) => "validation-failed",
            Self::Unauthorized(_) => "unauthorized",
        }
    }

    /// The conventional HTTP status code for this error kind.
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::InvalidVideoId(_)
            | Self::InvalidUrl(_)
            | Self::UnsupportedFormat(_)
            | Self::InvalidPreset(_)
            | Self::InvalidFieldLimit(_)
            | Self::TextTooShort(_)
            | Self::ValidationFailed(_) => StatusCode::BAD_REQUEST,
            Self::TaskNotFound(_) | Self::SourceNotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::LlmRateLimited => StatusCode::TOO_MANY_REQUESTS,
            Self::LlmTimeout | Self::TaskTimeout => StatusCode::GATEWAY_TIMEOUT,
            Self::TranscriptsDisabled
            | Self::NoTranscriptFound
            | Self::VideoUnavailable
            | Self::TranslationFailed(_)
            | Self::UrlFetchFailed(_)
            | Self::UrlEmptyExtraction
            | Self::PdfNoText
            | Self::IdeationFailed
            | Self::MaterializationEmpty
            | Self::LlmParseFailed(_)
            | Self::TaskCancelled => StatusCode::UNPROCESSABLE_ENTITY,
            Self::StorageUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: ErrorDetails,
}

#[derive(Debug, Serialize)]
struct ErrorDetails {
    kind: &'static str,
    message: String,
}

impl IntoResponse for ClipForgeError {
    fn into_response(self) -> Response {
        let status = self.http_status();
        let body = ErrorBody {
            error: ErrorDetails {
                kind: self.kind(),
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_is_stable_kebab_case() {
        assert_eq!(ClipForgeError::TextTooShort(12).kind(), "text-too-short");
        assert_eq!(ClipForgeError::IdeationFailed.kind(), "ideation-failed");
    }

    #[test]
    fn rate_limit_maps_to_429() {
        assert_eq!(ClipForgeError::LlmRateLimited.http_status(), StatusCode::TOO_MANY_REQUESTS);
    }
}
