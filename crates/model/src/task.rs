use serde::{Deserialize, Serialize};

/// A stage in the processing pipeline's lifecycle, in the order a single task visits
/// them (video/document path). `Error` and `Cancelled` may be reached from any
/// non-terminal stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Task created, not yet started.
    Queued,
    /// Worker picked up the task.
    Started,
    /// A cached/previously generated result was found (fast path).
    FoundExisting,
    /// Fetching source metadata (e.g. video title).
    FetchingInfo,
    /// Acquiring a transcript.
    Transcribing,
    /// Transcript acquired.
    TranscriptReady,
    /// Receiving an uploaded document.
    Uploading,
    /// Parsing a document or URL.
    Parsing,
    /// Document/URL text extracted.
    TextExtracted,
    /// Running the ideation + materialization engines.
    GeneratingContent,
    /// Ideation finished.
    IdeasGenerated,
    /// Materialization in progress.
    CreatingContent,
    /// Materialization finished.
    ContentGenerated,
    /// Persisting results.
    Finalizing,
    /// Terminal: succeeded.
    Complete,
    /// Terminal: failed.
    Error,
    /// Terminal: cancelled by caller.
    Cancelled,
    /// Terminal: exceeded the 5 minute generation ceiling.
    TimedOut,
}

impl Stage {
    /// A representative progress percentage for this stage, used when a caller
    /// transitions to a stage without specifying its own progress value.
    pub fn default_progress(self) -> u8 {
        match self {
            Self::Queued => 0,
            Self::Started => 5,
            Self::FoundExisting => 8,
            Self::FetchingInfo => 10,
            Self::Transcribing | Self::Parsing => 30,
            Self::TranscriptReady | Self::TextExtracted => 50,
            Self::Uploading => 15,
            Self::GeneratingContent => 60,
            Self::IdeasGenerated => 75,
            Self::CreatingContent => 80,
            Self::ContentGenerated => 90,
            Self::Finalizing => 95,
            Self::Complete => 100,
            Self::Error | Self::Cancelled | Self::TimedOut => 100,
        }
    }

    /// Whether this stage ends the task's timeline.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Complete | Self::Error | Self::Cancelled | Self::TimedOut)
    }
}

/// Why a task stopped, once it reaches a terminal [`Stage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskOutcome {
    /// Completed successfully.
    Complete,
    /// Failed; see the task's `error_kind`/`error_message`.
    Error,
    /// Cancelled by the caller.
    Cancelled,
    /// Exceeded the 5 minute generation ceiling.
    TimedOut,
}

/// A single background generation task tracked by the Task Manager.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingTask {
    /// Task identifier.
    pub id: String,
    /// The source this task is processing, if known yet.
    pub source_ref: Option<String>,
    /// Current stage.
    pub stage: Stage,
    /// Progress in `[0, 100]`.
    pub progress: u8,
    /// Most recent human-readable message.
    pub message: String,
    /// When the task was created.
    pub started_at: jiff::Timestamp,
    /// When the task reached a terminal stage, if it has.
    pub ended_at: Option<jiff::Timestamp>,
    /// Terminal outcome, once reached.
    pub outcome: Option<TaskOutcome>,
    /// Result payload (serialized generation result), once `outcome` is `Complete`.
    pub result: Option<serde_json::Value>,
    /// Stable error kind tag, once `outcome` is `Error`.
    pub error_kind: Option<String>,
    /// Human error message, once `outcome` is `Error`.
    pub error_message: Option<String>,
}

impl ProcessingTask {
    /// Create a freshly queued task.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source_ref: None,
            stage: Stage::Queued,
            progress: 0,
            message: "queued".to_string(),
            started_at: jiff::Timestamp::now(),
            ended_at: None,
            outcome: None,
            result: None,
            error_kind: None,
            error_message: None,
        }
    }
}
