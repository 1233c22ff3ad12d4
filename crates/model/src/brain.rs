use serde::{Deserialize, Serialize};

/// Which of the Brain Composer's modes produced a [`BrainSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrainMode {
    /// Vision mode: a user-supplied creative vision drives retrieval.
    Vision,
    /// Full-AI mode, `single` sub-variant: exactly one idea/artifact, model-chosen type.
    AutoSingle,
    /// Full-AI mode, `multiple` sub-variant: caller-chosen idea count.
    AutoMultiple,
    /// Full-AI mode, `auto` sub-variant: model-chosen idea count.
    AutoAuto,
    /// Hybrid mode: user-chosen sources augmented by the Brain under a named strategy.
    Hybrid,
}

/// The augmentation strategy for [`BrainMode::Hybrid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HybridStrategy {
    /// Add the top-K retrieved sources to the user's selection.
    Augment,
    /// Add sources until the total reaches a target count.
    Fill,
    /// Add sources as prompt-only context; never primary attribution.
    Support,
}

/// Lifecycle status of a [`BrainSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// Retrieval/composition in progress.
    Composing,
    /// Generation in progress.
    Generating,
    /// Finished successfully.
    Complete,
    /// Finished with an error.
    Error,
}

/// A record of one Brain-driven generation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrainSession {
    /// Session identifier.
    pub id: String,
    /// Which mode produced this session.
    pub mode: BrainMode,
    /// User-supplied creative vision text, for [`BrainMode::Vision`].
    pub vision: Option<String>,
    /// Source ids the user explicitly selected.
    pub user_source_ids: Vec<String>,
    /// Source ids the system matched, with their similarity scores.
    pub matched_source_ids: Vec<(String, f32)>,
    /// Content ids produced by this session.
    pub generated_content_ids: Vec<String>,
    /// Current status.
    pub status: SessionStatus,
    /// For [`BrainMode::AutoAuto`]: the idea count the model chose.
    pub chosen_count: Option<u32>,
    /// For [`BrainMode::AutoAuto`]: the model's short rationale for `chosen_count`.
    pub rationale: Option<String>,
}

impl BrainSession {
    /// Create a new, not-yet-composed session.
    pub fn new(id: impl Into<String>, mode: BrainMode) -> Self {
        Self {
            id: id.into(),
            mode,
            vision: None,
            user_source_ids: Vec::new(),
            matched_source_ids: Vec::new(),
            generated_content_ids: Vec::new(),
            status: SessionStatus::Composing,
            chosen_count: None,
            rationale: None,
        }
    }
}
