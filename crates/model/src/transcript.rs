use serde::{Deserialize, Serialize};

/// Whether a transcript was authored by a human or produced by automatic captioning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TranscriptVariant {
    /// Manually authored / uploaded captions.
    Manual,
    /// Auto-generated captions.
    AutoGenerated,
}

/// One row in the Transcript Cache, keyed by `(video_id, language, variant)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptCacheEntry {
    /// YouTube video identifier.
    pub video_id: String,
    /// BCP-47-ish language code of the cached text (e.g. "en", "de").
    pub language: String,
    /// Manual vs auto-generated.
    pub variant: TranscriptVariant,
    /// Full transcript text.
    pub text: String,
    /// Original language, set only when `text` is a translation.
    pub source_language: Option<String>,
    /// When this entry was written.
    pub cached_at: jiff::Timestamp,
}

/// The four-level priority ladder over transcript provenance, highest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TranscriptPriority {
    /// Auto-generated, translated to English. Confidence 0.5.
    AutoTranslated,
    /// Manually authored, translated to English. Confidence 0.7.
    ManualTranslated,
    /// Auto-generated, already English. Confidence 0.8.
    AutoEnglish,
    /// Manually authored, already English. Confidence 1.0.
    ManualEnglish,
}

impl TranscriptPriority {
    /// The fixed confidence score associated with this priority level.
    pub fn confidence(self) -> f32 {
        match self {
            Self::ManualEnglish => 1.0,
            Self::AutoEnglish => 0.8,
            Self::ManualTranslated => 0.7,
            Self::AutoTranslated => 0.5,
        }
    }
}

/// A transcript language/variant offered by the provider, prior to fetching its text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptDescriptor {
    /// BCP-47-ish language code.
    pub language_code: String,
    /// Human-readable language name (e.g. "German").
    pub language_name: String,
    /// Manually authored vs auto-generated.
    pub variant: TranscriptVariant,
    /// Whether the provider can machine-translate this transcript to English.
    pub is_translatable: bool,
}

/// The ephemeral result of [`crate`]-level transcript acquisition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptResult {
    /// Selected transcript text, in English.
    pub text: String,
    /// Always "en" for a successful result.
    pub language: String,
    /// Which rung of the priority ladder produced this result.
    pub priority: TranscriptPriority,
    /// Confidence score in `[0, 1]`, equal to `priority.confidence()`.
    pub confidence: f32,
    /// Original language, set only when `priority` is one of the `*Translated` variants.
    pub source_language: Option<String>,
    /// Ordered log of every decision made while selecting this result.
    pub processing_notes: Vec<String>,
}

impl TranscriptResult {
    /// Build a result for the given priority, deriving `confidence` automatically.
    pub fn new(
        text: impl Into<String>,
        priority: TranscriptPriority,
        source_language: Option<String>,
        processing_notes: Vec<String>,
    ) -> Self {
        Self {
            text: text.into(),
            language: "en".to_string(),
            confidence: priority.confidence(),
            priority,
            source_language,
            processing_notes,
        }
    }
}
