use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// The origin kind of an indexed [`Source`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// A YouTube video, identified by its video id.
    Video,
    /// An uploaded document (plain text, Markdown, Word, PDF).
    Document,
    /// A web URL.
    Url,
    /// Raw pasted text with no external origin.
    Raw,
}

/// A canonical, addressable unit of input text.
///
/// Invariants: `text` is non-empty and at least 50 characters; `id` is unique within
/// `kind`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Source {
    /// Stable identifier, unique within `kind`.
    pub id: String,
    /// The origin kind.
    pub kind: SourceKind,
    /// Human-readable title.
    pub title: String,
    /// Full extracted text, canonical English.
    pub text: String,
    /// Short summary, 200-500 characters once indexed by the Brain.
    pub summary: Option<String>,
    /// Extracted topics, 5-15 once indexed.
    pub topics: Vec<String>,
    /// Free-form tags.
    pub tags: Vec<String>,
    /// Free-form metadata (original URL, author, publication date, ...).
    pub metadata: HashMap<String, String>,
    /// When this source was indexed by the Brain, if ever.
    pub indexed_at: Option<jiff::Timestamp>,
    /// Retrieval-key fingerprint: normalized term frequencies over the source text.
    ///
    /// Absent until the Brain indexes the source.
    pub fingerprint: Option<HashMap<String, f32>>,
}

impl Source {
    /// Minimum length of `text` required for a valid `Source`.
    pub const MIN_TEXT_LEN: usize = 50;

    /// Construct a new, not-yet-indexed source. Returns `None` if `text` is too short.
    pub fn new(id: impl Into<String>, kind: SourceKind, title: impl Into<String>, text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        if text.trim().chars().count() < Self::MIN_TEXT_LEN {
            return None;
        }

        Some(Self {
            id: id.into(),
            kind,
            title: title.into(),
            text,
            summary: None,
            topics: Vec::new(),
            tags: Vec::new(),
            metadata: HashMap::new(),
            indexed_at: None,
            fingerprint: None,
        })
    }

    /// The first `len` characters of `summary`, falling back to `text`.
    pub fn snippet(&self, len: usize) -> String {
        let source = self.summary.as_deref().unwrap_or(&self.text);
        source.chars().take(len).collect()
    }
}
