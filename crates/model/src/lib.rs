//! Shared data model for ClipForge: sources, transcripts, content artifacts,
//! processing tasks, and Brain sessions, plus the common error taxonomy.

#![deny(missing_docs)]

mod brain;
mod content;
mod error;
mod source;
mod task;
mod transcript;

pub use brain::{BrainMode, BrainSession, HybridStrategy, SessionStatus};
pub use content::{ContentArtifact, ContentIdea, ContentType, Carousel, CarouselSlide, Reel, Tweet};
pub use error::ClipForgeError;
pub use source::{Source, SourceKind};
pub use task::{ProcessingTask, Stage, TaskOutcome};
pub use transcript::{
    TranscriptCacheEntry, TranscriptDescriptor, TranscriptPriority, TranscriptResult, TranscriptVariant,
};

/// Result alias using the crate-wide error type.
pub type Result<T> = std::result::Result<T, ClipForgeError>;
