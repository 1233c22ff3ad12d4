use serde::{Deserialize, Serialize};

/// The content type an idea or artifact belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentType {
    /// A short vertical-video script.
    Reel,
    /// A multi-slide carousel post.
    ImageCarousel,
    /// A single short text post, optionally threaded.
    Tweet,
}

impl ContentType {
    /// All recognized content types, in a stable order.
    pub const ALL: [Self; 3] = [Self::Reel, Self::ImageCarousel, Self::Tweet];

    /// The short token used inside content ids (`{source-id}_{slug}_{NNN}`).
    pub fn slug(self) -> &'static str {
        match self {
            Self::Reel => "reel",
            Self::ImageCarousel => "carousel",
            Self::Tweet => "tweet",
        }
    }
}

/// An intermediate structured suggestion produced by the ideation stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentIdea {
    /// Which artifact type this idea suggests producing.
    pub content_type: ContentType,
    /// Suggested title, at most 80 characters.
    pub title: String,
    /// A relevant snippet drawn from the source text.
    pub snippet: String,
    /// Type-specific hints passed through to the materializer's prompt.
    #[serde(default)]
    pub hints: serde_json::Map<String, serde_json::Value>,
}

/// One slide of an [`Carousel`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarouselSlide {
    /// 1-based slide position.
    pub slide_number: u32,
    /// 1-based step number shown to the reader (may differ from `slide_number` for
    /// intro/outro slides that are not numbered steps).
    pub step_number: u32,
    /// Step heading, at most `carousel-slide-heading-max` characters.
    pub heading: String,
    /// Step body text, `carousel-slide-text-max` characters by default, 400-800 target.
    pub text: String,
}

/// A short vertical-video script.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reel {
    /// Assigned content id, `{source-id}_reel_{NNN}`.
    pub content_id: String,
    /// Title.
    pub title: String,
    /// Platform caption.
    pub caption: String,
    /// Opening hook line.
    pub hook: String,
    /// Full script body.
    pub script: String,
    /// Optional shot/visual direction notes.
    pub visual_suggestions: Option<String>,
    /// Hashtags / tags.
    pub tags: Vec<String>,
    /// Optional call to action.
    pub call_to_action: Option<String>,
    /// Optional estimated runtime in seconds.
    pub estimated_duration_seconds: Option<u32>,
    /// Optional music suggestion.
    pub music_suggestion: Option<String>,
}

/// A multi-slide carousel post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Carousel {
    /// Assigned content id, `{source-id}_carousel_{NNN}`.
    pub content_id: String,
    /// Title.
    pub title: String,
    /// Platform caption.
    pub caption: String,
    /// Slides, in display order. Count is bounded by `carousel-min-slides`/`-max-slides`.
    pub slides: Vec<CarouselSlide>,
    /// Hashtags / tags.
    pub tags: Vec<String>,
    /// Optional call to action.
    pub call_to_action: Option<String>,
    /// Optional design notes for whoever builds the visual slides.
    pub design_notes: Option<String>,
}

/// A single short text post, optionally followed by thread continuations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tweet {
    /// Assigned content id, `{source-id}_tweet_{NNN}`.
    pub content_id: String,
    /// Title (internal label, not posted).
    pub title: String,
    /// Tweet text, at most 280 characters regardless of configured caps.
    pub text: String,
    /// Optional thread continuations, each at most 280 characters.
    pub thread: Vec<String>,
    /// Hashtags / tags.
    pub tags: Vec<String>,
    /// Optional call to action.
    pub call_to_action: Option<String>,
}

/// A generated short-form output, tagged by content type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "content_type", rename_all = "kebab-case")]
pub enum ContentArtifact {
    /// A reel.
    Reel(Reel),
    /// An image carousel.
    ImageCarousel(Carousel),
    /// A tweet.
    Tweet(Tweet),
}

impl ContentArtifact {
    /// The content type tag of this artifact.
    pub fn content_type(&self) -> ContentType {
        match self {
            Self::Reel(_) => ContentType::Reel,
            Self::ImageCarousel(_) => ContentType::ImageCarousel,
            Self::Tweet(_) => ContentType::Tweet,
        }
    }

    /// The assigned content id, whichever variant this is.
    pub fn content_id(&self) -> &str {
        match self {
            Self::Reel(r) => &r.content_id,
            Self::ImageCarousel(c) => &c.content_id,
            Self::Tweet(t) => &t.content_id,
        }
    }

    /// Overwrite the content id, whichever variant this is.
    pub fn set_content_id(&mut self, id: impl Into<String>) {
        let id = id.into();
        match self {
            Self::Reel(r) => r.content_id = id,
            Self::ImageCarousel(c) => c.content_id = id,
            Self::Tweet(t) => t.content_id = id,
        }
    }
}

/// Build a content id of the form `{source_id}_{type}_{NNN}` (`NNN` zero-padded to 3
/// digits, 1-based).
pub fn content_id(source_id: &str, content_type: ContentType, index_within_type: u32) -> String {
    format!("{source_id}_{}_{index_within_type:03}", content_type.slug())
}
