use async_trait::async_trait;
use model::{ClipForgeError, Result, TranscriptDescriptor, TranscriptVariant};
use std::time::Duration;

const BACKOFF_SCHEDULE: [Duration; 3] = [Duration::from_secs(1), Duration::from_secs(2), Duration::from_secs(4)];
const MAX_ATTEMPTS: u32 = 3;

/// The external collaborator that actually talks to the video platform. `spec.md` §1
/// places the provider's wire protocol out of scope; this trait is the seam a real
/// implementation plugs into.
#[async_trait]
pub trait TranscriptProvider: Send + Sync {
    /// List every caption track the platform offers for a video.
    async fn list_available(&self, video_id: &str) -> Result<Vec<TranscriptDescriptor>>;

    /// Fetch the full text of one caption track.
    async fn fetch_text(&self, video_id: &str, descriptor: &TranscriptDescriptor) -> Result<String>;
}

/// Retry a provider call with the same exponential backoff schedule the LLM client
/// uses, per `spec.md` §4.2's "RATE-LIMITED (retry with exponential backoff, max 3
/// attempts)" clause.
pub async fn with_retry<T, F, Fut>(mut call: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T>>,
{
    let mut last_error = None;

    for attempt in 0..MAX_ATTEMPTS {
        if attempt > 0 {
            tokio::time::sleep(BACKOFF_SCHEDULE[(attempt - 1) as usize]).await;
        }

        match call().await {
            Ok(value) => return Ok(value),
            Err(ClipForgeError::VideoUnavailable) => return Err(ClipForgeError::VideoUnavailable),
            Err(ClipForgeError::TranscriptsDisabled) => return Err(ClipForgeError::TranscriptsDisabled),
            Err(err) => last_error = Some(err),
        }
    }

    Err(last_error.unwrap_or(ClipForgeError::NoTranscriptFound))
}

/// A provider backed by the platform's public timed-text endpoints.
pub struct YoutubeProvider {
    http: reqwest::Client,
}

impl Default for YoutubeProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl YoutubeProvider {
    /// Build a provider with a bounded-timeout HTTP client.
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
        }
    }

    fn list_url(video_id: &str) -> String {
        format!("https://www.youtube.com/api/timedtext?type=list&v={video_id}")
    }

    fn track_url(video_id: &str, descriptor: &TranscriptDescriptor) -> String {
        let kind = match descriptor.variant {
            TranscriptVariant::AutoGenerated => "&kind=asr",
            TranscriptVariant::Manual => "",
        };
        format!("https://www.youtube.com/api/timedtext?v={video_id}&lang={}{kind}", descriptor.language_code)
    }
}

#[async_trait]
impl TranscriptProvider for YoutubeProvider {
    async fn list_available(&self, video_id: &str) -> Result<Vec<TranscriptDescriptor>> {
        with_retry(|| async {
            let body = self
                .http
                .get(Self::list_url(video_id))
                .send()
                .await
                .map_err(|err| ClipForgeError::UrlFetchFailed(err.to_string()))?
                .text()
                .await
                .map_err(|err| ClipForgeError::UrlFetchFailed(err.to_string()))?;

            if body.trim().is_empty() {
                return Err(ClipForgeError::TranscriptsDisabled);
            }

            Ok(parse_track_list(&body))
        })
        .await
    }

    async fn fetch_text(&self, video_id: &str, descriptor: &TranscriptDescriptor) -> Result<String> {
        with_retry(|| async {
            let xml = self
                .http
                .get(Self::track_url(video_id, descriptor))
                .send()
                .await
                .map_err(|err| ClipForgeError::UrlFetchFailed(err.to_string()))?
                .text()
                .await
                .map_err(|err| ClipForgeError::UrlFetchFailed(err.to_string()))?;

            let text = strip_caption_markup(&xml);
            if text.is_empty() {
                return Err(ClipForgeError::NoTranscriptFound);
            }

            Ok(text)
        })
        .await
    }
}

fn parse_track_list(xml: &str) -> Vec<TranscriptDescriptor> {
    let document = scraper::Html::parse_document(xml);
    let selector = scraper::Selector::parse("track").expect("static selector is valid");

    document
        .select(&selector)
        .filter_map(|el| {
            let value = el.value();
            let language_code = value.attr("lang_code")?.to_string();
            let language_name = value.attr("name").unwrap_or(&language_code).to_string();
            let is_translatable = value.attr("lang_translated") != Some("1");
            let variant = if value.attr("kind") == Some("asr") { TranscriptVariant::AutoGenerated } else { TranscriptVariant::Manual };

            Some(TranscriptDescriptor { language_code, language_name, variant, is_translatable })
        })
        .collect()
}

fn strip_caption_markup(xml: &str) -> String {
    let document = scraper::Html::parse_document(xml);
    let selector = scraper::Selector::parse("text").expect("static selector is valid");

    document
        .select(&selector)
        .map(|el| el.text().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}
