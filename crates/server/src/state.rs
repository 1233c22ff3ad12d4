use std::sync::Arc;

use config::{Config, StyleRegistry};
use llm_client::LlmClient;
use progress::TaskManager;
use rate_limit::RateLimiter;
use repository::{InMemoryRepository, Repository};
use transcripts::{InMemoryTranscriptCache, TranscriptAcquirer, YoutubeProvider};

/// Shared, cloneable application state handed to every axum handler.
#[derive(Clone)]
pub struct AppState {
    /// The process-wide configuration this server was started with.
    pub config: Arc<Config>,
    /// Sources, transcript cache, content artifacts, and brain sessions.
    pub repo: Arc<dyn Repository>,
    /// Background generation task tracking and cancellation.
    pub task_manager: Arc<TaskManager>,
    /// The single LLM client every generation stage shares.
    pub llm: LlmClient,
    /// HTTP client used for URL ingestion (separate from the LLM client's own client).
    pub http_client: reqwest::Client,
    /// Transcript acquisition over the YouTube provider and the in-process cache.
    pub transcripts: Arc<TranscriptAcquirer>,
    /// The five built-in content styles plus whatever the caller names directly.
    pub style_registry: Arc<StyleRegistry>,
}

impl AppState {
    /// Build application state from a resolved [`Config`].
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let api_key = config.llm_api_key.clone().ok_or_else(|| anyhow::anyhow!("llm api key not resolved"))?;

        let rate_limiter = RateLimiter::new(config.llm.rate_limit);
        let llm = LlmClient::new(&config.llm, api_key, rate_limiter);

        let http_client = reqwest::Client::builder().build()?;

        let transcript_provider = Arc::new(YoutubeProvider::new());
        let transcript_cache = Arc::new(InMemoryTranscriptCache::new());
        let transcript_acquirer = Arc::new(TranscriptAcquirer::new(transcript_provider, transcript_cache, llm.clone()));

        let store = progress::ProgressStore::new();

        Ok(Self {
            config: Arc::new(config),
            repo: Arc::new(InMemoryRepository::new()),
            task_manager: Arc::new(TaskManager::new(store)),
            llm,
            http_client,
            transcripts: transcript_acquirer,
            style_registry: Arc::new(StyleRegistry::default()),
        })
    }
}
