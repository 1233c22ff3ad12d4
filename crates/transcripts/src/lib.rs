//! Transcript acquisition: cache-first selection over the four-level priority ladder,
//! with machine translation as the last resort.

#![deny(missing_docs)]

mod acquirer;
mod cache;
mod preferences;
mod provider;

pub use acquirer::TranscriptAcquirer;
pub use cache::{InMemoryTranscriptCache, TranscriptCache};
pub use preferences::Preferences;
pub use provider::{TranscriptProvider, YoutubeProvider, with_retry};

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use model::{ClipForgeError, Result, TranscriptDescriptor, TranscriptVariant};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakeProvider {
        tracks: Vec<TranscriptDescriptor>,
        texts: std::collections::HashMap<String, String>,
        list_calls: AtomicUsize,
    }

    #[async_trait]
    impl TranscriptProvider for FakeProvider {
        async fn list_available(&self, _video_id: &str) -> Result<Vec<TranscriptDescriptor>> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.tracks.clone())
        }

        async fn fetch_text(&self, _video_id: &str, descriptor: &TranscriptDescriptor) -> Result<String> {
            self.texts
                .get(&descriptor.language_code)
                .cloned()
                .ok_or(ClipForgeError::NoTranscriptFound)
        }
    }

    fn descriptor(language_code: &str, variant: TranscriptVariant, translatable: bool) -> TranscriptDescriptor {
        TranscriptDescriptor {
            language_code: language_code.to_string(),
            language_name: language_code.to_string(),
            variant,
            is_translatable: translatable,
        }
    }

    #[tokio::test]
    async fn prefers_manual_english_over_auto() {
        let provider = Arc::new(FakeProvider {
            tracks: vec![
                descriptor("en", TranscriptVariant::AutoGenerated, false),
                descriptor("en", TranscriptVariant::Manual, false),
            ],
            texts: [("en".to_string(), "manual text".to_string())].into_iter().collect(),
            list_calls: AtomicUsize::new(0),
        });
        let cache = Arc::new(InMemoryTranscriptCache::new());
        let llm = dummy_llm_client();

        let acquirer = TranscriptAcquirer::new(provider, cache, llm);
        let result = acquirer.get_english("vid1", &Preferences::default()).await.unwrap();

        assert_eq!(result.priority, model::TranscriptPriority::ManualEnglish);
        assert_eq!(result.confidence, 1.0);
    }

    #[tokio::test]
    async fn second_call_is_served_from_cache() {
        let provider = Arc::new(FakeProvider {
            tracks: vec![descriptor("en", TranscriptVariant::Manual, false)],
            texts: [("en".to_string(), "manual text".to_string())].into_iter().collect(),
            list_calls: AtomicUsize::new(0),
        });
        let cache = Arc::new(InMemoryTranscriptCache::new());
        let llm = dummy_llm_client();

        let acquirer = TranscriptAcquirer::new(provider.clone(), cache, llm);
        acquirer.get_english("vid1", &Preferences::default()).await.unwrap();
        acquirer.get_english("vid1", &Preferences::default()).await.unwrap();

        assert_eq!(provider.list_calls.load(Ordering::SeqCst), 1, "second call should be a cache hit");
    }

    #[tokio::test]
    async fn no_tracks_fails_with_no_transcript_found() {
        let provider = Arc::new(FakeProvider { tracks: vec![], texts: Default::default(), list_calls: AtomicUsize::new(0) });
        let cache = Arc::new(InMemoryTranscriptCache::new());
        let llm = dummy_llm_client();

        let acquirer = TranscriptAcquirer::new(provider, cache, llm);
        let err = acquirer.get_english("vid1", &Preferences::default()).await.unwrap_err();

        assert_eq!(err.kind(), "no-transcript-found");
    }

    fn dummy_llm_client() -> llm_client::LlmClient {
        let config = config::LlmConfig::default();
        let rate_limiter = rate_limit::RateLimiter::new(config.rate_limit);
        llm_client::LlmClient::new(&config, "test-key".to_string(), rate_limiter)
    }
}
