use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use model::{TranscriptCacheEntry, TranscriptVariant};

/// Entries older than this are pruned on the next `put`, regardless of cap.
const ENTRY_TTL_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Maximum number of entries kept at once; oldest-by-`cached_at` is evicted first once
/// a `put` would exceed it.
const MAX_ENTRIES: usize = 10_000;

/// Storage for the Transcript Cache, keyed by `(video_id, language, variant)`.
///
/// Entries are purely a performance artifact; a cache miss is never an error, only a
/// reason to fall through to the provider.
#[async_trait]
pub trait TranscriptCache: Send + Sync {
    /// Look up a cached entry.
    async fn get(&self, video_id: &str, language: &str, variant: TranscriptVariant) -> Option<TranscriptCacheEntry>;

    /// Store (or overwrite) a cache entry.
    async fn put(&self, entry: TranscriptCacheEntry);
}

/// A process-local, non-persistent cache. Suitable for a single-process deployment or
/// as the default in tests; a persistent implementation is a repository concern.
#[derive(Default)]
pub struct InMemoryTranscriptCache {
    entries: Mutex<HashMap<(String, String, TranscriptVariant), TranscriptCacheEntry>>,
}

impl InMemoryTranscriptCache {
    /// Build an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop entries older than [`ENTRY_TTL_SECONDS`], then evict the oldest remaining
    /// entries until at most [`MAX_ENTRIES`] - 1 remain, leaving room for the insert
    /// the caller is about to perform.
    fn evict(entries: &mut HashMap<(String, String, TranscriptVariant), TranscriptCacheEntry>) {
        let now = jiff::Timestamp::now().as_second();
        entries.retain(|_, entry| now - entry.cached_at.as_second() < ENTRY_TTL_SECONDS);

        if entries.len() >= MAX_ENTRIES {
            let mut by_age: Vec<_> = entries.iter().map(|(key, entry)| (key.clone(), entry.cached_at)).collect();
            by_age.sort_by_key(|(_, cached_at)| *cached_at);

            let overflow = entries.len() - MAX_ENTRIES + 1;
            for (key, _) in by_age.into_iter().take(overflow) {
                entries.remove(&key);
            }
        }
    }
}

#[async_trait]
impl TranscriptCache for InMemoryTranscriptCache {
    async fn get(&self, video_id: &str, language: &str, variant: TranscriptVariant) -> Option<TranscriptCacheEntry> {
        let key = (video_id.to_string(), language.to_string(), variant);
        self.entries.lock().unwrap_or_else(|poison| poison.into_inner()).get(&key).cloned()
    }

    async fn put(&self, entry: TranscriptCacheEntry) {
        let key = (entry.video_id.clone(), entry.language.clone(), entry.variant);
        let mut entries = self.entries.lock().unwrap_or_else(|poison| poison.into_inner());
        Self::evict(&mut entries);
        entries.insert(key, entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(video_id: &str, cached_at: jiff::Timestamp) -> TranscriptCacheEntry {
        TranscriptCacheEntry {
            video_id: video_id.to_string(),
            language: "en".to_string(),
            variant: TranscriptVariant::Manual,
            text: "some transcript text".to_string(),
            source_language: None,
            cached_at,
        }
    }

    #[tokio::test]
    async fn entries_older_than_seven_days_are_pruned_on_put() {
        let cache = InMemoryTranscriptCache::new();
        let now = jiff::Timestamp::now();
        let stale = now.checked_sub(jiff::Span::new().seconds(ENTRY_TTL_SECONDS + 60)).unwrap();

        cache.put(entry("stale", stale)).await;
        cache.put(entry("fresh", now)).await;

        assert!(cache.get("stale", "en", TranscriptVariant::Manual).await.is_none());
        assert!(cache.get("fresh", "en", TranscriptVariant::Manual).await.is_some());
    }

    #[tokio::test]
    async fn put_over_cap_evicts_oldest_first() {
        let cache = InMemoryTranscriptCache::new();
        let now = jiff::Timestamp::now();

        for i in 0..MAX_ENTRIES {
            let cached_at = now.checked_sub(jiff::Span::new().seconds((MAX_ENTRIES - i) as i64)).unwrap();
            cache.put(entry(&format!("v{i}"), cached_at)).await;
        }

        assert!(cache.get("v0", "en", TranscriptVariant::Manual).await.is_none());
        assert!(cache.get(&format!("v{}", MAX_ENTRIES - 1), "en", TranscriptVariant::Manual).await.is_some());
    }
}
