//! Storage for Sources, Transcript Cache entries, Content Artifacts, and Brain
//! Sessions: a [`Repository`] trait plus an in-process reference implementation.
//!
//! The repository is storage, not coordination: it is never consulted as part of an
//! ordering guarantee (that is the Progress Store's job).

#![deny(missing_docs)]

use std::collections::HashMap;

use async_trait::async_trait;
use model::{BrainSession, ContentArtifact, Source, TranscriptCacheEntry, TranscriptVariant};
use tokio::sync::RwLock;

/// Persistence for the four entities the Brain and content pipeline produce.
///
/// Mutations are transactional per request (each method call is a single atomic
/// operation against its backing store); reads are eventually consistent with
/// in-flight writes.
#[async_trait]
pub trait Repository: Send + Sync {
    /// Create or overwrite a source.
    async fn put_source(&self, source: Source);
    /// Look up a source by id.
    async fn get_source(&self, id: &str) -> Option<Source>;
    /// List all sources, in no particular order.
    async fn list_sources(&self) -> Vec<Source>;
    /// Delete a source. Returns whether it existed.
    async fn delete_source(&self, id: &str) -> bool;

    /// Look up a cached transcript entry.
    async fn get_transcript(&self, video_id: &str, language: &str, variant: TranscriptVariant) -> Option<TranscriptCacheEntry>;
    /// Store (or overwrite) a cached transcript entry.
    async fn put_transcript(&self, entry: TranscriptCacheEntry);

    /// Create or overwrite a content artifact.
    async fn put_artifact(&self, artifact: ContentArtifact);
    /// Look up a content artifact by its content id.
    async fn get_artifact(&self, content_id: &str) -> Option<ContentArtifact>;
    /// List every artifact whose content id was minted from `source_id`.
    async fn list_artifacts_for_source(&self, source_id: &str) -> Vec<ContentArtifact>;

    /// Create or overwrite a Brain session.
    async fn put_session(&self, session: BrainSession);
    /// Look up a Brain session by id.
    async fn get_session(&self, id: &str) -> Option<BrainSession>;
}

/// An in-process, non-persistent [`Repository`]. The reference implementation used by
/// the server and by tests; a production deployment swaps in a SQL-backed
/// implementation of the same trait.
#[derive(Default)]
pub struct InMemoryRepository {
    sources: RwLock<HashMap<String, Source>>,
    transcripts: RwLock<HashMap<(String, String, TranscriptVariant), TranscriptCacheEntry>>,
    artifacts: RwLock<HashMap<String, ContentArtifact>>,
    sessions: RwLock<HashMap<String, BrainSession>>,
}

impl InMemoryRepository {
    /// Build an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn put_source(&self, source: Source) {
        self.sources.write().await.insert(source.id.clone(), source);
    }

    async fn get_source(&self, id: &str) -> Option<Source> {
        self.sources.read().await.get(id).cloned()
    }

    async fn list_sources(&self) -> Vec<Source> {
        self.sources.read().await.values().cloned().collect()
    }

    async fn delete_source(&self, id: &str) -> bool {
        self.sources.write().await.remove(id).is_some()
    }

    async fn get_transcript(&self, video_id: &str, language: &str, variant: TranscriptVariant) -> Option<TranscriptCacheEntry> {
        let key = (video_id.to_string(), language.to_string(), variant);
        self.transcripts.read().await.get(&key).cloned()
    }

    async fn put_transcript(&self, entry: TranscriptCacheEntry) {
        let key = (entry.video_id.clone(), entry.language.clone(), entry.variant);
        self.transcripts.write().await.insert(key, entry);
    }

    async fn put_artifact(&self, artifact: ContentArtifact) {
        self.artifacts.write().await.insert(artifact.content_id().to_string(), artifact);
    }

    async fn get_artifact(&self, content_id: &str) -> Option<ContentArtifact> {
        self.artifacts.read().await.get(content_id).cloned()
    }

    async fn list_artifacts_for_source(&self, source_id: &str) -> Vec<ContentArtifact> {
        let prefix = format!("{source_id}_");
        self.artifacts.read().await.values().filter(|artifact| artifact.content_id().starts_with(&prefix)).cloned().collect()
    }

    async fn put_session(&self, session: BrainSession) {
        self.sessions.write().await.insert(session.id.clone(), session);
    }

    async fn get_session(&self, id: &str) -> Option<BrainSession> {
        self.sessions.read().await.get(id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use model::{BrainMode, SourceKind, Tweet};

    use super::*;

    #[tokio::test]
    async fn source_round_trips_and_deletes() {
        let repo = InMemoryRepository::new();
        let source = Source::new("s1", SourceKind::Raw, "title", "a long enough piece of source text here").unwrap();

        repo.put_source(source.clone()).await;
        assert_eq!(repo.get_source("s1").await.unwrap().title, "title");
        assert_eq!(repo.list_sources().await.len(), 1);

        assert!(repo.delete_source("s1").await);
        assert!(repo.get_source("s1").await.is_none());
        assert!(!repo.delete_source("s1").await);
    }

    #[tokio::test]
    async fn artifacts_are_listed_by_source_prefix() {
        let repo = InMemoryRepository::new();

        let tweet = |id: &str| {
            ContentArtifact::Tweet(Tweet {
                content_id: id.to_string(),
                title: "t".to_string(),
                text: "text".to_string(),
                thread: vec![],
                tags: vec![],
                call_to_action: None,
            })
        };

        repo.put_artifact(tweet("source-1_tweet_001")).await;
        repo.put_artifact(tweet("source-1_tweet_002")).await;
        repo.put_artifact(tweet("source-2_tweet_001")).await;

        let artifacts = repo.list_artifacts_for_source("source-1").await;
        assert_eq!(artifacts.len(), 2);
    }

    #[tokio::test]
    async fn session_round_trips() {
        let repo = InMemoryRepository::new();
        let session = BrainSession::new("sess-1", BrainMode::Vision);

        repo.put_session(session).await;
        assert_eq!(repo.get_session("sess-1").await.unwrap().mode, BrainMode::Vision);
        assert!(repo.get_session("does-not-exist").await.is_none());
    }
}
