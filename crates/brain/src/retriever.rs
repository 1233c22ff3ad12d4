use model::{Source, SourceKind};

use crate::fingerprint::{cosine_similarity, fingerprint};

/// Filter and pagination knobs for [`search`].
#[derive(Debug, Clone)]
pub struct SearchFilter {
    /// Restrict results to this [`SourceKind`], if set.
    pub source_kind: Option<SourceKind>,
    /// Minimum similarity score to include, default `0.0`.
    pub min_score: f32,
    /// Maximum number of results to return, default `10`.
    pub limit: usize,
}

impl Default for SearchFilter {
    fn default() -> Self {
        Self { source_kind: None, min_score: 0.0, limit: 10 }
    }
}

/// One ranked retrieval hit.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The matched source's id.
    pub source_id: String,
    /// Cosine similarity against the query.
    pub score: f32,
    /// First 240 characters of the source's summary, falling back to its text.
    pub snippet: String,
}

/// Rank `candidates` against `query` by cosine similarity over the term-frequency
/// fingerprint, applying `filter`. Ties break by most-recently-indexed.
pub fn search(candidates: &[Source], query: &str, filter: &SearchFilter) -> Vec<SearchResult> {
    let query_fingerprint = fingerprint(query);

    let mut scored: Vec<(&Source, f32)> = candidates
        .iter()
        .filter(|source| filter.source_kind.is_none_or(|kind| source.kind == kind))
        .filter_map(|source| source.fingerprint.as_ref().map(|fp| (source, cosine_similarity(&query_fingerprint, fp))))
        .filter(|(_, score)| *score >= filter.min_score)
        .collect();

    scored.sort_by(|(source_a, score_a), (source_b, score_b)| {
        score_b.partial_cmp(score_a).unwrap_or(std::cmp::Ordering::Equal).then_with(|| source_b.indexed_at.cmp(&source_a.indexed_at))
    });

    scored
        .into_iter()
        .take(filter.limit)
        .map(|(source, score)| SearchResult { source_id: source.id.clone(), score, snippet: source.snippet(240) })
        .collect()
}
