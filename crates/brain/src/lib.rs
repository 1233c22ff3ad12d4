//! Reusable knowledge base over ingested [`model::Source`]s: indexing, similarity
//! retrieval, and composition of retrieved/selected sources into a generation request.

#![deny(missing_docs)]

mod auto_plan;
mod composer;
mod fingerprint;
mod indexer;
mod retriever;

pub use auto_plan::decide_auto_count;
pub use composer::{ComposeRequest, ComposedContext, compose};
pub use fingerprint::{cosine_similarity, fingerprint};
pub use indexer::index;
pub use retriever::{SearchFilter, SearchResult, search};

#[cfg(test)]
mod tests {
    use config::FieldLimits;
    use model::{HybridStrategy, Source, SourceKind};
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn make_source(id: &str, text: &str) -> Source {
        Source::new(id, SourceKind::Raw, id, text).unwrap()
    }

    fn llm_against(base_url: String) -> llm_client::LlmClient {
        let mut config = config::LlmConfig::default();
        config.base_url = base_url;
        config.max_retries = 0;
        let rate_limiter = rate_limit::RateLimiter::new(config.rate_limit);
        llm_client::LlmClient::new(&config, "test-key".to_string(), rate_limiter)
    }

    #[tokio::test]
    async fn indexing_sets_topics_summary_fingerprint_and_timestamp() {
        let server = MockServer::start().await;
        let envelope = json!({
            "choices": [{
                "message": {
                    "content": json!({
                        "topics": ["rust", "ownership", "borrowing", "lifetimes", "traits"],
                        "summary": "A long enough summary about Rust's ownership model and how borrowing works in practice across real programs.",
                    }).to_string()
                }
            }]
        });
        Mock::given(method("POST")).and(path("/chat/completions")).respond_with(ResponseTemplate::new(200).set_body_json(envelope)).mount(&server).await;

        let llm = llm_against(server.uri());
        let source = make_source("s1", "Rust's ownership and borrowing rules prevent data races at compile time.");

        let indexed = index(&llm, source).await.unwrap();

        assert_eq!(indexed.topics.len(), 5);
        assert!(indexed.summary.is_some());
        assert!(indexed.fingerprint.is_some());
        assert!(indexed.indexed_at.is_some());
    }

    fn indexed_source(id: &str, text: &str) -> Source {
        let mut source = make_source(id, text);
        source.fingerprint = Some(fingerprint(text));
        source.indexed_at = Some(jiff::Timestamp::from_second(0).unwrap());
        source
    }

    #[test]
    fn search_ranks_the_closer_source_first() {
        let sources = vec![
            indexed_source("cooking", "a recipe for sourdough bread with yeast and flour and fermentation"),
            indexed_source("rockets", "orbital mechanics and rocket propulsion and thrust vector control"),
        ];

        let results = search(&sources, "bread fermentation yeast", &SearchFilter::default());

        assert_eq!(results[0].source_id, "cooking");
        assert!(results[0].score > results[1].score);
    }

    #[test]
    fn search_respects_limit_and_min_score() {
        let sources = vec![indexed_source("a", "alpha beta gamma delta epsilon"), indexed_source("b", "completely unrelated text about rockets")];

        let filter = SearchFilter { limit: 1, min_score: 0.9, ..SearchFilter::default() };
        let results = search(&sources, "alpha beta gamma", &filter);

        assert!(results.len() <= 1);
    }

    #[test]
    fn compose_single_pins_idea_count_to_one() {
        let sources = vec![indexed_source("s1", "some long enough source text about a topic")];
        let request = ComposeRequest::Single { source_ids: vec!["s1".to_string()] };

        let composed = compose(&sources, request, &FieldLimits::default()).unwrap();

        assert_eq!(composed.limits.min_ideas, 1);
        assert_eq!(composed.limits.max_ideas, 1);
        assert_eq!(composed.primary_source_ids, vec!["s1".to_string()]);
    }

    #[test]
    fn compose_multiple_pins_idea_count_to_n() {
        let sources = vec![indexed_source("s1", "some long enough source text about a topic")];
        let request = ComposeRequest::Multiple { source_ids: vec!["s1".to_string()], count: 4 };

        let composed = compose(&sources, request, &FieldLimits::default()).unwrap();

        assert_eq!(composed.limits.min_ideas, 4);
        assert_eq!(composed.limits.max_ideas, 4);
    }

    #[test]
    fn compose_unknown_source_id_fails() {
        let sources = vec![indexed_source("s1", "some long enough source text about a topic")];
        let request = ComposeRequest::Single { source_ids: vec!["does-not-exist".to_string()] };

        let err = compose(&sources, request, &FieldLimits::default()).unwrap_err();
        assert_eq!(err.kind(), "source-not-found");
    }

    #[test]
    fn compose_vision_records_matched_sources_and_vision_text() {
        let sources = vec![
            indexed_source("cooking", "a recipe for sourdough bread with yeast and flour and fermentation"),
            indexed_source("rockets", "orbital mechanics and rocket propulsion and thrust vector control"),
        ];
        let request = ComposeRequest::Vision { vision: "a post about baking bread at home".to_string() };

        let composed = compose(&sources, request, &FieldLimits::default()).unwrap();

        assert_eq!(composed.session.vision.as_deref(), Some("a post about baking bread at home"));
        assert_eq!(composed.primary_source_ids[0], "cooking");
        assert!(composed.source_text.contains("VISION:"));
    }

    #[test]
    fn compose_hybrid_support_keeps_augmented_sources_out_of_primary_attribution() {
        let sources = vec![
            indexed_source("user-picked", "a long enough piece of user selected source text about gardening"),
            indexed_source("augment-candidate", "a long enough piece of related source text also about gardening tools"),
        ];
        let request = ComposeRequest::Hybrid {
            source_ids: vec!["user-picked".to_string()],
            strategy: HybridStrategy::Support,
            hint_query: Some("gardening tools".to_string()),
            fill_target: None,
        };

        let composed = compose(&sources, request, &FieldLimits::default()).unwrap();

        assert_eq!(composed.primary_source_ids, vec!["user-picked".to_string()]);
        assert!(composed.supporting_source_ids.contains(&"augment-candidate".to_string()));
        assert!(composed.source_text.contains("augment-candidate") || composed.source_text.contains("gardening tools"));
    }
}
