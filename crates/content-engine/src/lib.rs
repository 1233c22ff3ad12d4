//! The two-stage LLM content-generation pipeline: ideation, materialization, and
//! post-hoc editing.

#![deny(missing_docs)]

mod editor;
mod ideation;
mod materialization;
mod validate;

pub use editor::{EditOutcome, edit};
pub use ideation::generate as generate_ideas;
pub use materialization::materialize;

#[cfg(test)]
mod tests {
    use super::*;
    use config::{FieldLimits, StyleBlock};
    use model::{ContentArtifact, ContentType};
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn style() -> StyleBlock {
        StyleBlock::custom("creators", "follow for more", "grow an audience")
    }

    fn llm_against(base_url: String) -> llm_client::LlmClient {
        let mut config = config::LlmConfig::default();
        config.base_url = base_url;
        config.max_retries = 0;
        let rate_limiter = rate_limit::RateLimiter::new(config.rate_limit);
        llm_client::LlmClient::new(&config, "test-key".to_string(), rate_limiter)
    }

    async fn stub_completion(server: &MockServer, content: &serde_json::Value) {
        let envelope = json!({ "choices": [{ "message": { "content": content.to_string() } }] });

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn ideation_survives_one_malformed_idea() {
        let server = MockServer::start().await;
        stub_completion(
            &server,
            &json!({
                "ideas": [
                    {"content_type": "reel", "title": "a", "snippet": "s"},
                    {"content_type": "tweet", "title": "b", "snippet": "s"},
                    {"content_type": "not-a-type", "title": "c", "snippet": "s"},
                    {"content_type": "image-carousel", "title": "d", "snippet": "s"},
                    {"content_type": "reel", "title": "e", "snippet": "s"},
                    {"content_type": "tweet", "title": "f", "snippet": "s"},
                ]
            }),
        )
        .await;

        let llm = llm_against(server.uri());
        let limits = FieldLimits::default();
        let ideas = generate_ideas(&llm, "source text long enough to pass validation", &style(), &limits).await.unwrap();

        assert_eq!(ideas.len(), 5);
    }

    #[tokio::test]
    async fn materialization_assigns_sequential_content_ids_per_type() {
        let server = MockServer::start().await;
        stub_completion(
            &server,
            &json!({ "title": "t", "text": "short tweet text", "thread": [], "tags": [], "call_to_action": null }),
        )
        .await;

        let llm = llm_against(server.uri());
        let limits = FieldLimits::default();
        let ideas = vec![
            model::ContentIdea { content_type: ContentType::Tweet, title: "a".to_string(), snippet: "s".to_string(), hints: Default::default() },
            model::ContentIdea { content_type: ContentType::Tweet, title: "b".to_string(), snippet: "s".to_string(), hints: Default::default() },
        ];

        let artifacts = materialize(&llm, &ideas, "source-1", "source text", &style(), &limits).await.unwrap();

        assert_eq!(artifacts.len(), 2);
        assert_eq!(artifacts[0].content_id(), "source-1_tweet_001");
        assert_eq!(artifacts[1].content_id(), "source-1_tweet_002");
    }

    #[tokio::test]
    async fn editing_an_artifact_produces_a_field_diff() {
        let server = MockServer::start().await;
        stub_completion(
            &server,
            &json!({ "title": "t", "text": "a punchier tweet", "thread": [], "tags": [], "call_to_action": null }),
        )
        .await;

        let llm = llm_against(server.uri());
        let limits = FieldLimits::default();
        let before = ContentArtifact::Tweet(model::Tweet {
            content_id: "source-1_tweet_001".to_string(),
            title: "t".to_string(),
            text: "a plain tweet".to_string(),
            thread: vec![],
            tags: vec![],
            call_to_action: None,
        });

        let outcome = edit(&llm, before, &limits, "make it punchier").await.unwrap();
        assert!(outcome.changes.contains(&"text changed".to_string()));
    }
}
