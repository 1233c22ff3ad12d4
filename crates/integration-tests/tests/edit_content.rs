use integration_tests::TestServer;
use serde_json::{Value, json};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, ResponseTemplate};

async fn stub(server: &TestServer, body_contains: &str, content: Value) {
    let envelope = json!({ "choices": [{ "message": { "content": content.to_string() } }] });
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_string_contains(body_contains.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope))
        .mount(&server.llm)
        .await;
}

#[tokio::test]
async fn editing_an_existing_artifact_applies_the_instruction() {
    let server = TestServer::start().await;

    stub(&server, "librarian summarizing", json!({ "topics": ["bread", "baking"], "summary": "x".repeat(200) })).await;
    stub(
        &server,
        "content strategist",
        json!({ "ideas": [{ "content_type": "tweet", "title": "Hook", "snippet": "a hook", "hints": {} }] }),
    )
    .await;
    stub(
        &server,
        "turn a single content idea",
        json!({
            "content_type": "tweet",
            "content_id": "placeholder",
            "title": "Hook",
            "text": "Original tweet text about sourdough.",
            "thread": [],
            "tags": ["baking"],
            "call_to_action": null
        }),
    )
    .await;

    let source = json!({
        "kind": "raw",
        "title": "sourdough",
        "text": "a recipe for sourdough bread covering hydration, fermentation time, and oven temperature in careful detail"
    });
    let created: Value = server.client.post(server.url("/brain/sources/")).json(&source).send().await.unwrap().json().await.unwrap();
    let source_id = created["id"].as_str().unwrap().to_string();

    let generated: Value = server
        .client
        .post(server.url("/brain/generate/auto"))
        .json(&json!({ "source-ids": [source_id], "mode": "single" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let pieces = generated["content-pieces"].as_array().unwrap();
    assert_eq!(pieces.len(), 1);
    let content_piece_id = pieces[0]["content_id"].as_str().unwrap().to_string();

    stub(
        &server,
        "edit an existing social media artifact",
        json!({
            "content_type": "tweet",
            "content_id": "placeholder",
            "title": "Hook",
            "text": "Punchier tweet text about sourdough!",
            "thread": [],
            "tags": ["baking"],
            "call_to_action": null
        }),
    )
    .await;

    let edited: Value = server
        .client
        .post(server.url("/edit-content/"))
        .json(&json!({ "content-piece-id": content_piece_id, "edit-prompt": "make the hook punchier" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(edited["success"], true);
    assert_eq!(edited["edited"]["text"], "Punchier tweet text about sourdough!");
    assert!(edited["changes"].as_array().unwrap().iter().any(|c| c == "text changed"));
}

#[tokio::test]
async fn editing_an_unknown_content_piece_is_rejected() {
    let server = TestServer::start().await;

    let response = server
        .client
        .post(server.url("/edit-content/"))
        .json(&json!({ "content-piece-id": "does-not-exist", "edit-prompt": "anything" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
}
