use integration_tests::TestServer;
use reqwest::multipart::{Form, Part};
use serde_json::{Value, json};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, ResponseTemplate};

async fn stub_indexing(server: &TestServer) {
    let content = json!({
        "topics": ["sourdough", "fermentation", "baking", "hydration", "starters"],
        "summary": "An article about sourdough starters, covering hydration ratios, ambient \
            temperature, and feeding schedules across several days of fermentation."
    });
    let envelope = json!({ "choices": [{ "message": { "content": content.to_string() } }] });

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_string_contains("librarian summarizing"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope))
        .mount(&server.llm)
        .await;
}

async fn stub_ideation(server: &TestServer) {
    let content = json!({
        "ideas": [
            { "content_type": "tweet", "title": "Hook", "snippet": "a hook", "hints": {} },
            { "content_type": "reel", "title": "Script", "snippet": "a script", "hints": {} }
        ]
    });
    let envelope = json!({ "choices": [{ "message": { "content": content.to_string() } }] });

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_string_contains("content strategist"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope))
        .mount(&server.llm)
        .await;
}

async fn stub_materialization(server: &TestServer) {
    let tweet = json!({
        "content_type": "tweet",
        "content_id": "placeholder",
        "title": "Hook",
        "text": "A punchy tweet about the article.",
        "thread": [],
        "tags": ["content"],
        "call_to_action": null
    });
    let reel = json!({
        "content_type": "reel",
        "content_id": "placeholder",
        "title": "Script",
        "caption": "A reel caption",
        "hook": "Did you know...",
        "script": "Full script body here.",
        "visual_suggestions": null,
        "tags": ["content"],
        "call_to_action": null,
        "estimated_duration_seconds": null,
        "music_suggestion": null
    });

    for body in [tweet, reel] {
        let envelope = json!({ "choices": [{ "message": { "content": body.to_string() } }] });
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_string_contains("turn a single content idea"))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope))
            .mount(&server.llm)
            .await;
    }
}

#[tokio::test]
async fn uploading_a_document_produces_ideas_and_content() {
    let server = TestServer::start().await;
    stub_indexing(&server).await;
    stub_ideation(&server).await;
    stub_materialization(&server).await;

    let text = "This article explains how sourdough starters ferment over several days, \
        covering hydration ratios, ambient temperature, and feeding schedules in detail."
        .repeat(2);

    let part = Part::bytes(text.into_bytes()).file_name("article.txt").mime_str("text/plain").unwrap();
    let form = Form::new().part("file", part);

    let response = server.client.post(server.url("/process-document/")).multipart(form).send().await.unwrap();
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["title"], "article");
    assert_eq!(body["ideas"].as_array().unwrap().len(), 2);
    assert_eq!(body["content-pieces"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn uploading_an_unsupported_extension_is_rejected() {
    let server = TestServer::start().await;

    let part = Part::bytes(b"hello there".to_vec()).file_name("notes.rtf").mime_str("application/rtf").unwrap();
    let form = Form::new().part("file", part);

    let response = server.client.post(server.url("/process-document/")).multipart(form).send().await.unwrap();
    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"]["kind"], "unsupported-format");
}
