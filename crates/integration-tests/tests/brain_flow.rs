use integration_tests::TestServer;
use serde_json::{Value, json};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, ResponseTemplate};

async fn stub_indexing(server: &TestServer, topics: &[&str], summary: &str) {
    let envelope = json!({
        "choices": [{ "message": { "content": json!({ "topics": topics, "summary": summary }).to_string() } }]
    });

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_string_contains("librarian summarizing"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope))
        .mount(&server.llm)
        .await;
}

#[tokio::test]
async fn source_lifecycle_create_get_patch_delete() {
    let server = TestServer::start().await;
    stub_indexing(&server, &["gardening", "tools", "soil", "compost", "pruning"], &"a".repeat(200)).await;

    let create_body = json!({
        "kind": "raw",
        "title": "Gardening basics",
        "text": "a".repeat(200),
    });

    let created: Value = server.client.post(server.url("/brain/sources/")).json(&create_body).send().await.unwrap().json().await.unwrap();
    assert_eq!(created["topics"].as_array().unwrap().len(), 5);
    let id = created["id"].as_str().unwrap().to_string();

    let list: Value = server.client.get(server.url("/brain/sources/")).send().await.unwrap().json().await.unwrap();
    assert_eq!(list.as_array().unwrap().len(), 1);

    let fetched: Value = server.client.get(server.url(&format!("/brain/sources/{id}"))).send().await.unwrap().json().await.unwrap();
    assert_eq!(fetched["id"], id);

    let patched: Value = server
        .client
        .patch(server.url(&format!("/brain/sources/{id}")))
        .json(&json!({ "title": "Gardening for beginners" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(patched["title"], "Gardening for beginners");

    let delete_response = server.client.delete(server.url(&format!("/brain/sources/{id}"))).send().await.unwrap();
    assert_eq!(delete_response.status(), 200);

    let not_found = server.client.get(server.url(&format!("/brain/sources/{id}"))).send().await.unwrap();
    assert_eq!(not_found.status(), 404);
}

#[tokio::test]
async fn deleting_an_unknown_source_is_not_found() {
    let server = TestServer::start().await;
    let response = server.client.delete(server.url("/brain/sources/does-not-exist")).send().await.unwrap();
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn search_ranks_the_closer_source_first() {
    let server = TestServer::start().await;
    stub_indexing(&server, &["bread", "fermentation", "yeast", "flour", "dough"], &"x".repeat(200)).await;

    let cooking = json!({ "kind": "raw", "title": "cooking", "text": "a recipe for sourdough bread with yeast and flour and fermentation, repeated to pass the minimum length requirement for a source" });
    let rockets =
        json!({ "kind": "raw", "title": "rockets", "text": "orbital mechanics and rocket propulsion and thrust vector control, repeated to pass the minimum length requirement for a source" });

    let cooking_created: Value = server.client.post(server.url("/brain/sources/")).json(&cooking).send().await.unwrap().json().await.unwrap();
    server.client.post(server.url("/brain/sources/")).json(&rockets).send().await.unwrap();

    let cooking_id = cooking_created["id"].as_str().unwrap();

    let results: Value = server
        .client
        .post(server.url("/brain/search"))
        .json(&json!({ "query": "bread fermentation yeast" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let results = results.as_array().unwrap();
    assert!(!results.is_empty());
    assert_eq!(results[0]["source_id"], cooking_id);
}
