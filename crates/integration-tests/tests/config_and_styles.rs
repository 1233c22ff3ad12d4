use integration_tests::TestServer;
use serde_json::Value;

#[tokio::test]
async fn default_and_current_field_limits_are_exposed() {
    let server = TestServer::start().await;

    let default_limits: Value = server.client.get(server.url("/content-config/default")).send().await.unwrap().json().await.unwrap();
    let current_limits: Value = server.client.get(server.url("/content-config/current")).send().await.unwrap().json().await.unwrap();

    assert_eq!(default_limits, current_limits);
    assert_eq!(default_limits["tweet_text_max"], 280);
}

#[tokio::test]
async fn style_presets_are_listed_and_individually_fetchable() {
    let server = TestServer::start().await;

    let names: Vec<String> = server.client.get(server.url("/content-styles/presets/")).send().await.unwrap().json().await.unwrap();
    assert!(names.contains(&"educational-content".to_string()));

    let preset: Value = server.client.get(server.url("/content-styles/presets/educational-content")).send().await.unwrap().json().await.unwrap();
    assert!(preset["target_audience"].is_string());
}

#[tokio::test]
async fn unknown_preset_returns_400() {
    let server = TestServer::start().await;

    let response = server.client.get(server.url("/content-styles/presets/does-not-exist")).send().await.unwrap();
    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"]["kind"], "invalid-preset");
}
