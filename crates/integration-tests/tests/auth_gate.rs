use integration_tests::TestServer;

#[tokio::test]
async fn requests_without_a_matching_api_key_are_rejected() {
    let server = TestServer::start_with(|config| config.server.api_key = Some("secret-key".to_string())).await;

    let unauthenticated = server.client.get(server.url("/content-config/default")).send().await.unwrap();
    assert_eq!(unauthenticated.status(), 401);

    let wrong_key = server.client.get(server.url("/content-config/default")).header("x-api-key", "nope").send().await.unwrap();
    assert_eq!(wrong_key.status(), 401);

    let authenticated = server.client.get(server.url("/content-config/default")).header("x-api-key", "secret-key").send().await.unwrap();
    assert_eq!(authenticated.status(), 200);
}

#[tokio::test]
async fn no_api_key_configured_means_open_access() {
    let server = TestServer::start().await;

    let response = server.client.get(server.url("/content-config/default")).send().await.unwrap();
    assert_eq!(response.status(), 200);
}
