//! Shared harness for booting a real ClipForge server against a mocked LLM backend.

use std::net::SocketAddr;
use std::time::Duration;

use config::Config;
use server::ServeConfig;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A running ClipForge server plus an HTTP client already pointed at it, and the
/// mocked LLM backend every generation call lands on.
pub struct TestServer {
    /// HTTP client pre-configured with this server's base URL.
    pub client: reqwest::Client,
    /// Base URL of the running server, e.g. `http://127.0.0.1:51234`.
    pub base_url: String,
    /// The mocked chat-completions backend.
    pub llm: MockServer,
    shutdown_signal: CancellationToken,
    _task: tokio::task::JoinHandle<()>,
}

impl TestServer {
    /// Start a server with default configuration against a freshly mocked LLM backend.
    pub async fn start() -> Self {
        Self::start_with(|_| {}).await
    }

    /// Start a server whose configuration has been adjusted by `mutate`, applied after
    /// the LLM backend and test API key are wired up but before the server binds.
    pub async fn start_with(mutate: impl FnOnce(&mut Config)) -> Self {
        let llm = MockServer::start().await;

        let mut config = Config::default();
        config.llm.base_url = llm.uri();
        config.llm.max_retries = 0;
        config.llm_api_key = Some("test-key".to_string());
        mutate(&mut config);

        let listener = TcpListener::bind("127.0.0.1:0").await.expect("failed to bind ephemeral port");
        let address = listener.local_addr().expect("listener has a local address");

        let shutdown_signal = CancellationToken::new();
        let serve_config = ServeConfig {
            listen_address: Some(address),
            config,
            shutdown_signal: shutdown_signal.clone(),
            version: "test".to_string(),
            bound_addr_sender: None,
        };

        let task = tokio::spawn(async move {
            // Drop the listener here, right before `serve` rebinds the same address,
            // to keep the window where nothing is listening as small as possible.
            drop(listener);

            if let Err(err) = server::serve(serve_config).await {
                panic!("test server failed: {err}");
            }
        });

        let base_url = format!("http://{address}");
        let client = reqwest::Client::new();

        wait_until_ready(&client, &base_url, address).await;

        Self { client, base_url, llm, shutdown_signal, _task: task }
    }

    /// Queue a chat-completions response returning `content` as the message body
    /// (already JSON-encoded, matching what the LLM Client expects inside the
    /// `choices[0].message.content` string).
    pub async fn stub_llm_response(&self, content: &serde_json::Value) {
        let envelope = serde_json::json!({ "choices": [{ "message": { "content": content.to_string() } }] });

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope))
            .mount(&self.llm)
            .await;
    }

    /// Build a full URL for `relative_path` against this server.
    pub fn url(&self, relative_path: &str) -> String {
        format!("{}{relative_path}", self.base_url)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown_signal.cancel();
    }
}

async fn wait_until_ready(client: &reqwest::Client, base_url: &str, address: SocketAddr) {
    for _ in 0..50 {
        if client.get(format!("{base_url}/content-config/default")).send().await.is_ok() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    panic!("server at {address} did not become ready in time");
}
