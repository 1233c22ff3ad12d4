use serde::Deserialize;

/// HTTP server settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Socket address to bind, e.g. `"127.0.0.1:8080"`.
    pub listen_address: String,
    /// When set, every request must carry a matching `X-Api-Key` header.
    ///
    /// `spec.md` §1 places authentication out of scope as an external collaborator's
    /// concern; this is the minimal gate that stands in for it.
    pub api_key: Option<String>,
    /// Database connection string; `None` selects the in-process reference
    /// [`repository`](../repository/index.html) implementation.
    pub database_url: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_address: "127.0.0.1:8080".to_string(),
            api_key: None,
            database_url: None,
        }
    }
}
