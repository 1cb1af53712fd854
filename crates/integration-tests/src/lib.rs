//! Integration tests for AutoPulse.
//!
//! Each test boots the real router on an ephemeral port over a temporary
//! data directory and talks to it over HTTP. Servers run in safe mode (no
//! SMTP) unless a test passes SMTP variables to [`TestServer::start_with`].
//!
//! ```bash
//! cargo test -p autopulse-integration-tests
//! ```

use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use autopulse_server::{AppState, ServiceConfig, app};
use reqwest::{Client, Response};
use serde_json::Value;
use tempfile::TempDir;
use tokio::task::JoinHandle;

/// A running server and the client that talks to it.
pub struct TestServer {
    pub client: Client,
    addr: SocketAddr,
    data_dir: TempDir,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a server over a fresh, empty data directory.
    ///
    /// # Panics
    ///
    /// Panics if the server cannot be started.
    pub async fn start() -> Self {
        let data_dir = tempfile::tempdir().expect("Failed to create data directory");
        Self::start_in(data_dir).await
    }

    /// Start a server over a prepared data directory.
    ///
    /// # Panics
    ///
    /// Panics if the server cannot be started.
    pub async fn start_in(data_dir: TempDir) -> Self {
        Self::start_in_with(data_dir, &[]).await
    }

    /// Start a server over a fresh data directory with extra environment.
    ///
    /// # Panics
    ///
    /// Panics if the server cannot be started.
    pub async fn start_with(env: &[(&str, &str)]) -> Self {
        let data_dir = tempfile::tempdir().expect("Failed to create data directory");
        Self::start_in_with(data_dir, env).await
    }

    async fn start_in_with(data_dir: TempDir, env: &[(&str, &str)]) -> Self {
        let mut vars: HashMap<String, String> = env
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        vars.insert(
            "AUTOPULSE_DATA_DIR".to_string(),
            data_dir.path().display().to_string(),
        );
        let config = ServiceConfig::from_lookup(|key| vars.get(key).cloned())
            .expect("Failed to build configuration");
        let state = AppState::new(config)
            .await
            .expect("Failed to create application state");

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to address");
        let addr = listener.local_addr().expect("Listener has no address");
        let handle = tokio::spawn(async move {
            axum::serve(listener, app(state))
                .await
                .expect("Server error");
        });

        Self {
            client: Client::new(),
            addr,
            data_dir,
            handle,
        }
    }

    /// Absolute URL for a path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// The data directory the server writes to.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        self.data_dir.path()
    }

    /// Path of a collection file.
    #[must_use]
    pub fn collection_path(&self, file_name: &str) -> PathBuf {
        self.data_dir.path().join(file_name)
    }

    /// `GET` a path.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be sent.
    pub async fn get(&self, path: &str) -> Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("Request failed")
    }

    /// `GET` a path and decode the JSON body.
    ///
    /// # Panics
    ///
    /// Panics if the request fails or the body is not JSON.
    pub async fn get_json(&self, path: &str) -> Value {
        self.get(path).await.json().await.expect("Body is not JSON")
    }

    /// `POST` a JSON body to `/api/feedback`.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be sent.
    pub async fn submit(&self, body: &Value) -> Response {
        self.client
            .post(self.url("/api/feedback"))
            .json(body)
            .send()
            .await
            .expect("Request failed")
    }
}

/// A local port with nothing listening on it.
///
/// # Panics
///
/// Panics if no ephemeral port can be bound.
#[must_use]
pub fn closed_port() -> u16 {
    std::net::TcpListener::bind("127.0.0.1:0")
        .and_then(|listener| listener.local_addr())
        .map(|addr| addr.port())
        .expect("Failed to reserve a port")
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
