//! Integration tests for the Monster Wash CRM.
//!
//! Each test spawns the full CRM app on an ephemeral port, backed by a lead
//! file in a fresh temporary directory, and talks to it over HTTP.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p monster-wash-integration-tests
//! ```

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use reqwest::Client;
use tempfile::TempDir;

use monster_wash_crm::config::CrmConfig;
use monster_wash_crm::routes;
use monster_wash_crm::state::AppState;
use monster_wash_crm::store::SeedPolicy;

/// A running CRM server with its own lead file.
pub struct TestServer {
    addr: SocketAddr,
    data_file: PathBuf,
    _dir: TempDir,
}

impl TestServer {
    /// Start a server with the default configuration.
    ///
    /// # Panics
    ///
    /// Panics if the server cannot be started.
    pub async fn start() -> Self {
        Self::start_with(|_| {}).await
    }

    /// Start a server after applying `configure` to the default configuration.
    ///
    /// # Panics
    ///
    /// Panics if the server cannot be started.
    pub async fn start_with(configure: impl FnOnce(&mut CrmConfig)) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let data_file = dir.path().join("customer_data.csv");

        let mut config = CrmConfig::from_lookup(|_| None).expect("Failed to build config");
        config.data_file.clone_from(&data_file);
        config.seed = SeedPolicy::Empty;
        configure(&mut config);

        let state = AppState::from_config(config).expect("Failed to create application state");
        let app = routes::app(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to address");
        let addr = listener.local_addr().expect("Failed to read local address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Server error");
        });

        Self {
            addr,
            data_file,
            _dir: dir,
        }
    }

    /// Absolute URL for `path` on this server.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// The lead file backing this server.
    #[must_use]
    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    /// A client with its own cookie jar, so each one is a separate browser.
    ///
    /// # Panics
    ///
    /// Panics if the client cannot be built.
    #[must_use]
    pub fn client(&self) -> Client {
        Client::builder()
            .cookie_store(true)
            .build()
            .expect("Failed to create HTTP client")
    }

    /// A client already logged in as `username`.
    ///
    /// # Panics
    ///
    /// Panics if the login request fails or is rejected.
    pub async fn login(&self, username: &str, password: &str) -> Client {
        let client = self.client();
        let resp = client
            .post(self.url("/auth/login"))
            .form(&[("username", username), ("password", password)])
            .send()
            .await
            .expect("Failed to send login request");
        assert!(
            resp.status().is_success(),
            "login as {username} failed: {}",
            resp.status()
        );
        client
    }
}
