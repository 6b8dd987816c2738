//! Test helpers for integration tests
//!
//! Provides utilities for spawning test servers and making HTTP requests.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use qa_api::{create_app, create_app_state};
use qa_common::AppConfig;
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Secret shared by test servers and the fixtures that mint tokens
pub const TEST_JWT_SECRET: &str = "integration-test-secret-key";

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a server backed by the in-memory vote store
    pub async fn start() -> Result<Self> {
        Self::start_with_config(memory_config()?).await
    }

    /// Start a server backed by PostgreSQL (`DATABASE_URL` must be set)
    pub async fn start_postgres() -> Result<Self> {
        Self::start_with_config(postgres_config()?).await
    }

    /// Start a test server with custom config
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let state = create_app_state(config).await?;
        let app = create_app(state);

        // Port 0 lets the OS pick a free port
        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            addr,
            client,
            handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.get(&url).send().await?)
    }

    /// Make a GET request with auth token
    pub async fn get_auth(&self, path: &str, token: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.get(&url).bearer_auth(token).send().await?)
    }

    /// Make a POST request with JSON body
    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.post(&url).json(body).send().await?)
    }

    /// Make a POST request with auth token
    pub async fn post_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(body)
            .send()
            .await?)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn config_from(vars: &[(&str, &str)]) -> Result<AppConfig> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();

    AppConfig::from_lookup(|name| vars.get(name).cloned())
        .map_err(|e| anyhow::anyhow!("Config error: {e}"))
}

/// Configuration for an in-memory server with generous rate limits
pub fn memory_config() -> Result<AppConfig> {
    config_from(&[
        ("API_PORT", "0"),
        ("STORAGE_BACKEND", "memory"),
        ("JWT_SECRET", TEST_JWT_SECRET),
        ("RATE_LIMIT_REQUESTS_PER_SECOND", "1000"),
        ("RATE_LIMIT_BURST", "1000"),
    ])
}

/// Configuration for a PostgreSQL-backed server
pub fn postgres_config() -> Result<AppConfig> {
    dotenvy::dotenv().ok();
    let url = std::env::var("DATABASE_URL")?;
    let migrations = concat!(env!("CARGO_MANIFEST_DIR"), "/../../crates/qa-db/migrations");

    config_from(&[
        ("API_PORT", "0"),
        ("STORAGE_BACKEND", "postgres"),
        ("DATABASE_URL", &url),
        ("DATABASE_MIGRATIONS_DIR", migrations),
        ("JWT_SECRET", TEST_JWT_SECRET),
        ("RATE_LIMIT_REQUESTS_PER_SECOND", "1000"),
        ("RATE_LIMIT_BURST", "1000"),
    ])
}

/// Helper to check if a PostgreSQL test database is available
pub fn check_postgres_env() -> bool {
    dotenvy::dotenv().ok();
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("Skipping test: DATABASE_URL not set");
        return false;
    }
    true
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(())
}
