#![allow(dead_code)]

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use digihome_api::app::{router, AppState};
use digihome_api::database::MemoryStore;
use digihome_api::storage::LocalFileStorage;
use reqwest::StatusCode;
use serde_json::{json, Value};
use tempfile::TempDir;

/// In-process API server on a free port with a fresh in-memory store
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub client: reqwest::Client,
    pub store: Arc<MemoryStore>,
    pub uploads: TempDir,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if let Ok(resp) = self.client.get(self.url("/health")).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }
}

pub async fn spawn_server() -> Result<TestServer> {
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let base_url = format!("http://127.0.0.1:{}", port);

    let uploads = tempfile::tempdir()?;
    let mut config = digihome_api::config::config().clone();
    config.uploads.dir = uploads.path().to_path_buf();
    config.api.enable_request_logging = false;

    let store = Arc::new(MemoryStore::new());
    let files = LocalFileStorage::new(uploads.path(), config.uploads.url_prefix.clone());
    let app = router(AppState::new(store.clone(), Arc::new(files)), &config);

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port)).await?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    let server = TestServer { port, base_url, client: reqwest::Client::new(), store, uploads };
    server.wait_ready(Duration::from_secs(5)).await?;
    Ok(server)
}

/// Decode the response and return `(status, body)`
pub async fn read(res: reqwest::Response) -> Result<(StatusCode, Value)> {
    let status = res.status();
    let body = res.json::<Value>().await.unwrap_or(Value::Null);
    Ok((status, body))
}

/// `data` of a successful envelope; panics with the body otherwise
pub async fn data(res: reqwest::Response) -> Result<Value> {
    let (status, body) = read(res).await?;
    assert!(status.is_success(), "unexpected status {}: {}", status, body);
    assert_eq!(body["success"], true);
    Ok(body["data"].clone())
}

pub async fn create_owner(server: &TestServer, email: &str) -> Result<Value> {
    let res = server
        .client
        .post(server.url("/api/owner-portal"))
        .json(&json!({
            "address": "Storgata 1, 0155 Oslo",
            "name": "Kari Nordmann",
            "phone": "+47 912 34 567",
            "email": email,
            "password": "hemmelig123"
        }))
        .send()
        .await?;
    data(res).await
}
