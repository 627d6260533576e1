//! TestServer - in-process end-to-end harness
//!
//! Each instance gets its own port, tray and history, so tests can run in
//! parallel without sharing state.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Result};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use tokio::task::JoinHandle;
use towerd::{Config, Server};

/// The fields of a roll response the scenarios look at
#[derive(Debug, Clone, Deserialize)]
pub struct Roll {
    pub id: String,
    pub notation: String,
    pub mode: String,
    pub total: i64,
    pub total_text: String,
    pub detail: String,
    pub dice: Vec<Value>,
    pub natural_20: bool,
    pub natural_1: bool,
}

/// Test harness that runs a towerd server on a random port
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    server: Arc<Server>,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server instance
    pub async fn start() -> Result<Self> {
        Self::start_with(Config::default()).await
    }

    /// Start with a custom config; the bind address is always replaced
    pub async fn start_with(mut config: Config) -> Result<Self> {
        // Find a random available port
        let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
        let addr = listener.local_addr()?;
        drop(listener);

        config.bind_addr = addr;
        let server = Arc::new(Server::new(config));
        let server_clone = server.clone();

        // Spawn the server in a background task
        let handle = tokio::spawn(async move {
            if let Err(e) = server_clone.run().await {
                eprintln!("Server error: {}", e);
            }
        });

        let client = Client::builder().timeout(Duration::from_secs(5)).build()?;

        // Poll until server is ready (max 2 seconds)
        let mut ready = false;
        for _ in 0..20 {
            tokio::time::sleep(Duration::from_millis(100)).await;
            if client
                .get(format!("http://{}/health", addr))
                .send()
                .await
                .is_ok()
            {
                ready = true;
                break;
            }
        }

        if !ready {
            bail!("Server failed to start within 2 seconds");
        }

        Ok(Self {
            addr,
            client,
            server,
            _handle: handle,
        })
    }

    /// Get the base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<reqwest::Response> {
        Ok(self
            .client
            .get(format!("{}{}", self.base_url(), path))
            .send()
            .await?)
    }

    /// Make a POST request without a body
    pub async fn post_empty(&self, path: &str) -> Result<reqwest::Response> {
        Ok(self
            .client
            .post(format!("{}{}", self.base_url(), path))
            .send()
            .await?)
    }

    /// Make a POST request with JSON body
    pub async fn post<T: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<reqwest::Response> {
        Ok(self
            .client
            .post(format!("{}{}", self.base_url(), path))
            .json(body)
            .send()
            .await?)
    }

    /// Make a PUT request with JSON body
    pub async fn put<T: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<reqwest::Response> {
        Ok(self
            .client
            .put(format!("{}{}", self.base_url(), path))
            .json(body)
            .send()
            .await?)
    }

    /// Click a die button, returning the tray
    pub async fn click_die(&self, faces: u32) -> Result<Value> {
        ok_json(self.post_empty(&format!("/tray/die/{}", faces)).await?).await
    }

    /// Click a preset button, returning the tray
    pub async fn preset(&self, id: &str) -> Result<Value> {
        ok_json(self.post_empty(&format!("/tray/preset/{}", id)).await?).await
    }

    /// Click clear, returning the tray
    pub async fn clear(&self) -> Result<Value> {
        ok_json(self.post_empty("/tray/clear").await?).await
    }

    /// Current tray state
    pub async fn tray(&self) -> Result<Value> {
        ok_json(self.get("/tray").await?).await
    }

    /// Click the roll button
    pub async fn roll_tray(&self) -> Result<Roll> {
        let resp = self.post_empty("/tray/roll").await?;
        Ok(serde_json::from_value(ok_json(resp).await?)?)
    }

    /// Type notation and press Enter
    pub async fn roll_notation(&self, notation: &str) -> Result<Roll> {
        let resp = self
            .post("/roll", &serde_json::json!({ "notation": notation }))
            .await?;
        Ok(serde_json::from_value(ok_json(resp).await?)?)
    }

    /// Click an advantage/disadvantage button
    pub async fn roll_special(&self, name: &str) -> Result<Roll> {
        let resp = self.post_empty(&format!("/roll/special/{}", name)).await?;
        Ok(serde_json::from_value(ok_json(resp).await?)?)
    }

    /// History entries, oldest first
    pub async fn history(&self) -> Result<Vec<Value>> {
        Ok(serde_json::from_value(ok_json(self.get("/history").await?).await?)?)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.server.shutdown();
    }
}

/// Parse a JSON body, failing on any non-200 status
async fn ok_json(resp: reqwest::Response) -> Result<Value> {
    let status = resp.status();
    let body: Value = resp.json().await?;
    if status != StatusCode::OK {
        bail!("Unexpected status {}: {}", status, body);
    }
    Ok(body)
}
