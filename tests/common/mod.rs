#![allow(dead_code)]

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

use product_api::api;
use product_api::config::AppConfig;
use product_api::state::AppState;

/// A server with its own in-memory database, bound to a free local port.
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub client: Client,
    task: tokio::task::JoinHandle<()>,
}

impl TestServer {
    pub async fn spawn() -> Result<Self> {
        Self::spawn_with(AppConfig::in_memory()).await
    }

    pub async fn spawn_with(mut config: AppConfig) -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        config.server.port = port;
        let base_url = format!("http://127.0.0.1:{}", port);

        let state = AppState::connect(config.clone()).await.context("failed to open database")?;
        let listener = tokio::net::TcpListener::bind(config.bind_addr())
            .await
            .context("failed to bind test listener")?;

        let task = tokio::spawn(async move {
            let _ = axum::serve(listener, api::app(state)).await;
        });

        let server = Self {
            port,
            base_url,
            client: Client::new(),
            task,
        };
        server.wait_ready(Duration::from_secs(5)).await?;
        Ok(server)
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

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn login(&self) -> Result<String> {
        let body: Value = self
            .client
            .post(self.url("/login"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        body["access_token"]
            .as_str()
            .map(str::to_string)
            .context("login response missing access_token")
    }

    /// Create a product and return the stored record.
    pub async fn create_product(&self, token: &str, title: &str, price: f64) -> Result<Value> {
        let res = self
            .client
            .post(self.url("/products"))
            .bearer_auth(token)
            .json(&json!({
                "title": title,
                "description": format!("{} description", title),
                "price": price,
            }))
            .send()
            .await?;

        anyhow::ensure!(res.status() == StatusCode::CREATED, "create returned {}", res.status());
        Ok(res.json().await?)
    }

    pub async fn list_products(&self, token: &str, query: &str) -> Result<Vec<Value>> {
        let res = self
            .client
            .get(self.url(&format!("/products{}", query)))
            .bearer_auth(token)
            .send()
            .await?
            .error_for_status()?;
        Ok(res.json().await?)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}
