//! Test helpers for integration tests
//!
//! Provides utilities for spawning test servers and making HTTP requests.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use member_api::{create_app, create_state_with};
use member_common::{AppConfig, API_KEY_HEADER};
use member_core::EmailMessage;
use member_db::sample_member;
use member_service::testing::{InMemoryMemberRepository, RecordingSender};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// API key configured on every test server
pub const TEST_API_KEY: &str = "integration-test-key";

/// Admin/sender address configured on every test server
pub const TEST_ADMIN_EMAIL: &str = "admin@yourdomain.com";

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    pub repo: Arc<InMemoryMemberRepository>,
    pub mailer: Arc<RecordingSender>,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a local-mode server seeded with the sample member
    pub async fn start() -> Result<Self> {
        Self::start_with(&[]).await
    }

    /// Start a gateway-mode server seeded with the sample member
    pub async fn start_gateway() -> Result<Self> {
        Self::start_with(&[
            ("DEPLOYMENT_MODE", "gateway"),
            ("DB_SECRET_ARN", "arn:aws:secretsmanager:us-east-1:000000000000:secret:test"),
        ])
        .await
    }

    /// Start a server with extra configuration variables
    pub async fn start_with(overrides: &[(&str, &str)]) -> Result<Self> {
        let config = test_config(overrides)?;
        let repo = Arc::new(InMemoryMemberRepository::with_members([sample_member()]));
        let mailer = Arc::new(RecordingSender::default());

        let state = create_state_with(config, repo.clone(), mailer.clone())?;
        let app = create_app(state)?;

        // Let the OS pick a free port
        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr,
            client,
            repo,
            mailer,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    fn with_key(&self, request: RequestBuilder) -> RequestBuilder {
        request.header(API_KEY_HEADER, TEST_API_KEY)
    }

    /// Make a GET request without credentials
    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.client.get(self.url(path)).send().await?)
    }

    /// Make a GET request with the API key
    pub async fn get_auth(&self, path: &str) -> Result<Response> {
        Ok(self.with_key(self.client.get(self.url(path))).send().await?)
    }

    /// Make a POST request with JSON body and no credentials
    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self.client.post(self.url(path)).json(body).send().await?)
    }

    /// Make a POST request with JSON body and the API key
    pub async fn post_auth<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self
            .with_key(self.client.post(self.url(path)))
            .json(body)
            .send()
            .await?)
    }

    /// Make a POST request with JSON body and a bearer token
    pub async fn post_bearer<T: Serialize>(&self, path: &str, token: &str, body: &T) -> Result<Response> {
        Ok(self
            .client
            .post(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await?)
    }

    /// Wait until at least `count` notifications were recorded
    pub async fn wait_for_mail(&self, count: usize) -> Result<Vec<EmailMessage>> {
        for _ in 0..100 {
            let sent = self.mailer.sent();
            if sent.len() >= count {
                return Ok(sent);
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        anyhow::bail!("expected {count} message(s), got {}", self.mailer.sent().len())
    }
}

/// Build a configuration from defaults plus `overrides`
///
/// The process environment is not consulted, so tests are hermetic.
pub fn test_config(overrides: &[(&str, &str)]) -> Result<AppConfig> {
    let mut vars: HashMap<&str, &str> = HashMap::from([
        ("API_KEY", TEST_API_KEY),
        ("NOTIFICATION_EMAIL", TEST_ADMIN_EMAIL),
        ("RATE_LIMIT_REQUESTS_PER_SECOND", "1000"),
        ("RATE_LIMIT_BURST", "1000"),
    ]);
    vars.extend(overrides.iter().copied());

    AppConfig::from_lookup(|key| vars.get(key).map(|v| (*v).to_string()))
        .map_err(|e| anyhow::anyhow!("Config error: {}", e))
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(response: Response, expected_status: StatusCode) -> Result<T> {
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
