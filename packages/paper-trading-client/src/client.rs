//! reqwest-backed transport for the paper-trading backend.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::transport::HttpTransport;
use crate::{Error, Result};

/// HTTP client for the paper-trading backend
#[derive(Debug, Clone)]
pub struct RestClient {
    base_url: String,
    client: Client,
    token: Option<String>,
}

impl RestClient {
    /// Create a new client with the given base URL
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
            token: None,
        }
    }

    /// Build a client from loaded configuration
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        if config.base_url.trim().is_empty() {
            return Err(Error::Config("base_url must not be empty".to_string()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
            token: config.token.clone(),
        })
    }

    /// Send a bearer token with every request
    pub fn with_token(mut self, token: String) -> Self {
        self.token = Some(token);
        self
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, mut request: RequestBuilder) -> Result<Value> {
        if let Some(ref token) = self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl HttpTransport for RestClient {
    type Response = Value;
    type Error = Error;

    async fn get(&self, path: &str) -> Result<Value> {
        self.send(self.client.get(self.url(path))).await
    }

    async fn post<B>(&self, path: &str, body: &B) -> Result<Value>
    where
        B: Serialize + Sync + ?Sized,
    {
        self.send(self.client.post(self.url(path)).json(body)).await
    }
}
