//! reqwest-backed transport.

use super::{Connector, PostTransport};
use crate::error::{RequestFailure, ServiceError};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

/// Opens one [`HttpTransport`] (one reqwest client) per invocation.
#[derive(Debug, Clone)]
pub struct HttpConnector {
    base_url: String,
    request_timeout: Duration,
    connect_timeout: Duration,
}

impl HttpConnector {
    pub fn new(base_url: impl Into<String>, request_timeout: Duration, connect_timeout: Duration) -> Self {
        Self {
            base_url: base_url.into(),
            request_timeout,
            connect_timeout,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Connector for HttpConnector {
    fn connect(&self) -> Result<Box<dyn PostTransport>, ServiceError> {
        let client = Client::builder()
            .connect_timeout(self.connect_timeout)
            .build()
            .map_err(|e| ServiceError::HttpClient(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Box::new(HttpTransport {
            client,
            base_url: self.base_url.clone(),
            request_timeout: self.request_timeout,
        }))
    }
}

/// A single transport scope; dropped when the invocation finishes.
pub struct HttpTransport {
    client: Client,
    base_url: String,
    request_timeout: Duration,
}

#[async_trait]
impl PostTransport for HttpTransport {
    async fn post(&self, path: &str, body: &Value) -> Result<Value, RequestFailure> {
        let url = join_url(&self.base_url, path);
        let response = self
            .client
            .post(&url)
            .timeout(self.request_timeout)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(RequestFailure::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| RequestFailure::Decode(e.to_string()))
    }
}

/// Join base URL and path with exactly one slash between them.
pub fn join_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
