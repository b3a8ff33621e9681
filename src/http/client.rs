//! HTTP client for the history APIs
//!
//! Sends a JSON body to a path under a fixed base URL and decodes the JSON reply.

use reqwest::{Client, Method};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// HTTP client errors
#[derive(Error, Debug)]
pub enum HttpError {
    #[error("Failed to create HTTP client: {0}")]
    Client(String),

    #[error("Invalid HTTP method: {0}")]
    InvalidMethod(String),

    #[error("Request to {url} failed")]
    RequestFailed {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Timeout after {0:?} waiting for {1}")]
    Timeout(Duration, String),

    #[error("Connection refused to {0}")]
    ConnectionRefused(String),

    #[error("Response from {url} (status {status}) is not JSON: {message}")]
    InvalidJson {
        url: String,
        status: u16,
        message: String,
    },
}

/// Client bound to one service base URL
#[derive(Clone, Debug)]
pub struct HistoryClient {
    client: Client,
    base_url: String,
    timeout: Option<Duration>,
}

impl HistoryClient {
    /// Create a client for `base_url`; `timeout` of `None` waits indefinitely
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, HttpError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| HttpError::Client(e.to_string()))?;

        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        Ok(Self {
            client,
            base_url,
            timeout,
        })
    }

    /// Build full URL; one leading `/` on the edge is dropped since the base ends with one
    pub fn url_for(&self, edge: &str) -> String {
        let edge = edge.strip_prefix('/').unwrap_or(edge);
        format!("{}{}", self.base_url, edge)
    }

    /// Send `params` as the JSON body of a `method` request to `edge`
    ///
    /// The status code is not inspected: a JSON error body is returned like
    /// any other body so both services' error replies get compared too.
    pub async fn perform_request(
        &self,
        method: &str,
        edge: &str,
        params: &Value,
    ) -> Result<Value, HttpError> {
        let method = Method::from_bytes(method.trim().to_uppercase().as_bytes())
            .map_err(|_| HttpError::InvalidMethod(method.to_string()))?;
        let url = self.url_for(edge);
        debug!("Sending {} request to {}", method, url);

        let response = self
            .client
            .request(method, &url)
            .json(params)
            .send()
            .await
            .map_err(|e| self.classify(e, &url))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| self.classify(e, &url))?;

        debug!(
            "Response: {} {} ({} bytes)",
            status.as_u16(),
            status.canonical_reason().unwrap_or(""),
            body.len()
        );

        serde_json::from_slice(&body).map_err(|e| HttpError::InvalidJson {
            url,
            status: status.as_u16(),
            message: e.to_string(),
        })
    }

    fn classify(&self, e: reqwest::Error, url: &str) -> HttpError {
        if e.is_timeout() {
            HttpError::Timeout(self.timeout.unwrap_or_default(), url.to_string())
        } else if e.is_connect() {
            HttpError::ConnectionRefused(url.to_string())
        } else {
            HttpError::RequestFailed {
                url: url.to_string(),
                source: e,
            }
        }
    }
}
