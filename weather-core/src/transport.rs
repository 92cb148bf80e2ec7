use std::{fmt::Debug, time::Duration};

use async_trait::async_trait;
use reqwest::{Client, Url};
use thiserror::Error;

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

/// The request never produced a reply (DNS, refused, TLS, timeout, broken body).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TransportError {
    pub message: String,
}

#[async_trait]
pub trait HttpTransport: Send + Sync + Debug {
    async fn get(&self, url: &Url) -> Result<HttpReply, TransportError>;
}

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let http = Client::builder().timeout(timeout).build().map_err(|e| TransportError {
            message: format!("Failed to build HTTP client: {e}"),
        })?;

        Ok(Self { http })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &Url) -> Result<HttpReply, TransportError> {
        let res = self.http.get(url.clone()).send().await.map_err(|e| TransportError {
            message: format!("Failed to send request: {}", describe(e)),
        })?;

        let status = res.status().as_u16();
        let body = res.text().await.map_err(|e| TransportError {
            message: format!("Failed to read response body: {}", describe(e)),
        })?;

        Ok(HttpReply { status, body })
    }
}

// reqwest embeds the full URL (api key included) in its Display output.
fn describe(err: reqwest::Error) -> String {
    let err = err.without_url();

    if err.is_timeout() {
        format!("timed out ({err})")
    } else if err.is_connect() {
        format!("connection failed ({err})")
    } else {
        err.to_string()
    }
}
