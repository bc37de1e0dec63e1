//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building the shared HTTP client with pooling and the crawler's user agent
//! - Single-attempt GET requests bounded by a job context
//! - Status validation and error classification
//! - Handing response bodies to the HTML parser

use crate::config::Config;
use crate::crawler::context::JobContext;
use crate::crawler::parser::Document;
use crate::FetchError;
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Client;
use std::time::Duration;

/// `Accept` header sent with every request, preferring HTML
pub const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// Source of parsed pages
///
/// The scheduler only talks to this trait, so tests can substitute an
/// instrumented implementation for the network.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetches and parses one page under the given job scope
    async fn fetch(&self, url: &str, ctx: &JobContext) -> Result<Document, FetchError>;
}

/// Builds an HTTP client with proper configuration
///
/// The client is shared by all workers; its connection pool is independent of
/// the scheduler's concurrency cap.
///
/// # Example
///
/// ```
/// use lemme_scrape::config::Config;
/// use lemme_scrape::crawler::build_http_client;
///
/// let client = build_http_client(&Config::default()).unwrap();
/// ```
pub fn build_http_client(config: &Config) -> Result<Client, reqwest::Error> {
    let http = &config.http;

    Client::builder()
        .user_agent(config.user_agent.header_value())
        .timeout(Duration::from_millis(http.request_timeout_ms))
        .connect_timeout(Duration::from_millis(http.connect_timeout_ms))
        .pool_max_idle_per_host(http.pool_max_idle_per_host)
        .pool_idle_timeout(Duration::from_millis(http.pool_idle_timeout_ms))
        .tcp_keepalive(Duration::from_millis(http.tcp_keepalive_ms))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetcher backed by a pooled `reqwest` client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Wraps an existing client
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds a client from the configuration and wraps it
    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        Ok(Self::new(build_http_client(config)?))
    }

    /// Issues the GET and parses the body
    ///
    /// # Request Flow
    ///
    /// | Condition | Result |
    /// |-----------|--------|
    /// | DNS, connect, TLS, client timeout | `FetchError::Request` |
    /// | Status outside 200..=299 | `FetchError::BadStatus` |
    /// | Body cannot be decoded | `FetchError::Parse` |
    /// | Body interrupted mid-read | `FetchError::Request` |
    /// | Otherwise | `Document` |
    ///
    /// The response is consumed by `text()` on success and dropped on every
    /// early return, which releases the connection.
    async fn get_document(&self, url: &str) -> Result<Document, FetchError> {
        let response = self
            .client
            .get(url)
            .header(ACCEPT, ACCEPT_HTML)
            .send()
            .await
            .map_err(|e| classify_request_error(url, &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::BadStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| {
            if e.is_decode() {
                FetchError::Parse {
                    url: url.to_string(),
                    message: e.to_string(),
                }
            } else {
                classify_request_error(url, &e)
            }
        })?;

        Ok(Document::parse(&body))
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str, ctx: &JobContext) -> Result<Document, FetchError> {
        ctx.bound(url, self.get_document(url)).await
    }
}

/// Classifies a transport error obtained before a usable response
fn classify_request_error(url: &str, error: &reqwest::Error) -> FetchError {
    let message = if error.is_timeout() {
        "client timeout".to_string()
    } else if error.is_connect() {
        format!("connection failed: {}", error)
    } else {
        error.to_string()
    };

    FetchError::Request {
        url: url.to_string(),
        message,
    }
}
