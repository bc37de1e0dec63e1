//! Lemme-Scrape: a bounded-concurrency site crawler
//!
//! This crate fetches a seed page, extracts its title and links, keeps the
//! links that share the seed's origin, and fetches each of them under a capped
//! worker pool, reporting a title or an error for every page.

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod url;

use std::time::Duration;
use thiserror::Error;

/// Main error type for a crawl run
///
/// Only these errors abort a run. Failures of individual links are carried
/// inside [`state::PageResult`] instead.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid seed URL: {0}")]
    InvalidSeed(#[from] UrlError),

    #[error("Failed to fetch seed page: {0}")]
    SeedFetch(#[source] FetchError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Errors produced by a single fetch attempt
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("request failed for {url}: {message}")]
    Request { url: String, message: String },

    #[error("request for {url} timed out after {after:?}")]
    Timeout { url: String, after: Duration },

    #[error("request for {url} cancelled")]
    Cancelled { url: String },

    #[error("bad status for {url}: {status}")]
    BadStatus { url: String, status: u16 },

    #[error("failed to parse {url}: {message}")]
    Parse { url: String, message: String },
}

impl FetchError {
    /// The URL the failed fetch was aimed at
    pub fn url(&self) -> &str {
        match self {
            Self::Request { url, .. }
            | Self::Timeout { url, .. }
            | Self::Cancelled { url }
            | Self::BadStatus { url, .. }
            | Self::Parse { url, .. } => url,
        }
    }

    /// Describes the failure without repeating the URL
    pub fn cause(&self) -> String {
        match self {
            Self::Request { message, .. } => format!("request failed: {}", message),
            Self::Timeout { after, .. } => format!("timed out after {:?}", after),
            Self::Cancelled { .. } => "cancelled".to_string(),
            Self::BadStatus { status, .. } => format!("bad status: {}", status),
            Self::Parse { message, .. } => format!("parse error: {}", message),
        }
    }

    /// Returns true for failures that happened before a response was obtained
    pub fn is_request_error(&self) -> bool {
        matches!(
            self,
            Self::Request { .. } | Self::Timeout { .. } | Self::Cancelled { .. }
        )
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// URL-specific errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UrlError {
    #[error("Failed to parse URL '{input}': {reason}")]
    Parse { input: String, reason: String },

    #[error("Missing host in URL: {0}")]
    MissingHost(String),
}

/// Result type alias for crawl operations
pub type Result<T> = std::result::Result<T, CrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use crate::config::Config;
pub use crate::crawler::{CrawlOutcome, Crawler, HttpFetcher, RunContext};
pub use crate::output::{Aggregator, CrawlReport};
pub use crate::state::{PageOutcome, PageResult};
pub use crate::url::{dedupe, is_in_scope, resolve, LinkSet};
