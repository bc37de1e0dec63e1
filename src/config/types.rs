use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for Lemme-Scrape
///
/// Every section has defaults, so an empty TOML document is a valid config.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub http: HttpConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Number of workers, which is also the cap on in-flight fetches
    #[serde(rename = "max-concurrency")]
    pub max_concurrency: usize,

    /// Deadline for the whole run, seed fetch included (milliseconds)
    #[serde(rename = "run-timeout-ms")]
    pub run_timeout_ms: u64,

    /// Deadline for each linked page fetch (milliseconds)
    #[serde(rename = "job-timeout-ms")]
    pub job_timeout_ms: u64,
}

impl CrawlerConfig {
    pub fn run_timeout(&self) -> Duration {
        Duration::from_millis(self.run_timeout_ms)
    }

    pub fn job_timeout(&self) -> Duration {
        Duration::from_millis(self.job_timeout_ms)
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_concurrency: 8,
            run_timeout_ms: 45_000,
            job_timeout_ms: 3_000,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,
}

impl UserAgentConfig {
    /// Formats the `User-Agent` header value: `CrawlerName/Version`
    pub fn header_value(&self) -> String {
        format!("{}/{}", self.crawler_name, self.crawler_version)
    }
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "LemmeScrapeIt".to_string(),
            crawler_version: "0.1".to_string(),
        }
    }
}

/// HTTP transport configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Client-wide timeout for a single request (milliseconds)
    #[serde(rename = "request-timeout-ms")]
    pub request_timeout_ms: u64,

    /// Timeout for establishing a connection (milliseconds)
    #[serde(rename = "connect-timeout-ms")]
    pub connect_timeout_ms: u64,

    /// Maximum idle pooled connections kept per host
    #[serde(rename = "pool-max-idle-per-host")]
    pub pool_max_idle_per_host: usize,

    /// How long an idle pooled connection is kept (milliseconds)
    #[serde(rename = "pool-idle-timeout-ms")]
    pub pool_idle_timeout_ms: u64,

    /// TCP keepalive interval (milliseconds)
    #[serde(rename = "tcp-keepalive-ms")]
    pub tcp_keepalive_ms: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            request_timeout_ms: 15_000,
            connect_timeout_ms: 10_000,
            pool_max_idle_per_host: 32,
            pool_idle_timeout_ms: 90_000,
            tcp_keepalive_ms: 30_000,
        }
    }
}
