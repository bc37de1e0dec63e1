//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - Run-wide and per-job cancellation scopes
//! - HTTP fetching with status validation and error classification
//! - HTML parsing into a queryable document
//! - The bounded worker-pool scheduler
//! - Overall crawl coordination

mod context;
mod coordinator;
mod fetcher;
mod parser;
mod scheduler;

pub use context::{JobContext, RunContext};
pub use coordinator::{run_crawl, CrawlOutcome, Crawler};
pub use fetcher::{build_http_client, Fetcher, HttpFetcher, ACCEPT_HTML};
pub use parser::Document;
pub use scheduler::{CrawlJob, JobQueue, Scheduler};
