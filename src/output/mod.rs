//! Output module for crawl results
//!
//! This module handles:
//! - Aggregating per-page results into counts and an outcome list
//! - Rendering the report line by line while a run progresses

mod report;
pub mod stats;

pub use report::{Progress, ReportWriter};
pub use stats::{Aggregator, CrawlReport};
