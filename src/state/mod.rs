//! State module for crawl results
//!
//! This module defines the per-page outcome a worker emits after each fetch.

mod page_result;

// Re-export main types
pub use page_result::{PageOutcome, PageResult};
