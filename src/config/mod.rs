//! Configuration module for Lemme-Scrape
//!
//! This module handles loading, parsing, and validating TOML configuration.
//! A configuration file is optional: every setting has a default, and the
//! command line can override any of them.
//!
//! # Example
//!
//! ```no_run
//! use lemme_scrape::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("lemme-scrape.toml")).unwrap();
//! println!("Crawler will use {} workers", config.crawler.max_concurrency);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, HttpConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{load_config, parse_config};
pub use validation::validate;
