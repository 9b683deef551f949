//! Configuration module for Site-Crawler
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file. Every field has a default, so a crawl can run without
//! any file at all.
//!
//! # Example
//!
//! ```no_run
//! use site_crawler::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("crawler.toml")).unwrap();
//! println!("Fan-out: {}", config.crawler.max_concurrent_fetches);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, OutputConfig, TraversalOrder, UserAgentConfig};

// Re-export parser functions
pub use parser::{load_config, load_config_or_default, parse_config};
pub use validation::validate;
