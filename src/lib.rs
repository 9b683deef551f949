//! Site-Crawler: a same-host link mapper
//!
//! This crate crawls every page reachable from a seed URL on the seed's own
//! host, classifies each outbound reference as an internal page, an external
//! link or a media asset, and returns the aggregated link graph.

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Site-Crawler operations
///
/// Ordinary web friction (dead links, unreachable hosts, bad markup) never
/// surfaces here; it is contained inside the crawl and reported through the
/// result and the logs.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
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

/// URL construction errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL '{url}': {message}")]
    Parse { url: String, message: String },

    #[error("Invalid URL scheme '{0}', expected http or https")]
    InvalidScheme(String),

    #[error("Missing host in URL '{0}'")]
    MissingHost(String),
}

/// Result type alias for Site-Crawler operations
pub type Result<T> = std::result::Result<T, CrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{crawl, Crawler, HttpFetcher, PageFetcher};
pub use output::{CrawlResult, LinkMap};
pub use url::{CrawlTarget, LinkClass, NormalizedRef};
