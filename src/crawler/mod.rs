//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching and content fingerprinting
//! - HTML parsing and link extraction
//! - The frontier of pending pages
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod parser;
mod scheduler;

pub use coordinator::{Crawler, PageOutcome};
pub use fetcher::{
    build_http_client, ContentFingerprint, FetchError, HttpFetcher, PageContent, PageFetcher,
};
pub use parser::{extract_links, extract_links_from_html, ClassifiedLinks};
pub use scheduler::Frontier;

use crate::config::Config;
use crate::output::CrawlResult;

/// Runs a complete crawl over HTTP
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Validate the seed URL
/// 2. Build the HTTP client
/// 3. Fetch pages reachable from the seed on the same host
/// 4. Extract and follow links
/// 5. Return the aggregated link graph
///
/// # Arguments
///
/// * `seed` - Absolute http(s) URL to start from
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(CrawlResult)` - Crawl finished (possibly with dead links recorded)
/// * `Err(CrawlError)` - The seed or configuration was invalid, or the client
///   could not be built
pub async fn crawl(seed: &str, config: &Config) -> crate::Result<CrawlResult> {
    Crawler::from_config(config)?.crawl(seed).await
}
