//! Output writer trait and error types

use crate::output::CrawlResult;
use crate::url::CrawlTarget;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize result: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Persists a finished crawl
pub trait ResultWriter {
    /// Writes `result` and returns the path written
    fn write(&self, result: &CrawlResult) -> OutputResult<PathBuf>;
}

/// File name stem for a crawl: the seed's `host[:port]`, with `:` replaced
///
/// # Examples
///
/// ```
/// use site_crawler::output::result_file_stem;
///
/// assert_eq!(result_file_stem("https://example.com/"), "example.com");
/// assert_eq!(result_file_stem("http://127.0.0.1:8080/"), "127.0.0.1_8080");
/// ```
pub fn result_file_stem(seed: &str) -> String {
    match CrawlTarget::parse(seed) {
        Ok(target) => target.authority().replace(':', "_"),
        Err(_) => "crawl".to_string(),
    }
}
