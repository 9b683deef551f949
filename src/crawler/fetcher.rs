//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients with proper user agent strings and timeouts
//! - GET requests to fetch page content
//! - Content fingerprinting for duplicate detection
//! - Error classification (dead link vs. everything else)

use crate::config::Config;
use crate::url::CrawlTarget;
use async_trait::async_trait;
use reqwest::{redirect::Policy, Client, StatusCode};
use sha2::{Digest, Sha256};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Maximum redirect hops followed for a single fetch
const MAX_REDIRECTS: usize = 10;

/// Hex-encoded SHA-256 digest of a page body
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentFingerprint(String);

impl ContentFingerprint {
    /// Computes the fingerprint of `body`
    pub fn of(body: &[u8]) -> Self {
        Self(hex::encode(Sha256::digest(body)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A successfully fetched page
#[derive(Debug, Clone)]
pub struct PageContent {
    /// Page body, decoded as UTF-8 (lossily); empty for non-HTML responses
    pub body: String,
    /// Fingerprint of the raw body bytes
    pub fingerprint: ContentFingerprint,
    /// HTTP status code
    pub status_code: u16,
    /// Final URL after redirects
    pub final_url: String,
    /// `Content-Type` header, when the server sent one
    pub content_type: Option<String>,
}

impl PageContent {
    /// Wraps a body, computing its fingerprint
    pub fn new(body: String, status_code: u16, final_url: impl Into<String>) -> Self {
        let fingerprint = ContentFingerprint::of(body.as_bytes());
        Self {
            body,
            fingerprint,
            status_code,
            final_url: final_url.into(),
            content_type: None,
        }
    }

    /// Wraps raw response bytes; the fingerprint covers the bytes as received
    pub fn from_bytes(bytes: &[u8], status_code: u16, final_url: impl Into<String>) -> Self {
        Self {
            body: String::from_utf8_lossy(bytes).into_owned(),
            fingerprint: ContentFingerprint::of(bytes),
            status_code,
            final_url: final_url.into(),
            content_type: None,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Returns true if the page should be parsed for links
    ///
    /// A missing `Content-Type` is treated as HTML.
    pub fn is_html(&self) -> bool {
        self.content_type
            .as_deref()
            .map_or(true, is_html_content_type)
    }
}

fn is_html_content_type(content_type: &str) -> bool {
    content_type.to_ascii_lowercase().contains("html")
}

/// Why a fetch produced no usable page
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Server answered with a non-success status
    #[error("HTTP {status_code} for {url}")]
    Status { url: String, status_code: u16 },

    /// Request exceeded the per-fetch timeout
    #[error("Request timeout for {url}")]
    Timeout { url: String },

    /// Connection, TLS, redirect or body read failure
    #[error("Transport error for {url}: {message}")]
    Transport { url: String, message: String },
}

impl FetchError {
    /// The HTTP status code, when the server answered
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }

    /// Returns true if the failure marks a dead link (HTTP 404)
    pub fn is_dead_link(&self) -> bool {
        self.status_code() == Some(StatusCode::NOT_FOUND.as_u16())
    }
}

/// Source of page content for the traversal engine
///
/// Implementations must not cache: every call performs a fresh fetch.
/// Deduplication is the engine's job.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, target: &CrawlTarget) -> Result<PageContent, FetchError>;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The crawler configuration (user agent and timeouts)
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use site_crawler::config::Config;
/// use site_crawler::crawler::build_http_client;
///
/// let client = build_http_client(&Config::default()).unwrap();
/// ```
pub fn build_http_client(config: &Config) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.header_value())
        .timeout(Duration::from_secs(config.crawler.fetch_timeout_secs))
        .connect_timeout(Duration::from_secs(config.crawler.connect_timeout_secs))
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()
}

/// `PageFetcher` backed by a `reqwest` client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Builds a fetcher with a client configured from `config`
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        Ok(Self::with_client(build_http_client(config)?))
    }

    /// Wraps an existing client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    /// Fetches a URL and classifies the outcome
    ///
    /// | Condition | Result |
    /// |-----------|--------|
    /// | 2xx with HTML (or no) Content-Type | `Ok(PageContent)` with the body |
    /// | 2xx with other Content-Type | `Ok(PageContent)`, empty body, not downloaded |
    /// | HTTP 404 | `Status` (dead link) |
    /// | Any other non-2xx | `Status` |
    /// | Timeout | `Timeout` |
    /// | Connection refused, TLS, redirect limit | `Transport` |
    async fn fetch(&self, target: &CrawlTarget) -> Result<PageContent, FetchError> {
        let url = target.as_str();

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify_transport_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status_code: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let final_url = response.url().to_string();

        let page = match content_type.as_deref() {
            Some(ct) if !is_html_content_type(ct) => {
                tracing::debug!("Not downloading {} body of {}", ct, url);
                PageContent::from_bytes(&[], status.as_u16(), final_url)
            }
            _ => {
                let bytes = response
                    .bytes()
                    .await
                    .map_err(|e| classify_transport_error(url, e))?;
                PageContent::from_bytes(&bytes, status.as_u16(), final_url)
            }
        };

        Ok(match content_type {
            Some(ct) => page.with_content_type(ct),
            None => page,
        })
    }
}

fn classify_transport_error(url: &str, error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else if error.is_connect() {
        FetchError::Transport {
            url: url.to_string(),
            message: "Connection refused".to_string(),
        }
    } else {
        FetchError::Transport {
            url: url.to_string(),
            message: error.to_string(),
        }
    }
}
