use crate::url::domain::authority;
use crate::url::normalize::strip_trailing_slash;
use crate::{UrlError, UrlResult};
use std::fmt;
use url::Url;

/// An absolute http(s) URL that names one unit of crawl work
///
/// Construction guarantees a scheme and a host. Query and fragment are
/// dropped and a single trailing slash is removed from any path other than
/// `/`, so two targets compare equal exactly when they name the same page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CrawlTarget {
    url: Url,
}

impl CrawlTarget {
    /// Parses and canonicalizes a URL string
    ///
    /// # Examples
    ///
    /// ```
    /// use site_crawler::url::CrawlTarget;
    ///
    /// let target = CrawlTarget::parse("https://example.com/docs/#intro").unwrap();
    /// assert_eq!(target.as_str(), "https://example.com/docs");
    ///
    /// assert!(CrawlTarget::parse("example.com").is_err());
    /// ```
    pub fn parse(input: &str) -> UrlResult<Self> {
        let trimmed = input.trim();
        let url = Url::parse(trimmed).map_err(|e| UrlError::Parse {
            url: trimmed.to_string(),
            message: e.to_string(),
        })?;
        Self::from_url(url)
    }

    /// Builds a target from an already parsed URL
    pub fn from_url(mut url: Url) -> UrlResult<Self> {
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(UrlError::InvalidScheme(url.scheme().to_string()));
        }

        if authority(&url).is_none() {
            return Err(UrlError::MissingHost(url.to_string()));
        }

        url.set_fragment(None);
        url.set_query(None);
        let path = strip_trailing_slash(url.path()).to_string();
        url.set_path(&path);

        Ok(Self { url })
    }

    /// The canonical URL string
    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }

    /// The underlying parsed URL
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The host, without port
    pub fn host(&self) -> &str {
        self.url.host_str().unwrap_or_default()
    }

    /// `host[:port]` as used for same-domain comparison
    pub fn authority(&self) -> String {
        authority(&self.url).unwrap_or_default()
    }

    /// The canonical path
    pub fn path(&self) -> &str {
        self.url.path()
    }
}

impl fmt::Display for CrawlTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
