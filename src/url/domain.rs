use url::Url;

/// Returns the authority used for same-host comparison: `host` or `host:port`
///
/// Default ports are omitted, so `https://example.com:443/` and
/// `https://example.com/` share an authority.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use site_crawler::url::authority;
///
/// let url = Url::parse("https://example.com/path").unwrap();
/// assert_eq!(authority(&url), Some("example.com".to_string()));
///
/// let url = Url::parse("http://127.0.0.1:8080/").unwrap();
/// assert_eq!(authority(&url), Some("127.0.0.1:8080".to_string()));
/// ```
pub fn authority(url: &Url) -> Option<String> {
    let host = url.host_str().filter(|h| !h.is_empty())?;
    Some(match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    })
}

/// Strips a single leading `www.` from a host
pub fn strip_www(host: &str) -> &str {
    host.strip_prefix("www.").unwrap_or(host)
}

/// Compares two authorities, ignoring a leading `www.` on either side
///
/// The comparison is otherwise exact; no case folding or IDN handling is
/// applied beyond what URL parsing already did.
pub fn is_same_domain(a: &str, b: &str) -> bool {
    strip_www(a) == strip_www(b)
}
