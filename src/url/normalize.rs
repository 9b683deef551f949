use crate::url::domain::{authority, is_same_domain};
use crate::url::target::CrawlTarget;
use crate::url::LinkClass;
use url::{ParseError, Url};

/// Image extensions classified as media
const IMAGE_EXTENSIONS: &[&str] = &["gif", "jpg", "jpeg", "tiff", "png", "bmp", "svg"];

/// Script and stylesheet extensions, never recorded
const SCRIPT_STYLE_EXTENSIONS: &[&str] = &["js", "css"];

/// A classified reference with its canonical URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRef {
    pub class: LinkClass,
    pub url: String,
}

/// Why a reference was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// `#section` style same-page anchor
    Fragment,
    /// Nothing left once query and fragment are removed
    EmptyPath,
    /// `.js` or `.css` asset
    ScriptOrStyle,
    /// `data:`, `mailto:`, `javascript:` and any other non-http(s) scheme
    NonHttpScheme,
    /// Points back at the page it was found on
    SelfLink,
    /// Could not be parsed or resolved
    Malformed,
}

/// Outcome of normalizing one raw reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Normalized {
    Link(NormalizedRef),
    Ignored(IgnoreReason),
}

impl Normalized {
    /// Returns the classified link, if the reference was kept
    pub fn link(self) -> Option<NormalizedRef> {
        match self {
            Self::Link(link) => Some(link),
            Self::Ignored(_) => None,
        }
    }

    fn keep(class: LinkClass, url: String) -> Self {
        Self::Link(NormalizedRef { class, url })
    }
}

/// Normalizes and classifies a raw `href`/`src` value found on `base`
///
/// # Rules (applied in order)
///
/// 1. Pure fragments (`#...`) are ignored
/// 2. The reference's own path is taken without query or fragment
/// 3. An empty own path is ignored
/// 4. A single trailing `/` is stripped unless the path is `/`
/// 5. `.js` / `.css` paths are ignored
/// 6. Non-http(s) schemes (`data:`, `mailto:`, ...) are ignored
/// 7. Image paths are media, always made absolute
/// 8. References with an explicit host other than the base host (ignoring
///    `www.`) are external and keep the reference as written
/// 9. A reference resolving to the base page's own path is ignored
/// 10. Everything else is internal, resolved against `base`
///
/// Internal and media URLs lose their query and fragment, so
/// `/page?x=1` and `/page` share one identity.
///
/// # Examples
///
/// ```
/// use site_crawler::url::{normalize_reference, CrawlTarget, LinkClass};
///
/// let base = CrawlTarget::parse("https://example.com").unwrap();
/// let link = normalize_reference("/about/", &base).link().unwrap();
/// assert_eq!(link.class, LinkClass::Internal);
/// assert_eq!(link.url, "https://example.com/about");
/// ```
pub fn normalize_reference(raw: &str, base: &CrawlTarget) -> Normalized {
    let raw = raw.trim();

    // Rule 1
    if raw.starts_with('#') {
        return Normalized::Ignored(IgnoreReason::Fragment);
    }

    // Rules 2, 3 and 6: parse, keeping track of whether the reference named a host
    let (resolved, explicit_host, absolute) = match Url::parse(raw) {
        Ok(url) => {
            if url.scheme() != "http" && url.scheme() != "https" {
                return Normalized::Ignored(IgnoreReason::NonHttpScheme);
            }
            (url, true, true)
        }
        Err(ParseError::RelativeUrlWithoutBase) => {
            if own_path(raw).is_empty() {
                return Normalized::Ignored(IgnoreReason::EmptyPath);
            }
            match base.url().join(raw) {
                Ok(url) => (url, raw.starts_with("//"), false),
                Err(_) => return Normalized::Ignored(IgnoreReason::Malformed),
            }
        }
        Err(_) => return Normalized::Ignored(IgnoreReason::Malformed),
    };

    let Some(ref_authority) = authority(&resolved) else {
        return Normalized::Ignored(IgnoreReason::Malformed);
    };

    // Rule 4
    let path = strip_trailing_slash(resolved.path()).to_string();

    // Rule 5
    if is_script_or_style_path(&path) {
        return Normalized::Ignored(IgnoreReason::ScriptOrStyle);
    }

    // Rule 7
    if is_image_path(&path) {
        return Normalized::keep(LinkClass::Media, canonicalize(resolved).to_string());
    }

    // Rule 8
    if explicit_host && !is_same_domain(&ref_authority, &base.authority()) {
        let url = if absolute {
            raw.to_string()
        } else {
            resolved.to_string()
        };
        return Normalized::keep(LinkClass::External, url);
    }

    // Rule 9
    if path == base.path() {
        return Normalized::Ignored(IgnoreReason::SelfLink);
    }

    // Rule 10
    Normalized::keep(LinkClass::Internal, canonicalize(resolved).to_string())
}

/// Drops query and fragment and strips a single trailing slash
pub fn canonicalize(mut url: Url) -> Url {
    url.set_fragment(None);
    url.set_query(None);
    let path = strip_trailing_slash(url.path()).to_string();
    url.set_path(&path);
    url
}

/// Removes one trailing `/` unless the path is exactly `/`
pub fn strip_trailing_slash(path: &str) -> &str {
    if path.len() > 1 {
        path.strip_suffix('/').unwrap_or(path)
    } else {
        path
    }
}

/// Returns true if the path names an image asset (case-insensitive)
pub fn is_image_path(path: &str) -> bool {
    has_extension(path, IMAGE_EXTENSIONS)
}

/// Returns true if the path names a script or stylesheet (case-insensitive)
pub fn is_script_or_style_path(path: &str) -> bool {
    has_extension(path, SCRIPT_STYLE_EXTENSIONS)
}

fn has_extension(path: &str, extensions: &[&str]) -> bool {
    let last_segment = path.rsplit('/').next().unwrap_or(path);
    match last_segment.rsplit_once('.') {
        Some((_, ext)) => extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)),
        None => false,
    }
}

/// The path portion of a relative reference, before any `?` or `#`
fn own_path(raw: &str) -> &str {
    let end = raw.find(|c: char| c == '?' || c == '#').unwrap_or(raw.len());
    &raw[..end]
}
