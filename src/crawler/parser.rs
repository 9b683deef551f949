//! HTML link extraction
//!
//! This module scans a fetched page for every `href` and `src` attribute,
//! runs each value through the reference normalizer and buckets the kept
//! links into internal, external and media sets.

use crate::crawler::fetcher::PageContent;
use crate::output::LinkMap;
use crate::url::{normalize_reference, CrawlTarget, LinkClass, Normalized, NormalizedRef};
use scraper::{Html, Selector};

/// Attributes that carry navigable or loadable references
const REFERENCE_ATTRIBUTES: &[&str] = &["href", "src"];

/// Links found on a single page, in three disjoint sets
///
/// Keys are canonical URLs; iteration is lexicographic. Values are always
/// `None` at extraction time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifiedLinks {
    pub internal: LinkMap,
    pub external: LinkMap,
    pub media: LinkMap,
}

impl ClassifiedLinks {
    /// Adds a classified link; duplicates within the page coalesce
    pub fn insert(&mut self, link: NormalizedRef) {
        let set = match link.class {
            LinkClass::Internal => &mut self.internal,
            LinkClass::External => &mut self.external,
            LinkClass::Media => &mut self.media,
        };
        set.entry(link.url).or_insert(None);
    }

    /// Total number of distinct links
    pub fn len(&self) -> usize {
        self.internal.len() + self.external.len() + self.media.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Extracts classified links from a fetched page
///
/// # Arguments
///
/// * `content` - The fetched page
/// * `page` - The target the content was fetched for; relative references
///   resolve against it and self-links are judged against its path
pub fn extract_links(content: &PageContent, page: &CrawlTarget) -> ClassifiedLinks {
    extract_links_from_html(&content.body, page)
}

/// Extracts classified links from raw HTML
///
/// Never fails: unparseable markup yields whatever the HTML5 parser
/// recovers, and a malformed attribute value only drops that one reference.
///
/// # Example
///
/// ```
/// use site_crawler::crawler::extract_links_from_html;
/// use site_crawler::url::CrawlTarget;
///
/// let page = CrawlTarget::parse("https://example.com").unwrap();
/// let links = extract_links_from_html(r#"<a href="/about">About</a>"#, &page);
/// assert!(links.internal.contains_key("https://example.com/about"));
/// ```
pub fn extract_links_from_html(html: &str, page: &CrawlTarget) -> ClassifiedLinks {
    let document = Html::parse_document(html);
    let mut links = ClassifiedLinks::default();

    let Ok(selector) = Selector::parse("[href], [src]") else {
        return links;
    };

    for element in document.select(&selector) {
        for attribute in REFERENCE_ATTRIBUTES {
            let Some(raw) = element.value().attr(attribute) else {
                continue;
            };

            match normalize_reference(raw, page) {
                Normalized::Link(link) => links.insert(link),
                Normalized::Ignored(reason) => {
                    tracing::trace!("Ignoring {}={:?} on {}: {:?}", attribute, raw, page, reason);
                }
            }
        }
    }

    links
}
