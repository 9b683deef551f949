//! Output module for crawl results
//!
//! This module handles:
//! - The global result accumulator the traversal engine merges into
//! - The optional page tree for hierarchical output
//! - Writing results as JSON and markdown summaries
//! - Crawl statistics

mod json;
mod markdown;
pub mod stats;
mod traits;
mod tree;

pub use json::JsonWriter;
pub use markdown::{format_markdown_summary, MarkdownWriter};
pub use stats::{format_statistics, print_statistics, CrawlStatistics};
pub use traits::{result_file_stem, OutputError, OutputResult, ResultWriter};
pub use tree::{LinkNode, LinkTree};

use crate::crawler::ClassifiedLinks;
use crate::state::PageState;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Canonical URL to optional page-tree node id
///
/// Values are `None` in flat mode and for external/media links.
pub type LinkMap = BTreeMap<String, Option<usize>>;

/// Aggregated result of one crawl
///
/// Created once per crawl, mutated only by the coordinator, handed back to
/// the caller when the crawl finishes.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlResult {
    /// Canonical seed URL
    #[serde(skip)]
    pub seed: String,

    /// Internal pages discovered
    pub link_urls: LinkMap,

    /// Links to other hosts
    pub external_urls: LinkMap,

    /// Image assets
    pub media_urls: LinkMap,

    /// Pages that answered HTTP 404
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub dead_links: BTreeMap<String, u16>,

    /// Page tree, in hierarchical mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tree: Option<LinkTree>,

    /// Pages whose fetch failed for any reason other than 404
    #[serde(skip)]
    pub failed_urls: BTreeSet<String>,

    #[serde(skip)]
    pub stats: CrawlStatistics,
}

impl CrawlResult {
    /// Creates an empty result for a crawl starting at `seed`
    pub fn new(seed: &str, hierarchical: bool) -> Self {
        Self {
            seed: seed.to_string(),
            tree: hierarchical.then(|| LinkTree::new(seed)),
            ..Self::default()
        }
    }

    /// Merges one page's links
    ///
    /// Union semantics: a URL already present keeps its first-seen value.
    /// Internal links whose own fetch already failed are not re-added.
    pub fn merge(&mut self, page: &str, links: ClassifiedLinks) {
        for url in links.internal.into_keys() {
            if self.link_urls.contains_key(&url) || self.is_excluded(&url) {
                continue;
            }
            let node = self.tree.as_mut().map(|tree| tree.add_child(page, &url));
            self.link_urls.insert(url, node);
        }
        merge_into(&mut self.external_urls, links.external);
        merge_into(&mut self.media_urls, links.media);
    }

    /// Records a failed fetch and drops the URL from the link set
    pub fn record_failure(&mut self, url: &str, status_code: Option<u16>) {
        self.link_urls.remove(url);
        match status_code {
            Some(404) => {
                self.dead_links.insert(url.to_string(), 404);
                self.set_page_state(url, PageState::DeadLink);
            }
            _ => {
                self.failed_urls.insert(url.to_string());
                self.set_page_state(url, PageState::Failed);
            }
        }
    }

    /// Annotates the page-tree node for `url`, if any
    pub fn set_page_state(&mut self, url: &str, state: PageState) {
        if let Some(tree) = self.tree.as_mut() {
            tree.set_state(url, state);
        }
    }

    /// Returns true if the URL's fetch failed
    pub fn is_excluded(&self, url: &str) -> bool {
        self.dead_links.contains_key(url) || self.failed_urls.contains(url)
    }
}

fn merge_into(target: &mut LinkMap, links: LinkMap) {
    for (url, value) in links {
        target.entry(url).or_insert(value);
    }
}
