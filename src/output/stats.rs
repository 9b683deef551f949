//! Crawl statistics
//!
//! This module counts how each claimed page finished and renders the
//! end-of-crawl report.

use crate::output::CrawlResult;
use crate::state::PageState;
use std::collections::BTreeMap;
use std::time::Duration;

/// Crawl statistics summary
#[derive(Debug, Clone, Default)]
pub struct CrawlStatistics {
    /// Count of claimed pages by final state
    pub pages_by_state: BTreeMap<PageState, u64>,

    /// Wall-clock time of the crawl
    pub elapsed: Duration,

    /// The overall crawl deadline expired before the frontier drained
    pub deadline_hit: bool,

    /// The page cap stopped the crawl before the frontier drained
    pub page_limit_hit: bool,
}

impl CrawlStatistics {
    /// Counts one page in `state`
    pub fn record(&mut self, state: PageState) {
        *self.pages_by_state.entry(state).or_insert(0) += 1;
    }

    /// Number of pages that ended in `state`
    pub fn count(&self, state: PageState) -> u64 {
        self.pages_by_state.get(&state).copied().unwrap_or(0)
    }

    /// Total number of claimed pages
    pub fn total_pages(&self) -> u64 {
        self.pages_by_state.values().sum()
    }

    /// Returns true if the crawl ran to completion
    pub fn is_complete(&self) -> bool {
        !self.deadline_hit && !self.page_limit_hit
    }
}

/// Formats the statistics block for a finished crawl
pub fn format_statistics(result: &CrawlResult) -> String {
    let stats = &result.stats;
    let mut out = String::from("=== Crawl Statistics ===\n\n");

    out.push_str(&format!("Seed: {}\n", result.seed));
    out.push_str(&format!("Elapsed: {:.2}s\n", stats.elapsed.as_secs_f64()));
    out.push_str(&format!("Pages visited: {}\n\n", stats.total_pages()));

    out.push_str("Links:\n");
    out.push_str(&format!("  Internal: {}\n", result.link_urls.len()));
    out.push_str(&format!("  External: {}\n", result.external_urls.len()));
    out.push_str(&format!("  Media: {}\n", result.media_urls.len()));
    out.push_str(&format!("  Dead: {}\n\n", result.dead_links.len()));

    out.push_str("Pages by State:\n");
    let total = stats.total_pages();
    for (state, count) in &stats.pages_by_state {
        let percentage = if total > 0 {
            (*count as f64 / total as f64) * 100.0
        } else {
            0.0
        };
        out.push_str(&format!("  {}: {} ({:.1}%)\n", state, count, percentage));
    }

    if stats.deadline_hit {
        out.push_str("\nCrawl deadline reached; result is partial\n");
    }
    if stats.page_limit_hit {
        out.push_str("\nPage limit reached; result is partial\n");
    }

    out
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(result: &CrawlResult) {
    print!("{}", format_statistics(result));
}
