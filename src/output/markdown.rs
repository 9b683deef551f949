//! Markdown summary generation
//!
//! This module generates a human-readable markdown summary of a crawl:
//! counts, then every internal, external, media and dead link.

use crate::output::traits::{result_file_stem, OutputResult, ResultWriter};
use crate::output::{CrawlResult, LinkMap};
use crate::state::PageState;
use std::fs;
use std::path::PathBuf;

/// Writes `<results-dir>/<seed host>.md`
#[derive(Debug, Clone)]
pub struct MarkdownWriter {
    results_dir: PathBuf,
}

impl MarkdownWriter {
    pub fn new(results_dir: impl Into<PathBuf>) -> Self {
        Self {
            results_dir: results_dir.into(),
        }
    }
}

impl ResultWriter for MarkdownWriter {
    fn write(&self, result: &CrawlResult) -> OutputResult<PathBuf> {
        fs::create_dir_all(&self.results_dir)?;

        let path = self
            .results_dir
            .join(format!("{}.md", result_file_stem(&result.seed)));
        fs::write(&path, format_markdown_summary(result))?;

        tracing::info!("Wrote markdown summary to {}", path.display());
        Ok(path)
    }
}

/// Formats a crawl result as markdown
///
/// # Arguments
///
/// * `result` - The finished crawl
///
/// # Returns
///
/// A formatted markdown string
pub fn format_markdown_summary(result: &CrawlResult) -> String {
    let mut md = String::new();
    let stats = &result.stats;

    // Title
    md.push_str(&format!("# Crawl Summary: {}\n\n", result.seed));

    // Overview
    md.push_str("## Overview\n\n");
    md.push_str(&format!(
        "- **Duration**: {:.2} seconds\n",
        stats.elapsed.as_secs_f64()
    ));
    md.push_str(&format!("- **Pages visited**: {}\n", stats.total_pages()));
    md.push_str(&format!(
        "- **Pages expanded**: {}\n",
        stats.count(PageState::Expanded)
    ));
    md.push_str(&format!(
        "- **Duplicate content**: {}\n",
        stats.count(PageState::DuplicateContent)
    ));
    md.push_str(&format!(
        "- **Failed fetches**: {}\n",
        stats.count(PageState::Failed)
    ));
    if !stats.is_complete() {
        md.push_str("- **Status**: partial\n");
    }
    md.push('\n');

    push_section(&mut md, "Internal Pages", &result.link_urls);
    push_section(&mut md, "External Links", &result.external_urls);
    push_section(&mut md, "Media", &result.media_urls);

    if !result.dead_links.is_empty() {
        md.push_str(&format!("## Dead Links ({})\n\n", result.dead_links.len()));
        md.push_str("| URL | Status |\n");
        md.push_str("|-----|--------|\n");
        for (url, status) in &result.dead_links {
            md.push_str(&format!("| {} | {} |\n", url, status));
        }
        md.push('\n');
    }

    if !result.failed_urls.is_empty() {
        md.push_str(&format!(
            "## Failed Pages ({})\n\n",
            result.failed_urls.len()
        ));
        for url in &result.failed_urls {
            md.push_str(&format!("- {}\n", url));
        }
        md.push('\n');
    }

    md
}

fn push_section(md: &mut String, title: &str, links: &LinkMap) {
    md.push_str(&format!("## {} ({})\n\n", title, links.len()));
    if links.is_empty() {
        md.push_str("_None_\n\n");
        return;
    }
    for url in links.keys() {
        md.push_str(&format!("- {}\n", url));
    }
    md.push('\n');
}
