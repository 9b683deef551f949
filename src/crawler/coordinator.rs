//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the traversal engine. A single coordinator owns all
//! mutable crawl state:
//! - The visited URL and content fingerprint sets
//! - The frontier of pending pages
//! - The result accumulator
//!
//! Worker tasks only fetch. Claiming a URL, checking a fingerprint, link
//! extraction and merging all happen on the coordinator, one outcome at a
//! time, so no locking is needed and a URL is never fetched twice.

use crate::config::{validate, Config, CrawlerConfig};
use crate::crawler::fetcher::{FetchError, HttpFetcher, PageContent, PageFetcher};
use crate::crawler::parser::extract_links;
use crate::crawler::scheduler::Frontier;
use crate::output::CrawlResult;
use crate::state::{PageState, VisitedState};
use crate::url::{authority, is_same_domain, CrawlTarget};
use crate::CrawlError;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::task::JoinSet;
use tokio::time::{Duration, Instant};
use url::Url;

/// What a worker brings back from one fetch
#[derive(Debug)]
pub enum PageOutcome {
    /// The page was fetched
    Fetched {
        target: CrawlTarget,
        content: PageContent,
    },
    /// The fetch failed; contained here, never propagated
    Failed {
        target: CrawlTarget,
        error: FetchError,
    },
}

/// Same-host crawler
///
/// Generic over the fetcher so the engine can run against any content
/// source; production code uses `HttpFetcher`.
pub struct Crawler<F> {
    fetcher: Arc<F>,
    config: CrawlerConfig,
    hierarchical: bool,
}

impl Crawler<HttpFetcher> {
    /// Creates a crawler that fetches over HTTP
    ///
    /// # Returns
    ///
    /// * `Ok(Crawler)` - Ready to crawl
    /// * `Err(CrawlError::Config)` - The configuration failed validation
    /// * `Err(CrawlError::Http)` - The HTTP client could not be built
    pub fn from_config(config: &Config) -> Result<Self, CrawlError> {
        validate(config)?;
        Ok(Self::new(HttpFetcher::new(config)?, config))
    }
}

impl<F: PageFetcher + 'static> Crawler<F> {
    /// Creates a crawler around `fetcher`
    pub fn new(fetcher: F, config: &Config) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            config: config.crawler.clone(),
            hierarchical: config.output.hierarchical,
        }
    }

    /// The fetcher this crawler uses
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Crawls every page reachable from `seed` on the seed's host
    ///
    /// The seed is validated before any network activity. After that the
    /// crawl always returns a best-effort result: dead links, server errors
    /// and unreachable pages are recorded or logged, never returned as errors.
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlResult)` - The aggregated link graph
    /// * `Err(CrawlError::Url)` - The seed lacks a scheme or host
    pub async fn crawl(&self, seed: &str) -> Result<CrawlResult, CrawlError> {
        let seed = CrawlTarget::parse(seed)?;
        Ok(self.crawl_target(seed).await)
    }

    /// Crawls from an already validated seed
    pub async fn crawl_target(&self, seed: CrawlTarget) -> CrawlResult {
        let started = Instant::now();
        let deadline = self
            .config
            .crawl_deadline_secs
            .map(|secs| started + Duration::from_secs(secs));
        let limit = self.config.max_concurrent_fetches.max(1);

        tracing::info!(
            "Starting crawl of {} ({} concurrent fetches, {:?})",
            seed,
            limit,
            self.config.traversal
        );

        let mut run = CrawlRun::new(seed, &self.config, self.hierarchical);
        let mut in_flight: JoinSet<PageOutcome> = JoinSet::new();

        loop {
            while in_flight.len() < limit {
                let Some(target) = run.next_target() else {
                    break;
                };
                let fetcher = Arc::clone(&self.fetcher);
                in_flight.spawn(async move { visit(fetcher.as_ref(), target).await });
            }

            let joined = match deadline {
                Some(deadline) => {
                    match tokio::time::timeout_at(deadline, in_flight.join_next()).await {
                        Ok(joined) => joined,
                        Err(_) => {
                            tracing::warn!(
                                "Crawl deadline reached with {} fetches in flight and {} pages pending",
                                in_flight.len(),
                                run.frontier.len()
                            );
                            in_flight.abort_all();
                            run.abandon_in_flight();
                            break;
                        }
                    }
                }
                None => in_flight.join_next().await,
            };

            match joined {
                None => break,
                Some(Ok(outcome)) => run.apply(outcome),
                Some(Err(error)) if error.is_panic() => {
                    std::panic::resume_unwind(error.into_panic())
                }
                Some(Err(error)) => tracing::warn!("Fetch task cancelled: {}", error),
            }
        }

        let result = run.finish(started.elapsed());
        tracing::info!(
            "Crawl completed: {} pages visited in {:?} ({} internal, {} external, {} media, {} dead)",
            result.stats.total_pages(),
            result.stats.elapsed,
            result.link_urls.len(),
            result.external_urls.len(),
            result.media_urls.len(),
            result.dead_links.len()
        );
        result
    }
}

/// Fetches one page; runs on a worker task
async fn visit<F: PageFetcher + ?Sized>(fetcher: &F, target: CrawlTarget) -> PageOutcome {
    tracing::debug!("Fetching {}", target);
    match fetcher.fetch(&target).await {
        Ok(content) => PageOutcome::Fetched { target, content },
        Err(error) => PageOutcome::Failed { target, error },
    }
}

/// State for one crawl, owned by the coordinator
struct CrawlRun {
    visited: VisitedState,
    frontier: Frontier,
    result: CrawlResult,
    in_flight: HashSet<String>,
    max_pages: Option<usize>,
    seed_authority: String,
}

impl CrawlRun {
    fn new(seed: CrawlTarget, config: &CrawlerConfig, hierarchical: bool) -> Self {
        let seed_authority = seed.authority();
        Self {
            visited: VisitedState::new(),
            result: CrawlResult::new(seed.as_str(), hierarchical),
            frontier: Frontier::new(config.traversal, seed),
            in_flight: HashSet::new(),
            max_pages: config.max_pages.filter(|&max| max > 0),
            seed_authority,
        }
    }

    /// Pops frontier entries until one can be claimed
    ///
    /// The visited check and the claim are one step, so a URL reached
    /// through several pages is handed to a worker exactly once.
    fn next_target(&mut self) -> Option<CrawlTarget> {
        while let Some(target) = self.frontier.pop() {
            let url = target.as_str();

            if let Some(max) = self.max_pages {
                if self.visited.visited_count() >= max {
                    if !self.visited.is_visited(url) {
                        self.result.stats.page_limit_hit = true;
                    }
                    continue;
                }
            }

            if self.visited.claim_url(url) {
                self.in_flight.insert(url.to_string());
                return Some(target);
            }
        }
        None
    }

    /// Folds one worker outcome into the crawl
    fn apply(&mut self, outcome: PageOutcome) {
        match outcome {
            PageOutcome::Failed { target, error } => {
                let url = target.as_str();
                self.in_flight.remove(url);

                if error.is_dead_link() {
                    tracing::warn!("Dead link: {}", url);
                    self.result.stats.record(PageState::DeadLink);
                } else {
                    tracing::warn!("Skipping {}: {}", url, error);
                    self.result.stats.record(PageState::Failed);
                }
                self.result.record_failure(url, error.status_code());
            }

            PageOutcome::Fetched { target, content } => {
                let url = target.as_str();
                self.in_flight.remove(url);

                if self.left_seed_host(&content.final_url) {
                    tracing::info!(
                        "{} redirected off host to {}, not expanding",
                        url,
                        content.final_url
                    );
                    self.result.stats.record(PageState::OffHostRedirect);
                    self.result.set_page_state(url, PageState::OffHostRedirect);
                    return;
                }

                if !content.is_html() {
                    tracing::debug!(
                        "{} is {}, not expanding",
                        url,
                        content.content_type.as_deref().unwrap_or_default()
                    );
                    self.result.stats.record(PageState::NonHtml);
                    self.result.set_page_state(url, PageState::NonHtml);
                    return;
                }

                if !self.visited.claim_fingerprint(&content.fingerprint) {
                    tracing::debug!(
                        "Duplicate content at {} ({}), not expanding",
                        url,
                        content.fingerprint
                    );
                    self.result.stats.record(PageState::DuplicateContent);
                    self.result.set_page_state(url, PageState::DuplicateContent);
                    return;
                }

                let links = extract_links(&content, &target);
                tracing::info!(
                    "Visited {} ({} internal, {} external, {} media)",
                    url,
                    links.internal.len(),
                    links.external.len(),
                    links.media.len()
                );

                let children: Vec<CrawlTarget> = links
                    .internal
                    .keys()
                    .filter(|link| !self.visited.is_visited(link))
                    .filter_map(|link| match CrawlTarget::parse(link) {
                        Ok(child) => Some(child),
                        Err(e) => {
                            tracing::debug!("Skipping unqueueable link {}: {}", link, e);
                            None
                        }
                    })
                    .collect();

                self.result.merge(url, links);
                self.result.stats.record(PageState::Expanded);
                self.result.set_page_state(url, PageState::Expanded);
                self.frontier.push_children(children);
            }
        }
    }

    /// Returns true if a fetch ended on a host other than the seed's
    fn left_seed_host(&self, final_url: &str) -> bool {
        match Url::parse(final_url).ok().as_ref().and_then(authority) {
            Some(final_authority) => !is_same_domain(&final_authority, &self.seed_authority),
            None => false,
        }
    }

    /// Marks every in-flight fetch as abandoned after the deadline
    fn abandon_in_flight(&mut self) {
        self.result.stats.deadline_hit = true;
        for url in std::mem::take(&mut self.in_flight) {
            self.result.stats.record(PageState::Abandoned);
            self.result.set_page_state(&url, PageState::Abandoned);
        }
    }

    fn finish(mut self, elapsed: Duration) -> CrawlResult {
        self.result.stats.elapsed = elapsed;
        self.result
    }
}
