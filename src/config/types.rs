use serde::Deserialize;

/// Main configuration structure for Site-Crawler
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Order in which pending pages leave the frontier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TraversalOrder {
    /// LIFO stack; visits pages in the same order as a recursive walk
    #[default]
    DepthFirst,
    /// FIFO queue
    BreadthFirst,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CrawlerConfig {
    /// Maximum number of fetches in flight at once (1 = strictly sequential)
    #[serde(default = "default_max_concurrent_fetches")]
    pub max_concurrent_fetches: usize,

    /// Per-fetch timeout (seconds)
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,

    /// TCP connect timeout (seconds)
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Overall crawl deadline (seconds); no deadline when absent
    #[serde(default)]
    pub crawl_deadline_secs: Option<u64>,

    /// Frontier discipline
    #[serde(default)]
    pub traversal: TraversalOrder,

    /// Stop claiming new pages after this many; unlimited when absent or 0
    #[serde(default)]
    pub max_pages: Option<usize>,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_concurrent_fetches: default_max_concurrent_fetches(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            crawl_deadline_secs: None,
            traversal: TraversalOrder::default(),
            max_pages: None,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(default = "default_crawler_name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(default = "default_crawler_version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(default)]
    pub contact_url: Option<String>,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: default_crawler_name(),
            crawler_version: default_crawler_version(),
            contact_url: None,
        }
    }
}

impl UserAgentConfig {
    /// Formats the User-Agent header: `Name/Version (+ContactURL)`
    pub fn header_value(&self) -> String {
        match &self.contact_url {
            Some(contact) => format!(
                "{}/{} (+{})",
                self.crawler_name, self.crawler_version, contact
            ),
            None => format!("{}/{}", self.crawler_name, self.crawler_version),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OutputConfig {
    /// Directory the result files are written into
    #[serde(default = "default_results_dir")]
    pub results_dir: String,

    /// Record which page first linked each internal page
    #[serde(default)]
    pub hierarchical: bool,

    /// Also write a markdown summary next to the JSON result
    #[serde(default)]
    pub summary: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            results_dir: default_results_dir(),
            hierarchical: false,
            summary: false,
        }
    }
}

fn default_max_concurrent_fetches() -> usize {
    4
}

fn default_fetch_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_crawler_name() -> String {
    "site-crawler".to_string()
}

fn default_crawler_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_results_dir() -> String {
    "results".to_string()
}
