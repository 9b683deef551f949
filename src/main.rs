//! Site-Crawler main entry point
//!
//! This is the command-line interface for the Site-Crawler link mapper.

use anyhow::{Context, Result};
use clap::Parser;
use site_crawler::config::{load_config_or_default, validate, Config, TraversalOrder};
use site_crawler::crawler::crawl;
use site_crawler::output::{print_statistics, JsonWriter, MarkdownWriter, ResultWriter};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Site-Crawler: a same-host link mapper
///
/// Site-Crawler visits every page reachable from the seed URL on the seed's
/// own host and writes the internal, external and media links it found to
/// `<results-dir>/<host>.json`.
#[derive(Parser, Debug)]
#[command(name = "site-crawler")]
#[command(version)]
#[command(about = "A same-host link mapper", long_about = None)]
struct Cli {
    /// Absolute http(s) URL to start crawling from
    #[arg(value_name = "SEED_URL", env = "CRAWL_SEED_URL")]
    seed: String,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Maximum number of concurrent fetches (1 = sequential)
    #[arg(long, value_name = "N")]
    concurrency: Option<usize>,

    /// Directory to write result files into
    #[arg(long, value_name = "DIR")]
    results_dir: Option<String>,

    /// Record which page first linked each internal page
    #[arg(long)]
    tree: bool,

    /// Visit pages breadth-first instead of depth-first
    #[arg(long)]
    breadth_first: bool,

    /// Stop the crawl after this many seconds and keep the partial result
    #[arg(long, value_name = "SECS")]
    deadline: Option<u64>,

    /// Also write a markdown summary
    #[arg(long)]
    summary: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let mut config = load_config_or_default(cli.config.as_deref()).with_context(|| {
        match &cli.config {
            Some(path) => format!("Failed to load configuration from {}", path.display()),
            None => "Invalid default configuration".to_string(),
        }
    })?;
    apply_overrides(&mut config, &cli);
    validate(&config).context("Invalid command-line options")?;

    tracing::info!("Crawling {}", cli.seed);
    let result = crawl(&cli.seed, &config)
        .await
        .with_context(|| format!("Cannot crawl {}", cli.seed))?;

    let json_path = JsonWriter::new(&config.output.results_dir)
        .write(&result)
        .context("Failed to write crawl result")?;

    let summary_path = if config.output.summary {
        let path = MarkdownWriter::new(&config.output.results_dir)
            .write(&result)
            .context("Failed to write markdown summary")?;
        Some(path)
    } else {
        None
    };

    if !cli.quiet {
        print_statistics(&result);
        println!("\n✓ Result written to: {}", json_path.display());
        if let Some(path) = summary_path {
            println!("✓ Summary written to: {}", path.display());
        }
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("site_crawler=info,warn"),
            1 => EnvFilter::new("site_crawler=debug,info"),
            2 => EnvFilter::new("site_crawler=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Applies command-line flags on top of the file configuration
fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(concurrency) = cli.concurrency {
        config.crawler.max_concurrent_fetches = concurrency;
    }
    if let Some(dir) = &cli.results_dir {
        config.output.results_dir = dir.clone();
    }
    if let Some(deadline) = cli.deadline {
        config.crawler.crawl_deadline_secs = Some(deadline);
    }
    if cli.breadth_first {
        config.crawler.traversal = TraversalOrder::BreadthFirst;
    }
    config.output.hierarchical |= cli.tree;
    config.output.summary |= cli.summary;
}
